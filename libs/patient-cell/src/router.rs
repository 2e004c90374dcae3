use std::sync::Arc;
use axum::{routing::{get, patch, post}, Router};

use crate::handlers::*;
use crate::services::PatientService;

pub fn create_patient_router(service: Arc<PatientService>) -> Router {
    Router::new()
        .route("/", post(create_patient))
        .route("/queue", get(get_queue))
        .route("/{id}", get(get_patient))
        .route("/{id}/complete", patch(complete_patient))
        .route("/{id}/noshow", patch(mark_no_show))
        .route("/{id}/emergency", patch(upgrade_to_emergency))
        .with_state(service)
}
