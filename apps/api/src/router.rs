use std::sync::Arc;

use axum::{
    Json, Router,
    routing::get,
};
use chrono::Utc;
use serde_json::{json, Value};

use patient_cell::{create_patient_router, services::PatientService};

async fn health() -> Json<Value> {
    Json(json!({
        "status": "Triage API is running",
        "time": Utc::now().to_rfc3339(),
    }))
}

pub fn create_router(service: Arc<PatientService>) -> Router {
    Router::new()
        .route("/", get(health))
        .nest("/api/patients", create_patient_router(service))
}
