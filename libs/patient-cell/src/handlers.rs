use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use shared_models::error::AppError;
use triage_cell::QueueSnapshot;

use crate::models::{CreatePatientRequest, PatientEnvelope, PatientError, PatientUpdateResponse};
use crate::services::PatientService;

fn parse_patient_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw)
        .map_err(|_| PatientError::ValidationFailed(format!("Invalid patient id: {}", raw)).into())
}

#[axum::debug_handler]
pub async fn create_patient(
    State(service): State<Arc<PatientService>>,
    Json(request): Json<CreatePatientRequest>,
) -> Result<(StatusCode, Json<PatientEnvelope>), AppError> {
    let patient = service.admit_patient(request).await?;

    Ok((StatusCode::CREATED, Json(PatientEnvelope { patient })))
}

#[axum::debug_handler]
pub async fn get_queue(
    State(service): State<Arc<PatientService>>,
) -> Result<Json<QueueSnapshot>, AppError> {
    let snapshot = service.queue_snapshot().await?;
    Ok(Json(snapshot))
}

#[axum::debug_handler]
pub async fn get_patient(
    State(service): State<Arc<PatientService>>,
    Path(patient_id): Path<String>,
) -> Result<Json<PatientEnvelope>, AppError> {
    let id = parse_patient_id(&patient_id)?;
    let patient = service.get_patient(id).await?;

    Ok(Json(PatientEnvelope { patient }))
}

#[axum::debug_handler]
pub async fn complete_patient(
    State(service): State<Arc<PatientService>>,
    Path(patient_id): Path<String>,
) -> Result<Json<PatientUpdateResponse>, AppError> {
    let id = parse_patient_id(&patient_id)?;
    let patient = service.mark_completed(id).await?;

    Ok(Json(PatientUpdateResponse {
        message: "Patient marked completed".to_string(),
        patient,
    }))
}

#[axum::debug_handler]
pub async fn mark_no_show(
    State(service): State<Arc<PatientService>>,
    Path(patient_id): Path<String>,
) -> Result<Json<PatientUpdateResponse>, AppError> {
    let id = parse_patient_id(&patient_id)?;
    let patient = service.mark_no_show(id).await?;

    Ok(Json(PatientUpdateResponse {
        message: "Patient marked no-show".to_string(),
        patient,
    }))
}

#[axum::debug_handler]
pub async fn upgrade_to_emergency(
    State(service): State<Arc<PatientService>>,
    Path(patient_id): Path<String>,
) -> Result<Json<PatientUpdateResponse>, AppError> {
    let id = parse_patient_id(&patient_id)?;
    let patient = service.upgrade_to_emergency(id).await?;

    Ok(Json(PatientUpdateResponse {
        message: "Upgraded to emergency".to_string(),
        patient,
    }))
}
