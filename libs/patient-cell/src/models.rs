use serde::{Deserialize, Serialize};

use shared_models::error::AppError;
use triage_cell::{PatientRecord, RawIntake, TriageError};

pub const MAX_NAME_LENGTH: usize = 120;
pub const MAX_PHONE_LENGTH: usize = 32;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePatientRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    #[serde(flatten)]
    pub intake: RawIntake,
}

impl CreatePatientRequest {
    pub fn validate(&self) -> Result<(), PatientError> {
        if let Some(name) = &self.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(PatientError::ValidationFailed("Name must not be blank".to_string()));
            }
            if name.chars().count() > MAX_NAME_LENGTH {
                return Err(PatientError::ValidationFailed(format!(
                    "Name must be at most {} characters",
                    MAX_NAME_LENGTH
                )));
            }
        }

        if let Some(phone) = &self.phone {
            let valid_chars = phone
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'));
            if !valid_chars || phone.len() > MAX_PHONE_LENGTH {
                return Err(PatientError::ValidationFailed(format!(
                    "Invalid phone number: {}",
                    phone
                )));
            }
        }

        Ok(())
    }
}

/// Records split by status, read together so the queue view sees one
/// consistent picture.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusPartition {
    pub waiting: Vec<PatientRecord>,
    pub completed: Vec<PatientRecord>,
    pub no_shows: Vec<PatientRecord>,
}

impl StatusPartition {
    pub fn from_records(records: impl IntoIterator<Item = PatientRecord>) -> Self {
        use triage_cell::PatientStatus;

        let mut partition = Self::default();
        for record in records {
            match record.status {
                PatientStatus::Waiting => partition.waiting.push(record),
                PatientStatus::Completed => partition.completed.push(record),
                PatientStatus::NoShow => partition.no_shows.push(record),
            }
        }
        partition
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientEnvelope {
    pub patient: PatientRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientUpdateResponse {
    pub message: String,
    pub patient: PatientRecord,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PatientError {
    #[error("Patient not found")]
    NotFound,

    #[error("Patient store unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Validation error: {0}")]
    ValidationFailed(String),

    #[error(transparent)]
    InvalidTransition(#[from] TriageError),
}

impl From<PatientError> for AppError {
    fn from(error: PatientError) -> Self {
        match error {
            PatientError::NotFound => AppError::NotFound(error.to_string()),
            PatientError::StorageUnavailable(_) => AppError::ServiceUnavailable(error.to_string()),
            PatientError::ValidationFailed(_) => AppError::ValidationError(error.to_string()),
            PatientError::InvalidTransition(_) => AppError::Conflict(error.to_string()),
        }
    }
}
