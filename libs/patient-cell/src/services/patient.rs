use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use triage_cell::{PatientIntake, PatientRecord, QueueSnapshot, TriageEngine, TriageError};

use crate::models::{CreatePatientRequest, PatientError};
use crate::services::store::{PatientStore, UpdateOutcome};

pub struct PatientService {
    store: Arc<dyn PatientStore>,
    engine: TriageEngine,
}

impl PatientService {
    pub fn new(store: Arc<dyn PatientStore>, engine: TriageEngine) -> Self {
        Self { store, engine }
    }

    pub fn engine(&self) -> &TriageEngine {
        &self.engine
    }

    /// Scores a new arrival and stores it as waiting.
    pub async fn admit_patient(&self, request: CreatePatientRequest) -> Result<PatientRecord, PatientError> {
        request.validate()?;

        let intake = PatientIntake::from(&request.intake);
        let assessment = self.engine.assess(&intake);
        let name = request.name.map(|name| name.trim().to_string());
        let record = PatientRecord::admit(intake, assessment, Utc::now()).with_contact(name, request.phone);

        let stored = self.store.insert(record).await.map_err(storage_error)?;

        info!(
            patient_id = %stored.id,
            score = stored.urgency_score,
            class = stored.priority_class.rank(),
            "Patient admitted to queue"
        );
        Ok(stored)
    }

    pub async fn get_patient(&self, id: Uuid) -> Result<PatientRecord, PatientError> {
        self.store
            .find(id)
            .await
            .map_err(storage_error)?
            .ok_or(PatientError::NotFound)
    }

    pub async fn queue_snapshot(&self) -> Result<QueueSnapshot, PatientError> {
        let partition = self.store.partition_by_status().await.map_err(storage_error)?;
        debug!(
            waiting = partition.waiting.len(),
            completed = partition.completed.len(),
            no_shows = partition.no_shows.len(),
            "Loaded patient partition"
        );

        Ok(self
            .engine
            .snapshot(&partition.waiting, &partition.completed, &partition.no_shows))
    }

    pub async fn mark_completed(&self, id: Uuid) -> Result<PatientRecord, PatientError> {
        self.apply(id, "completed", PatientRecord::complete).await
    }

    pub async fn mark_no_show(&self, id: Uuid) -> Result<PatientRecord, PatientError> {
        self.apply(id, "no-show", PatientRecord::mark_no_show).await
    }

    pub async fn upgrade_to_emergency(&self, id: Uuid) -> Result<PatientRecord, PatientError> {
        self.apply(id, "emergency upgrade", PatientRecord::upgrade_to_emergency).await
    }

    async fn apply<F>(&self, id: Uuid, action: &str, change: F) -> Result<PatientRecord, PatientError>
    where
        F: Fn(&mut PatientRecord) -> Result<(), TriageError> + Send + Sync + 'static,
    {
        let outcome = self
            .store
            .update(id, Box::new(change))
            .await
            .map_err(storage_error)?;

        match outcome {
            UpdateOutcome::Updated(saved) => {
                info!(patient_id = %id, status = %saved.status, "Applied {}", action);
                Ok(saved)
            }
            UpdateOutcome::NotFound => Err(PatientError::NotFound),
            UpdateOutcome::Rejected(e) => {
                warn!(patient_id = %id, "Rejected {}: {}", action, e);
                Err(e.into())
            }
        }
    }
}

fn storage_error(e: anyhow::Error) -> PatientError {
    error!("Patient store error: {}", e);
    PatientError::StorageUnavailable(e.to_string())
}
