use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use shared_config::AppConfig;
use triage_cell::{PatientRecord, TriageError};

use crate::models::StatusPartition;
use crate::services::supabase_store::SupabasePatientStore;

/// Status change applied to a stored record. May run more than once when a
/// store has to retry against a fresher copy.
pub type RecordChange = Box<dyn Fn(&mut PatientRecord) -> Result<(), TriageError> + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    Updated(PatientRecord),
    NotFound,
    Rejected(TriageError),
}

/// Persistence seam for patient records. Implementations own consistency;
/// the triage engine only ever sees the snapshots they return.
#[async_trait]
pub trait PatientStore: Send + Sync {
    async fn insert(&self, record: PatientRecord) -> Result<PatientRecord>;

    async fn find(&self, id: Uuid) -> Result<Option<PatientRecord>>;

    /// Applies `change` to the current record and persists it as one step,
    /// so concurrent changes to the same patient cannot overwrite each other.
    async fn update(&self, id: Uuid, change: RecordChange) -> Result<UpdateOutcome>;

    async fn partition_by_status(&self) -> Result<StatusPartition>;
}

/// Picks Supabase when credentials are present, otherwise keeps records in memory.
pub fn store_from_config(config: &AppConfig) -> Arc<dyn PatientStore> {
    if config.is_supabase_configured() {
        info!("Using Supabase patient store (table: {})", config.patients_table);
        Arc::new(SupabasePatientStore::new(config))
    } else {
        info!("Using in-memory patient store");
        Arc::new(InMemoryPatientStore::new())
    }
}

#[derive(Default)]
pub struct InMemoryPatientStore {
    records: RwLock<HashMap<Uuid, PatientRecord>>,
}

impl InMemoryPatientStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl PatientStore for InMemoryPatientStore {
    async fn insert(&self, record: PatientRecord) -> Result<PatientRecord> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.id) {
            return Err(anyhow!("Patient {} already exists", record.id));
        }

        debug!("Storing patient {}", record.id);
        records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find(&self, id: Uuid) -> Result<Option<PatientRecord>> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn update(&self, id: Uuid, change: RecordChange) -> Result<UpdateOutcome> {
        let mut records = self.records.write().await;
        let Some(existing) = records.get_mut(&id) else {
            return Ok(UpdateOutcome::NotFound);
        };

        let mut changed = existing.clone();
        if let Err(e) = change(&mut changed) {
            return Ok(UpdateOutcome::Rejected(e));
        }

        *existing = changed.clone();
        Ok(UpdateOutcome::Updated(changed))
    }

    async fn partition_by_status(&self) -> Result<StatusPartition> {
        let records = self.records.read().await;
        let mut ordered: Vec<PatientRecord> = records.values().cloned().collect();
        ordered.sort_by(|a, b| a.arrival_time.cmp(&b.arrival_time).then_with(|| a.id.cmp(&b.id)));

        Ok(StatusPartition::from_records(ordered))
    }
}
