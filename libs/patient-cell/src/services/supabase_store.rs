use anyhow::{Result, anyhow};
use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Method,
};
use serde_json::Value;
use tracing::{debug, error, warn};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;
use triage_cell::PatientRecord;

use crate::models::StatusPartition;
use crate::services::store::{PatientStore, RecordChange, UpdateOutcome};

const MAX_UPDATE_ATTEMPTS: usize = 3;

/// Keeps patient records in a PostgREST table, one row per record.
pub struct SupabasePatientStore {
    supabase: SupabaseClient,
    table: String,
}

impl SupabasePatientStore {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_client(SupabaseClient::new(config), &config.patients_table)
    }

    pub fn with_client(supabase: SupabaseClient, table: &str) -> Self {
        Self {
            supabase,
            table: table.to_string(),
        }
    }

    fn table_path(&self) -> String {
        format!("/rest/v1/{}", self.table)
    }

    fn representation_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));
        headers
    }

    fn first_row(rows: Vec<Value>, context: &str) -> Result<PatientRecord> {
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("{}: no row returned", context))?;

        serde_json::from_value(row).map_err(|e| {
            error!("Failed to parse patient row: {}", e);
            anyhow!("{}: invalid row: {}", context, e)
        })
    }
}

#[async_trait]
impl PatientStore for SupabasePatientStore {
    async fn insert(&self, record: PatientRecord) -> Result<PatientRecord> {
        debug!("Inserting patient {} into {}", record.id, self.table);

        let rows: Vec<Value> = self.supabase.request_with_headers(
            Method::POST,
            &self.table_path(),
            None,
            Some(serde_json::to_value(&record)?),
            Some(Self::representation_headers()),
        ).await?;

        Self::first_row(rows, "Failed to create patient")
    }

    async fn find(&self, id: Uuid) -> Result<Option<PatientRecord>> {
        let path = format!("{}?id=eq.{}", self.table_path(), id);
        let rows: Vec<Value> = self.supabase.request(Method::GET, &path, None, None).await?;

        if rows.is_empty() {
            return Ok(None);
        }

        Self::first_row(rows, "Failed to read patient").map(Some)
    }

    async fn update(&self, id: Uuid, change: RecordChange) -> Result<UpdateOutcome> {
        for attempt in 1..=MAX_UPDATE_ATTEMPTS {
            let Some(current) = self.find(id).await? else {
                return Ok(UpdateOutcome::NotFound);
            };

            let mut changed = current.clone();
            if let Err(e) = change(&mut changed) {
                return Ok(UpdateOutcome::Rejected(e));
            }

            // Only applies if nobody moved the patient out of the status we read.
            let path = format!(
                "{}?id=eq.{}&status=eq.{}",
                self.table_path(),
                id,
                current.status.as_str()
            );
            let rows: Vec<Value> = self.supabase.request_with_headers(
                Method::PATCH,
                &path,
                None,
                Some(serde_json::to_value(&changed)?),
                Some(Self::representation_headers()),
            ).await?;

            if !rows.is_empty() {
                debug!("Updated patient {} ({})", id, changed.status);
                return Self::first_row(rows, "Failed to update patient").map(UpdateOutcome::Updated);
            }

            warn!("Patient {} changed concurrently (attempt {})", id, attempt);
        }

        Err(anyhow!("Patient {} kept changing concurrently", id))
    }

    async fn partition_by_status(&self) -> Result<StatusPartition> {
        let path = format!(
            "{}?status=in.(waiting,completed,noshow)&order=arrival_time.asc",
            self.table_path()
        );
        let records: Vec<PatientRecord> = self.supabase.request(Method::GET, &path, None, None).await?;

        Ok(StatusPartition::from_records(records))
    }
}
