// =====================================================================================
// SUPABASE PATIENT STORE TESTS - POSTGREST CALLS AGAINST A MOCK SERVER
// =====================================================================================

use assert_matches::assert_matches;
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use patient_cell::services::{PatientStore, SupabasePatientStore, UpdateOutcome};
use shared_database::SupabaseClient;
use triage_cell::{
    ArrivalType, PatientIntake, PatientRecord, PatientStatus, Symptom, TriageEngine, TriageError,
};

const TABLE: &str = "triage_patients";

fn store_for(server: &MockServer) -> SupabasePatientStore {
    SupabasePatientStore::with_client(SupabaseClient::with_credentials(&server.uri(), "test_anon_key"), TABLE)
}

fn record(symptom: Symptom) -> PatientRecord {
    let intake = PatientIntake::new(symptom, Some(42), Some(5), ArrivalType::Routine);
    let assessment = TriageEngine::default().assess(&intake);
    PatientRecord::admit(intake, assessment, Utc::now())
}

#[tokio::test]
async fn test_insert_posts_row_with_representation() {
    let server = MockServer::start().await;
    let patient = record(Symptom::Stomach);

    Mock::given(method("POST"))
        .and(path("/rest/v1/triage_patients"))
        .and(header("apikey", "test_anon_key"))
        .and(header("Prefer", "return=representation"))
        .and(body_partial_json(json!({ "symptom": "stomach", "status": "waiting" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([patient])))
        .expect(1)
        .mount(&server)
        .await;

    let stored = store_for(&server).insert(patient.clone()).await.unwrap();
    assert_eq!(stored, patient);
}

#[tokio::test]
async fn test_find_missing_patient_returns_none() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/triage_patients"))
        .and(query_param("id", format!("eq.{}", id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    assert_eq!(store_for(&server).find(id).await.unwrap(), None);
}

#[tokio::test]
async fn test_update_patches_only_while_status_unchanged() {
    let server = MockServer::start().await;
    let patient = record(Symptom::FeverCold);
    let mut completed = patient.clone();
    completed.complete().unwrap();

    Mock::given(method("GET"))
        .and(path("/rest/v1/triage_patients"))
        .and(query_param("id", format!("eq.{}", patient.id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([patient])))
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/triage_patients"))
        .and(query_param("id", format!("eq.{}", patient.id)))
        .and(query_param("status", "eq.waiting"))
        .and(body_partial_json(json!({ "status": "completed" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([completed])))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = store_for(&server)
        .update(patient.id, Box::new(PatientRecord::complete))
        .await
        .unwrap();

    assert_matches!(outcome, UpdateOutcome::Updated(saved) if saved.status == PatientStatus::Completed);
}

#[tokio::test]
async fn test_update_rejected_when_patient_changed_underneath() {
    let server = MockServer::start().await;
    let patient = record(Symptom::Routine);
    let mut completed = patient.clone();
    completed.complete().unwrap();

    // first read still sees the patient waiting, the retry sees it completed
    Mock::given(method("GET"))
        .and(path("/rest/v1/triage_patients"))
        .and(query_param("id", format!("eq.{}", patient.id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([patient])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/triage_patients"))
        .and(query_param("id", format!("eq.{}", patient.id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([completed])))
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/triage_patients"))
        .and(query_param("status", "eq.waiting"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = store_for(&server)
        .update(patient.id, Box::new(PatientRecord::upgrade_to_emergency))
        .await
        .unwrap();

    assert_matches!(
        outcome,
        UpdateOutcome::Rejected(TriageError::UpgradeNotAllowed { status: PatientStatus::Completed })
    );
}

#[tokio::test]
async fn test_update_missing_patient() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/triage_patients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let outcome = store_for(&server)
        .update(Uuid::new_v4(), Box::new(PatientRecord::mark_no_show))
        .await
        .unwrap();

    assert_eq!(outcome, UpdateOutcome::NotFound);
}

#[tokio::test]
async fn test_partition_splits_rows_by_status() {
    let server = MockServer::start().await;
    let waiting = record(Symptom::Trauma);
    let mut served = record(Symptom::Routine);
    served.complete().unwrap();
    let mut absent = record(Symptom::Other);
    absent.mark_no_show().unwrap();

    Mock::given(method("GET"))
        .and(path("/rest/v1/triage_patients"))
        .and(query_param("status", "in.(waiting,completed,noshow)"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([waiting, served, absent])))
        .mount(&server)
        .await;

    let partition = store_for(&server).partition_by_status().await.unwrap();
    assert_eq!(partition.waiting, vec![waiting]);
    assert_eq!(partition.completed, vec![served]);
    assert_eq!(partition.no_shows, vec![absent]);
}

#[tokio::test]
async fn test_server_error_surfaces_as_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/triage_patients"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database offline"))
        .mount(&server)
        .await;

    let result = store_for(&server).partition_by_status().await;
    assert!(result.unwrap_err().to_string().contains("database offline"));
}
