use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::TriageError;
use crate::services::intake::{coerce_age, coerce_pain};

// ==============================================================================
// INTAKE
// ==============================================================================

/// Symptom category captured at the front desk. Anything the table does not
/// know becomes `Unrecognized` instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Symptom {
    ChestPain,
    Trauma,
    HighFever,
    Pregnancy,
    FeverCold,
    Stomach,
    DiabetesBp,
    Routine,
    Other,
    Unrecognized,
}

impl Symptom {
    pub const ALL: [Symptom; 9] = [
        Symptom::ChestPain,
        Symptom::Trauma,
        Symptom::HighFever,
        Symptom::Pregnancy,
        Symptom::FeverCold,
        Symptom::Stomach,
        Symptom::DiabetesBp,
        Symptom::Routine,
        Symptom::Other,
    ];

    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Symptom::Unrecognized;
        };

        match raw.trim().to_ascii_lowercase().as_str() {
            "chest_pain" => Symptom::ChestPain,
            "trauma" => Symptom::Trauma,
            "high_fever" => Symptom::HighFever,
            "pregnancy" => Symptom::Pregnancy,
            "fever_cold" => Symptom::FeverCold,
            "stomach" => Symptom::Stomach,
            "diabetes_bp" => Symptom::DiabetesBp,
            "routine" => Symptom::Routine,
            "other" => Symptom::Other,
            _ => Symptom::Unrecognized,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Symptom::ChestPain => "chest_pain",
            Symptom::Trauma => "trauma",
            Symptom::HighFever => "high_fever",
            Symptom::Pregnancy => "pregnancy",
            Symptom::FeverCold => "fever_cold",
            Symptom::Stomach => "stomach",
            Symptom::DiabetesBp => "diabetes_bp",
            Symptom::Routine => "routine",
            Symptom::Other => "other",
            Symptom::Unrecognized => "unrecognized",
        }
    }
}

impl From<String> for Symptom {
    fn from(raw: String) -> Self {
        Symptom::parse(Some(&raw))
    }
}

impl From<Symptom> for String {
    fn from(symptom: Symptom) -> Self {
        symptom.as_str().to_string()
    }
}

impl fmt::Display for Symptom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ArrivalType {
    #[default]
    Routine,
    Emergency,
}

impl ArrivalType {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|value| value.trim().to_ascii_lowercase()) {
            Some(value) if value == "emergency" => ArrivalType::Emergency,
            _ => ArrivalType::Routine,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArrivalType::Routine => "routine",
            ArrivalType::Emergency => "emergency",
        }
    }

    pub fn is_emergency(&self) -> bool {
        matches!(self, ArrivalType::Emergency)
    }
}

impl From<String> for ArrivalType {
    fn from(raw: String) -> Self {
        ArrivalType::parse(Some(&raw))
    }
}

impl From<ArrivalType> for String {
    fn from(arrival: ArrivalType) -> Self {
        arrival.as_str().to_string()
    }
}

/// Normalized intake attributes. `pain` is kept within 1..=10 when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientIntake {
    pub symptom: Symptom,
    /// Free-text symptom as entered, kept when it matched no known category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptom_detail: Option<String>,
    pub age: Option<u32>,
    pub pain: Option<u8>,
    pub arrival_type: ArrivalType,
}

impl PatientIntake {
    pub fn new(symptom: Symptom, age: Option<u32>, pain: Option<u8>, arrival_type: ArrivalType) -> Self {
        Self {
            symptom,
            symptom_detail: None,
            age,
            pain: pain.map(|level| level.clamp(1, 10)),
            arrival_type,
        }
    }

    pub fn with_symptom_detail(mut self, detail: Option<&str>) -> Self {
        self.symptom_detail = detail
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string);
        self
    }

    /// Pain used by scoring and estimation; a missing value counts as 1.
    pub fn effective_pain(&self) -> u8 {
        self.pain.map(|level| level.clamp(1, 10)).unwrap_or(1)
    }

    /// Very young and elderly patients share the same risk bracket.
    pub fn is_high_risk_age(&self) -> bool {
        matches!(self.age, Some(age) if age <= 5 || age >= 65)
    }
}

/// Intake exactly as a client sent it. `age` and `pain` may be numbers,
/// numeric strings or garbage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawIntake {
    pub symptom: Option<String>,
    pub age: Option<Value>,
    pub pain: Option<Value>,
    #[serde(rename = "type", alias = "arrival_type")]
    pub arrival_type: Option<String>,
}

impl From<&RawIntake> for PatientIntake {
    fn from(raw: &RawIntake) -> Self {
        let intake = PatientIntake::new(
            Symptom::parse(raw.symptom.as_deref()),
            raw.age.as_ref().and_then(coerce_age),
            raw.pain.as_ref().and_then(coerce_pain),
            ArrivalType::parse(raw.arrival_type.as_deref()),
        );

        if intake.symptom == Symptom::Unrecognized {
            intake.with_symptom_detail(raw.symptom.as_deref())
        } else {
            intake
        }
    }
}

/// Everything derived from one intake at admission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeAssessment {
    pub urgency_score: u8,
    pub priority_class: PriorityClass,
    pub estimated_time: u32,
}

// ==============================================================================
// PRIORITY & STATUS
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PriorityClass {
    Emergency = 1,
    Severe = 2,
    Moderate = 3,
    Mild = 4,
}

impl PriorityClass {
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriorityClass::Emergency => "Emergency",
            PriorityClass::Severe => "Severe",
            PriorityClass::Moderate => "Moderate",
            PriorityClass::Mild => "Mild",
        }
    }
}

impl TryFrom<u8> for PriorityClass {
    type Error = String;

    fn try_from(rank: u8) -> Result<Self, Self::Error> {
        match rank {
            1 => Ok(PriorityClass::Emergency),
            2 => Ok(PriorityClass::Severe),
            3 => Ok(PriorityClass::Moderate),
            4 => Ok(PriorityClass::Mild),
            other => Err(format!("priority class must be 1-4, got {}", other)),
        }
    }
}

impl From<PriorityClass> for u8 {
    fn from(class: PriorityClass) -> Self {
        class.rank()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatientStatus {
    #[default]
    Waiting,
    Completed,
    NoShow,
}

impl PatientStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatientStatus::Waiting => "waiting",
            PatientStatus::Completed => "completed",
            PatientStatus::NoShow => "noshow",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PatientStatus::Completed | PatientStatus::NoShow)
    }

    pub fn can_transition_to(&self, target: &PatientStatus) -> bool {
        use PatientStatus::*;
        matches!((self, target), (Waiting, Completed) | (Waiting, NoShow))
    }
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==============================================================================
// PATIENT RECORD
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub id: Uuid,
    pub name: Option<String>,
    pub phone: Option<String>,
    #[serde(flatten)]
    pub intake: PatientIntake,
    pub urgency_score: u8,
    pub priority_class: PriorityClass,
    pub estimated_time: u32,
    #[serde(default)]
    pub status: PatientStatus,
    pub arrival_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PatientRecord {
    /// New waiting record carrying the assessment computed at intake.
    pub fn admit(
        intake: PatientIntake,
        assessment: IntakeAssessment,
        arrival_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: None,
            phone: None,
            intake,
            urgency_score: assessment.urgency_score,
            priority_class: assessment.priority_class,
            estimated_time: assessment.estimated_time,
            status: PatientStatus::Waiting,
            arrival_time,
            created_at: arrival_time,
            updated_at: arrival_time,
        }
    }

    pub fn with_contact(mut self, name: Option<String>, phone: Option<String>) -> Self {
        self.name = name;
        self.phone = phone;
        self
    }

    pub fn is_waiting(&self) -> bool {
        self.status == PatientStatus::Waiting
    }

    pub fn complete(&mut self) -> Result<(), TriageError> {
        self.transition_to(PatientStatus::Completed)
    }

    pub fn mark_no_show(&mut self) -> Result<(), TriageError> {
        self.transition_to(PatientStatus::NoShow)
    }

    /// Front-desk override: forces maximum urgency without rescoring.
    /// Estimated time is left as assessed at intake.
    pub fn upgrade_to_emergency(&mut self) -> Result<(), TriageError> {
        if !self.is_waiting() {
            return Err(TriageError::UpgradeNotAllowed { status: self.status });
        }

        self.intake.arrival_type = ArrivalType::Emergency;
        self.urgency_score = 100;
        self.priority_class = PriorityClass::Emergency;
        self.updated_at = Utc::now();
        Ok(())
    }

    fn transition_to(&mut self, target: PatientStatus) -> Result<(), TriageError> {
        if !self.status.can_transition_to(&target) {
            return Err(TriageError::InvalidStatusTransition {
                from: self.status,
                to: target,
            });
        }

        self.status = target;
        self.updated_at = Utc::now();
        Ok(())
    }
}

// ==============================================================================
// ENGINE OUTPUTS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueEntry {
    #[serde(flatten)]
    pub patient: PatientRecord,
    pub position: usize,
    pub wait_mins: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityReport {
    pub safe_capacity: u32,
    pub buffer_pool: u32,
    pub total_minutes: u32,
    pub scheduled_min: u32,
    pub served_min: u32,
    pub total_used: u32,
    pub buffer_used: u32,
    pub buffer_left: u32,
    pub buffer_pct: u32,
    pub capacity_pct: u32,
    pub overload: bool,
    pub overload_mins: u32,
    pub utilization_pct: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStats {
    pub in_queue: usize,
    pub emergency: usize,
    pub served: usize,
    pub avg_wait: u32,
    pub no_shows: usize,
}

/// Read-only view handed to the queue screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueSnapshot {
    pub queue: Vec<QueueEntry>,
    pub stats: QueueStats,
    pub capacity: CapacityReport,
}
