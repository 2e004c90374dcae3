use crate::models::PatientIntake;
use crate::services::symptoms::SymptomTable;

pub const HIGH_RISK_AGE_MINUTES: u32 = 3;
pub const EMERGENCY_MINUTES: u32 = 3;
pub const SEVERE_PAIN_MINUTES: u32 = 2;
pub const SEVERE_PAIN_LEVEL: u8 = 8;

/// Estimated consultation length in minutes. Independent of the urgency
/// score even though both read the same intake.
pub fn estimate_minutes(table: &SymptomTable, intake: &PatientIntake) -> u32 {
    let mut minutes = table.lookup(intake.symptom).base_minutes.max(1);

    if intake.is_high_risk_age() {
        minutes += HIGH_RISK_AGE_MINUTES;
    }
    if intake.arrival_type.is_emergency() {
        minutes += EMERGENCY_MINUTES;
    }
    if intake.effective_pain() >= SEVERE_PAIN_LEVEL {
        minutes += SEVERE_PAIN_MINUTES;
    }

    minutes
}
