use crate::models::PatientIntake;
use crate::services::symptoms::SymptomTable;

pub const MAX_SCORE: u32 = 100;
pub const EMERGENCY_BONUS: u32 = 50;
pub const HIGH_RISK_AGE_BONUS: u32 = 15;
pub const OLDER_ADULT_AGE_BONUS: u32 = 8;

/// Urgency score in 0..=100. Contributions are additive and non-negative,
/// so only the upper bound needs clamping.
pub fn score(table: &SymptomTable, intake: &PatientIntake) -> u8 {
    let profile = table.lookup(intake.symptom);

    let tier_points = 5u32.saturating_sub(u32::from(profile.tier)) * 25;
    let arrival_points = if intake.arrival_type.is_emergency() {
        EMERGENCY_BONUS
    } else {
        0
    };
    let pain_points = u32::from(intake.effective_pain()) * 2;

    let total = tier_points + arrival_points + age_points(intake) + pain_points;
    total.min(MAX_SCORE) as u8
}

/// First matching bracket wins: infants and seniors before older adults.
fn age_points(intake: &PatientIntake) -> u32 {
    match intake.age {
        Some(_) if intake.is_high_risk_age() => HIGH_RISK_AGE_BONUS,
        Some(age) if age >= 50 => OLDER_ADULT_AGE_BONUS,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArrivalType, Symptom};

    fn intake(symptom: Symptom, age: Option<u32>, pain: Option<u8>, arrival: ArrivalType) -> PatientIntake {
        PatientIntake::new(symptom, age, pain, arrival)
    }

    #[test]
    fn test_routine_adult() {
        let table = SymptomTable::standard();
        // tier 3 -> 50, pain 4 -> 8
        let value = score(&table, &intake(Symptom::FeverCold, Some(30), Some(4), ArrivalType::Routine));
        assert_eq!(value, 58);
    }

    #[test]
    fn test_low_tier_with_senior_bonus() {
        let table = SymptomTable::standard();
        // tier 4 -> 25, age 70 -> 15, pain 2 -> 4
        let value = score(&table, &intake(Symptom::DiabetesBp, Some(70), Some(2), ArrivalType::Routine));
        assert_eq!(value, 44);
    }

    #[test]
    fn test_older_adult_bracket() {
        let table = SymptomTable::standard();
        // tier 4 -> 25, age 55 -> 8, pain 1 -> 2
        let value = score(&table, &intake(Symptom::Routine, Some(55), None, ArrivalType::Routine));
        assert_eq!(value, 35);
    }

    #[test]
    fn test_infant_gets_high_risk_bonus() {
        let table = SymptomTable::standard();
        let value = score(&table, &intake(Symptom::Routine, Some(3), Some(1), ArrivalType::Routine));
        assert_eq!(value, 25 + 15 + 2);
    }

    #[test]
    fn test_emergency_tier_one_is_capped() {
        let table = SymptomTable::standard();
        let value = score(&table, &intake(Symptom::ChestPain, Some(80), Some(10), ArrivalType::Emergency));
        assert_eq!(value, 100);
    }

    #[test]
    fn test_unknown_age_and_pain_defaults() {
        let table = SymptomTable::standard();
        // fallback tier 3 -> 50, pain default 1 -> 2
        let value = score(&table, &intake(Symptom::Unrecognized, None, None, ArrivalType::Routine));
        assert_eq!(value, 52);
    }
}
