use tracing::debug;

use shared_config::TriageSettings;

use crate::models::{
    CapacityReport, IntakeAssessment, PatientIntake, PatientRecord, PriorityClass,
    QueueEntry, QueueSnapshot, QueueStats,
};
use crate::policy::TriagePolicy;
use crate::services::{capacity, duration, priority, queue, symptoms::SymptomTable, urgency};

/// Entry point for intake and queue-view callers. Holds only immutable
/// policy, so one instance can be shared freely across requests.
#[derive(Debug, Clone, Default)]
pub struct TriageEngine {
    symptoms: SymptomTable,
    policy: TriagePolicy,
}

impl TriageEngine {
    pub fn new(policy: TriagePolicy) -> Self {
        Self {
            symptoms: SymptomTable::standard(),
            policy,
        }
    }

    pub fn from_settings(settings: &TriageSettings) -> Self {
        Self::new(TriagePolicy::from_settings(settings))
    }

    pub fn with_symptom_table(mut self, symptoms: SymptomTable) -> Self {
        self.symptoms = symptoms;
        self
    }

    pub fn policy(&self) -> &TriagePolicy {
        &self.policy
    }

    pub fn symptoms(&self) -> &SymptomTable {
        &self.symptoms
    }

    // ==============================================================================
    // INTAKE
    // ==============================================================================

    pub fn score(&self, intake: &PatientIntake) -> u8 {
        urgency::score(&self.symptoms, intake)
    }

    pub fn estimate_minutes(&self, intake: &PatientIntake) -> u32 {
        duration::estimate_minutes(&self.symptoms, intake)
    }

    pub fn classify(&self, score: u8) -> PriorityClass {
        priority::classify(&self.policy.thresholds, score)
    }

    /// Runs scorer, estimator and classifier for a new patient.
    pub fn assess(&self, intake: &PatientIntake) -> IntakeAssessment {
        let urgency_score = self.score(intake);
        let assessment = IntakeAssessment {
            urgency_score,
            priority_class: self.classify(urgency_score),
            estimated_time: self.estimate_minutes(intake),
        };

        debug!(
            symptom = %intake.symptom,
            arrival = intake.arrival_type.as_str(),
            score = assessment.urgency_score,
            class = assessment.priority_class.rank(),
            minutes = assessment.estimated_time,
            "Assessed intake"
        );

        assessment
    }

    // ==============================================================================
    // QUEUE VIEW
    // ==============================================================================

    pub fn build_queue(&self, waiting: &[PatientRecord]) -> Vec<QueueEntry> {
        queue::build_queue(waiting)
    }

    pub fn capacity_report(
        &self,
        waiting: &[PatientRecord],
        completed: &[PatientRecord],
    ) -> CapacityReport {
        capacity::capacity_report(&self.policy.budget, waiting, completed)
    }

    /// Queue, capacity and headline counts for one consistent set of records.
    pub fn snapshot(
        &self,
        waiting: &[PatientRecord],
        completed: &[PatientRecord],
        no_shows: &[PatientRecord],
    ) -> QueueSnapshot {
        let queue = self.build_queue(waiting);
        let capacity = self.capacity_report(waiting, completed);

        let total_wait: u64 = queue.iter().map(|entry| u64::from(entry.wait_mins)).sum();
        let avg_wait = if queue.is_empty() {
            0
        } else {
            (total_wait as f64 / queue.len() as f64).round() as u32
        };

        let stats = QueueStats {
            in_queue: waiting.len(),
            emergency: waiting
                .iter()
                .filter(|patient| patient.priority_class == PriorityClass::Emergency)
                .count(),
            served: completed.len(),
            avg_wait,
            no_shows: no_shows.len(),
        };

        debug!(
            in_queue = stats.in_queue,
            total_used = capacity.total_used,
            overload = capacity.overload,
            "Built queue snapshot"
        );

        QueueSnapshot { queue, stats, capacity }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArrivalType, Symptom};
    use crate::services::symptoms::SymptomProfile;
    use chrono::{Duration, Utc};

    fn admit(engine: &TriageEngine, intake: PatientIntake, offset_mins: i64) -> PatientRecord {
        let assessment = engine.assess(&intake);
        PatientRecord::admit(intake, assessment, Utc::now() + Duration::minutes(offset_mins))
    }

    #[test]
    fn test_assess_chest_pain_emergency() {
        let engine = TriageEngine::default();
        let intake = PatientIntake::new(Symptom::ChestPain, Some(45), Some(6), ArrivalType::Emergency);

        let assessment = engine.assess(&intake);
        assert_eq!(assessment.urgency_score, 100);
        assert_eq!(assessment.priority_class, PriorityClass::Emergency);
        assert_eq!(assessment.estimated_time, 15);
    }

    #[test]
    fn test_assess_routine_checkup() {
        let engine = TriageEngine::default();
        let intake = PatientIntake::new(Symptom::Routine, Some(30), Some(1), ArrivalType::Routine);

        let assessment = engine.assess(&intake);
        assert_eq!(assessment.urgency_score, 27);
        assert_eq!(assessment.priority_class, PriorityClass::Mild);
        assert_eq!(assessment.estimated_time, 5);
    }

    #[test]
    fn test_custom_symptom_table_changes_scores() {
        let engine = TriageEngine::default().with_symptom_table(SymptomTable::with_entries(
            [(Symptom::Routine, SymptomProfile::new(1, 30))],
            SymptomProfile::new(4, 5),
        ));
        let intake = PatientIntake::new(Symptom::Routine, Some(30), None, ArrivalType::Routine);

        assert_eq!(engine.score(&intake), 100);
        assert_eq!(engine.estimate_minutes(&intake), 30);
    }

    #[test]
    fn test_snapshot_stats() {
        let engine = TriageEngine::default();
        let waiting = vec![
            admit(&engine, PatientIntake::new(Symptom::Trauma, Some(40), Some(9), ArrivalType::Emergency), 0),
            admit(&engine, PatientIntake::new(Symptom::Stomach, Some(30), Some(3), ArrivalType::Routine), 1),
            admit(&engine, PatientIntake::new(Symptom::Routine, Some(30), None, ArrivalType::Routine), 2),
        ];
        let completed = vec![admit(&engine, PatientIntake::new(Symptom::FeverCold, None, None, ArrivalType::Routine), -30)];
        let no_shows = vec![admit(&engine, PatientIntake::new(Symptom::Other, None, None, ArrivalType::Routine), -20)];

        let snapshot = engine.snapshot(&waiting, &completed, &no_shows);

        assert_eq!(snapshot.stats.in_queue, 3);
        assert_eq!(snapshot.stats.emergency, 1);
        assert_eq!(snapshot.stats.served, 1);
        assert_eq!(snapshot.stats.no_shows, 1);
        // trauma 20 min, then stomach 8 min: waits 0, 20, 28
        assert_eq!(snapshot.stats.avg_wait, 16);
        assert_eq!(snapshot.capacity.scheduled_min, 20 + 8 + 5);
        assert_eq!(snapshot.capacity.served_min, 7);
    }

    #[test]
    fn test_snapshot_of_empty_day() {
        let snapshot = TriageEngine::default().snapshot(&[], &[], &[]);
        assert!(snapshot.queue.is_empty());
        assert_eq!(snapshot.stats.avg_wait, 0);
        assert_eq!(snapshot.capacity.buffer_pct, 100);
    }
}
