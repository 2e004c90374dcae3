use std::cmp::Ordering;

use crate::models::{PatientRecord, QueueEntry};

/// Orders waiting patients by urgency (highest first), then arrival (earliest
/// first). The sort is stable, so remaining ties keep their input order.
///
/// `wait_mins` is the projected delay for a single clinician serving the
/// queue in order: the sum of every earlier entry's estimated time.
pub fn build_queue(waiting: &[PatientRecord]) -> Vec<QueueEntry> {
    let mut ordered: Vec<&PatientRecord> = waiting.iter().collect();
    ordered.sort_by(|a, b| queue_order(a, b));

    let mut elapsed = 0u32;
    ordered
        .into_iter()
        .enumerate()
        .map(|(index, patient)| {
            let entry = QueueEntry {
                patient: patient.clone(),
                position: index + 1,
                wait_mins: elapsed,
            };
            elapsed = elapsed.saturating_add(patient.estimated_time);
            entry
        })
        .collect()
}

fn queue_order(a: &PatientRecord, b: &PatientRecord) -> Ordering {
    b.urgency_score
        .cmp(&a.urgency_score)
        .then_with(|| a.arrival_time.cmp(&b.arrival_time))
}
