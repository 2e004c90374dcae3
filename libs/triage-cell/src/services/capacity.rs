use crate::models::{CapacityReport, PatientRecord};
use crate::policy::CapacityBudget;

pub const CAPACITY_PCT_CAP: u32 = 999;

/// Budget snapshot over the waiting (scheduled) and completed (served)
/// workloads. `capacity_pct` is a display value capped at 999; `overload`
/// carries the real signal.
pub fn capacity_report(
    budget: &CapacityBudget,
    waiting: &[PatientRecord],
    completed: &[PatientRecord],
) -> CapacityReport {
    let scheduled_min = total_minutes(waiting);
    let served_min = total_minutes(completed);
    let total_used = scheduled_min.saturating_add(served_min);

    let buffer_used = total_used.saturating_sub(budget.safe_capacity);
    let buffer_left = budget.buffer_pool.saturating_sub(buffer_used);
    let overload = total_used > budget.hard_limit();
    let overload_mins = total_used.saturating_sub(budget.hard_limit());

    let utilization_pct = if completed.is_empty() {
        0
    } else {
        percent(served_min, budget.safe_capacity).min(100)
    };

    CapacityReport {
        safe_capacity: budget.safe_capacity,
        buffer_pool: budget.buffer_pool,
        total_minutes: budget.total_minutes,
        scheduled_min,
        served_min,
        total_used,
        buffer_used,
        buffer_left,
        buffer_pct: percent(buffer_left, budget.buffer_pool),
        capacity_pct: percent(total_used, budget.safe_capacity).min(CAPACITY_PCT_CAP),
        overload,
        overload_mins,
        utilization_pct,
    }
}

fn total_minutes(patients: &[PatientRecord]) -> u32 {
    patients
        .iter()
        .fold(0u32, |sum, patient| sum.saturating_add(patient.estimated_time))
}

/// Rounded percentage; an empty denominator reads as 0 %.
fn percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    (f64::from(part) / f64::from(whole) * 100.0).round() as u32
}
