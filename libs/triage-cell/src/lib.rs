// =====================================================================================
// TRIAGE CELL - URGENCY SCORING, QUEUE ORDERING & CAPACITY TRACKING
// =====================================================================================
//
// Pure decision engine for walk-in triage:
// - Symptom classification table (tier + base consultation time)
// - Urgency scoring, duration estimation and priority classification
// - Queue ordering with projected waits
// - Daily capacity and buffer reporting
//
// Nothing here performs I/O or holds state between calls.
//
// =====================================================================================

pub mod error;
pub mod models;
pub mod policy;
pub mod services;

pub use error::TriageError;
pub use models::*;
pub use policy::{CapacityBudget, PriorityThresholds, TriagePolicy};
pub use services::TriageEngine;
