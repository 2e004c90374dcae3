pub mod capacity;
pub mod duration;
pub mod engine;
pub mod intake;
pub mod priority;
pub mod queue;
pub mod symptoms;
pub mod urgency;

pub use capacity::capacity_report;
pub use duration::estimate_minutes;
pub use engine::TriageEngine;
pub use priority::classify;
pub use queue::build_queue;
pub use symptoms::{SymptomProfile, SymptomTable};
pub use urgency::score;
