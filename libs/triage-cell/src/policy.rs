use serde::{Deserialize, Serialize};

use shared_config::TriageSettings;

/// Lower score bounds of priority classes 1-3; anything below class 3 is class 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityThresholds {
    pub emergency: u8,
    pub severe: u8,
    pub moderate: u8,
}

impl Default for PriorityThresholds {
    fn default() -> Self {
        Self {
            emergency: 70,
            severe: 50,
            moderate: 30,
        }
    }
}

/// Daily time budget split into safe capacity and a reserve buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityBudget {
    pub total_minutes: u32,
    pub safe_capacity: u32,
    pub buffer_pool: u32,
}

impl CapacityBudget {
    pub fn new(total_minutes: u32, buffer_percent: u32) -> Self {
        let safe_capacity =
            (u64::from(total_minutes) * u64::from(100 - buffer_percent.min(100)) / 100) as u32;
        Self {
            total_minutes,
            safe_capacity,
            buffer_pool: total_minutes - safe_capacity,
        }
    }

    /// Minutes that can be committed before the day is overloaded.
    pub fn hard_limit(&self) -> u32 {
        self.safe_capacity + self.buffer_pool
    }
}

impl Default for CapacityBudget {
    fn default() -> Self {
        Self::new(480, 15)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TriagePolicy {
    pub thresholds: PriorityThresholds,
    pub budget: CapacityBudget,
}

impl TriagePolicy {
    /// Settings are expected to be validated by `shared-config`; inconsistent
    /// values fall back to the defaults.
    pub fn from_settings(settings: &TriageSettings) -> Self {
        if settings.validate().is_err() {
            return Self::default();
        }

        Self {
            thresholds: PriorityThresholds {
                emergency: settings.class1_min_score as u8,
                severe: settings.class2_min_score as u8,
                moderate: settings.class3_min_score as u8,
            },
            budget: CapacityBudget::new(settings.total_minutes, settings.buffer_percent),
        }
    }
}

impl From<&TriageSettings> for TriagePolicy {
    fn from(settings: &TriageSettings) -> Self {
        Self::from_settings(settings)
    }
}
