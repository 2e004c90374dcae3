use serde::{Deserialize, Serialize};

use crate::models::Symptom;

/// Base urgency tier (1 = most urgent) and consultation minutes for a symptom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomProfile {
    pub tier: u8,
    pub base_minutes: u32,
}

impl SymptomProfile {
    pub const fn new(tier: u8, base_minutes: u32) -> Self {
        Self { tier, base_minutes }
    }
}

/// Used for unknown or missing symptoms.
pub const FALLBACK_PROFILE: SymptomProfile = SymptomProfile::new(3, 7);

pub const STANDARD_PROFILES: [(Symptom, SymptomProfile); 9] = [
    (Symptom::ChestPain, SymptomProfile::new(1, 12)),
    (Symptom::Trauma, SymptomProfile::new(1, 15)),
    (Symptom::HighFever, SymptomProfile::new(2, 10)),
    (Symptom::Pregnancy, SymptomProfile::new(2, 12)),
    (Symptom::FeverCold, SymptomProfile::new(3, 7)),
    (Symptom::Stomach, SymptomProfile::new(3, 8)),
    (Symptom::DiabetesBp, SymptomProfile::new(4, 6)),
    (Symptom::Routine, SymptomProfile::new(4, 5)),
    (Symptom::Other, SymptomProfile::new(3, 7)),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymptomTable {
    profiles: Vec<(Symptom, SymptomProfile)>,
    fallback: SymptomProfile,
}

impl SymptomTable {
    pub fn standard() -> Self {
        Self {
            profiles: STANDARD_PROFILES.to_vec(),
            fallback: FALLBACK_PROFILE,
        }
    }

    /// Alternate policy table; symptoms not listed resolve to `fallback`.
    pub fn with_entries(
        profiles: impl IntoIterator<Item = (Symptom, SymptomProfile)>,
        fallback: SymptomProfile,
    ) -> Self {
        Self {
            profiles: profiles.into_iter().collect(),
            fallback,
        }
    }

    pub fn lookup(&self, symptom: Symptom) -> SymptomProfile {
        self.profiles
            .iter()
            .find(|(known, _)| *known == symptom)
            .map(|(_, profile)| *profile)
            .unwrap_or(self.fallback)
    }

    pub fn fallback(&self) -> SymptomProfile {
        self.fallback
    }
}

impl Default for SymptomTable {
    fn default() -> Self {
        Self::standard()
    }
}
