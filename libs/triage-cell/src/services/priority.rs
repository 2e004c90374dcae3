use crate::models::PriorityClass;
use crate::policy::PriorityThresholds;

/// Maps a score to its class. Thresholds are checked from most urgent down,
/// so a boundary value lands in the more urgent class.
pub fn classify(thresholds: &PriorityThresholds, score: u8) -> PriorityClass {
    if score >= thresholds.emergency {
        PriorityClass::Emergency
    } else if score >= thresholds.severe {
        PriorityClass::Severe
    } else if score >= thresholds.moderate {
        PriorityClass::Moderate
    } else {
        PriorityClass::Mild
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        let thresholds = PriorityThresholds::default();
        let cases = [
            (100, 1), (70, 1), (69, 2), (50, 2), (49, 3),
            (30, 3), (29, 4), (0, 4),
        ];

        for (score, expected) in cases {
            assert_eq!(
                classify(&thresholds, score).rank(), expected,
                "score {} should be class {}", score, expected
            );
        }
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = PriorityThresholds { emergency: 90, severe: 60, moderate: 20 };
        assert_eq!(classify(&thresholds, 89), PriorityClass::Severe);
        assert_eq!(classify(&thresholds, 20), PriorityClass::Moderate);
        assert_eq!(classify(&thresholds, 19), PriorityClass::Mild);
    }
}
