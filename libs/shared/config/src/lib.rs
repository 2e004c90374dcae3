use std::env;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub patients_table: String,
    pub triage: TriageSettings,
}

/// Upper bound on the configurable budget; keeps capacity arithmetic well inside `u32`.
pub const MAX_TOTAL_MINUTES: u32 = 1_000_000;

/// Policy numbers used by the triage engine. Whole-percent buffer so the
/// safe capacity is an exact integer floor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriageSettings {
    pub total_minutes: u32,
    pub buffer_percent: u32,
    pub class1_min_score: u32,
    pub class2_min_score: u32,
    pub class3_min_score: u32,
}

impl Default for TriageSettings {
    fn default() -> Self {
        Self {
            total_minutes: 480,
            buffer_percent: 15,
            class1_min_score: 70,
            class2_min_score: 50,
            class3_min_score: 30,
        }
    }
}

impl TriageSettings {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let settings = Self {
            total_minutes: parse_var("TRIAGE_TOTAL_MINUTES", defaults.total_minutes),
            buffer_percent: parse_var("TRIAGE_BUFFER_PERCENT", defaults.buffer_percent),
            class1_min_score: parse_var("TRIAGE_CLASS1_MIN_SCORE", defaults.class1_min_score),
            class2_min_score: parse_var("TRIAGE_CLASS2_MIN_SCORE", defaults.class2_min_score),
            class3_min_score: parse_var("TRIAGE_CLASS3_MIN_SCORE", defaults.class3_min_score),
        };

        if let Err(reason) = settings.validate() {
            warn!("Invalid triage settings ({}), using defaults", reason);
            return defaults;
        }

        settings
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.total_minutes == 0 {
            return Err("total minutes must be positive".to_string());
        }
        if self.total_minutes > MAX_TOTAL_MINUTES {
            return Err(format!(
                "total minutes {} exceeds {}",
                self.total_minutes, MAX_TOTAL_MINUTES
            ));
        }
        if self.buffer_percent >= 100 {
            return Err(format!("buffer percent {} must be below 100", self.buffer_percent));
        }
        if self.safe_capacity() == 0 || self.buffer_pool() == 0 {
            return Err("safe capacity and buffer pool must both be positive".to_string());
        }
        if self.class1_min_score > 100 {
            return Err(format!("class 1 threshold {} exceeds 100", self.class1_min_score));
        }
        if !(self.class1_min_score > self.class2_min_score
            && self.class2_min_score > self.class3_min_score)
        {
            return Err("score thresholds must be strictly descending".to_string());
        }
        Ok(())
    }

    pub fn safe_capacity(&self) -> u32 {
        let kept = u64::from(self.total_minutes) * u64::from(100 - self.buffer_percent.min(100)) / 100;
        kept as u32
    }

    pub fn buffer_pool(&self) -> u32 {
        self.total_minutes - self.safe_capacity()
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            port: parse_var("PORT", 3000),
            supabase_url: env::var("SUPABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_URL not set, using empty value");
                    String::new()
                }),
            supabase_anon_key: env::var("SUPABASE_ANON_PUBLIC_KEY")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_ANON_PUBLIC_KEY not set, using empty value");
                    String::new()
                }),
            patients_table: env::var("TRIAGE_PATIENTS_TABLE")
                .unwrap_or_else(|_| "triage_patients".to_string()),
            triage: TriageSettings::from_env(),
        };

        if !config.is_supabase_configured() {
            warn!("Supabase not configured - patients will be kept in memory");
        }

        config
    }

    pub fn is_supabase_configured(&self) -> bool {
        !self.supabase_url.is_empty() && !self.supabase_anon_key.is_empty()
    }
}

fn parse_var<T: FromStr + Copy + std::fmt::Display>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value {:?}, using default {}", name, raw, default);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_match_daily_budget() {
        let settings = TriageSettings::default();

        assert_eq!(settings.safe_capacity(), 408);
        assert_eq!(settings.buffer_pool(), 72);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_rejects_full_buffer() {
        let settings = TriageSettings { buffer_percent: 100, ..TriageSettings::default() };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_unordered_thresholds() {
        let settings = TriageSettings {
            class2_min_score: 80,
            ..TriageSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_oversized_budget_without_overflow() {
        let settings = TriageSettings { total_minutes: 60_000_000, ..TriageSettings::default() };

        assert_eq!(settings.safe_capacity(), 51_000_000);
        assert_eq!(settings.buffer_pool(), 9_000_000);
        assert!(settings.validate().is_err());

        let largest = TriageSettings { total_minutes: MAX_TOTAL_MINUTES, ..TriageSettings::default() };
        assert!(largest.validate().is_ok());
    }

    #[test]
    fn test_extreme_budget_keeps_capacity_in_range() {
        let settings = TriageSettings { total_minutes: u32::MAX, buffer_percent: 1, ..TriageSettings::default() };

        assert_eq!(settings.safe_capacity() + settings.buffer_pool(), u32::MAX);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_budget() {
        let settings = TriageSettings { total_minutes: 0, ..TriageSettings::default() };
        assert!(settings.validate().is_err());
    }
}
