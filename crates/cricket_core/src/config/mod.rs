//! # Scoring configuration
//!
//! Rule knobs for the engine. Defaults reproduce the behaviour scorers
//! already rely on; `strict_laws()` switches to the Laws of Cricket where
//! the two differ.
//!
//! ```rust
//! use cricket_core::config::ScoringConfig;
//!
//! let config = ScoringConfig::default();
//! assert!(config.credit_run_out_to_bowler);
//! let strict = ScoringConfig::strict_laws();
//! assert!(!strict.allow_consecutive_overs);
//! ```

mod env;

pub use env::{config_from_env, SCORING_CONFIG_PATH_ENV};

use crate::engine::rules::DEFAULT_ALL_OUT_WICKETS;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Wickets that end an innings (capped by roster size − 1). (default: 10)
    pub all_out_wickets: u32,
    /// Credit the bowler with run-out dismissals. (default: true)
    pub credit_run_out_to_bowler: bool,
    /// Allow the bowler of the previous over to bowl the next one. (default: true)
    pub allow_consecutive_overs: bool,
    /// Number of most recent events carried in a snapshot. (default: 6)
    pub snapshot_recent_events: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            all_out_wickets: DEFAULT_ALL_OUT_WICKETS,
            credit_run_out_to_bowler: true,
            allow_consecutive_overs: true,
            snapshot_recent_events: 6,
        }
    }
}

impl ScoringConfig {
    /// Scoring as observed in club software: run-outs credited to the
    /// bowler, consecutive overs allowed.
    pub fn standard() -> Self {
        Self::default()
    }

    /// Run-outs are not bowler wickets and no bowler may bowl consecutive overs.
    pub fn strict_laws() -> Self {
        Self { credit_run_out_to_bowler: false, allow_consecutive_overs: false, ..Self::default() }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.all_out_wickets == 0 {
            return Err("all_out_wickets must be at least 1".to_string());
        }
        if self.all_out_wickets > DEFAULT_ALL_OUT_WICKETS {
            return Err(format!(
                "all_out_wickets must not exceed {}, got {}",
                DEFAULT_ALL_OUT_WICKETS, self.all_out_wickets
            ));
        }
        Ok(())
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = ScoringConfig::from_yaml("allow_consecutive_overs: false\n").unwrap();
        assert!(!config.allow_consecutive_overs);
        assert_eq!(config.all_out_wickets, 10);
        assert!(config.credit_run_out_to_bowler);
    }

    #[test]
    fn test_json_and_validation() {
        let config = ScoringConfig::from_json(r#"{"all_out_wickets": 0}"#).unwrap();
        assert!(config.validate().is_err());

        let config = ScoringConfig::from_json(r#"{"all_out_wickets": 11}"#).unwrap();
        assert!(config.validate().is_err());

        assert!(ScoringConfig::strict_laws().validate().is_ok());
    }

    #[test]
    fn test_presets_differ_only_in_law_knobs() {
        let standard = ScoringConfig::standard();
        let strict = ScoringConfig::strict_laws();
        assert_eq!(standard, ScoringConfig::default());
        assert!(standard.allow_consecutive_overs && !strict.allow_consecutive_overs);
        assert_eq!(standard.all_out_wickets, strict.all_out_wickets);
    }
}
