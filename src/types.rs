//! Shared configuration

use serde::{Deserialize, Serialize};

use crate::errors::{check_damping, PageRankError, Result};

/// Default probability of following a link rather than jumping.
pub const DEFAULT_DAMPING: f64 = 0.85;
/// Default number of random-walk steps for the sampler.
pub const DEFAULT_SAMPLES: usize = 10_000;
/// Default per-page convergence threshold for the iterative solver.
pub const DEFAULT_THRESHOLD: f64 = 0.001;
/// Default safety cap on solver sweeps.
pub const DEFAULT_MAX_ITERATIONS: usize = 1_000;

/// Parameters shared by both estimators.
///
/// Deserializes from JSON with every field optional:
///
/// ```json
/// { "damping": 0.9, "samples": 50000, "seed": 7 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RankConfig {
    /// Damping factor in `[0, 1]`
    pub damping: f64,
    /// Random-walk steps taken by the sampler
    pub samples: usize,
    /// Per-page change below which the solver stops
    pub threshold: f64,
    /// Sweep cap for the solver
    pub max_iterations: usize,
    /// Sampler seed; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            samples: DEFAULT_SAMPLES,
            threshold: DEFAULT_THRESHOLD,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            seed: None,
        }
    }
}

impl RankConfig {
    /// Parse a configuration from a JSON document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every parameter range.
    pub fn validate(&self) -> Result<()> {
        check_damping(self.damping)?;
        if self.samples == 0 {
            return Err(PageRankError::InvalidSampleCount);
        }
        check_threshold(self.threshold)?;
        check_max_iterations(self.max_iterations)?;
        Ok(())
    }
}

pub(crate) fn check_threshold(threshold: f64) -> Result<()> {
    if threshold.is_finite() && threshold > 0.0 {
        Ok(())
    } else {
        Err(PageRankError::InvalidThreshold(threshold))
    }
}

pub(crate) fn check_max_iterations(max_iterations: usize) -> Result<()> {
    if max_iterations == 0 {
        Err(PageRankError::InvalidMaxIterations)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = RankConfig::default();
        assert_eq!(cfg.damping, 0.85);
        assert_eq!(cfg.samples, 10_000);
        assert_eq!(cfg.threshold, 0.001);
        assert!(cfg.seed.is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg = RankConfig::from_json_str(r#"{"damping": 0.5, "seed": 42}"#).unwrap();
        assert_eq!(cfg.damping, 0.5);
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.samples, DEFAULT_SAMPLES);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = RankConfig::from_json_str(r#"{"dampng": 0.5}"#).unwrap_err();
        assert!(matches!(err, PageRankError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let err = RankConfig::from_json_str(r#"{"damping": 1.2}"#).unwrap_err();
        assert!(matches!(err, PageRankError::DampingOutOfRange(_)));

        let err = RankConfig::from_json_str(r#"{"samples": 0}"#).unwrap_err();
        assert!(matches!(err, PageRankError::InvalidSampleCount));

        let err = RankConfig::from_json_str(r#"{"max_iterations": 0}"#).unwrap_err();
        assert!(matches!(err, PageRankError::InvalidMaxIterations));
        assert!(err.is_contract_violation());

        let cfg = RankConfig {
            threshold: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(PageRankError::InvalidThreshold(_))
        ));
    }
}
