//! Configuration for a stepwise session
//!
//! Loaded from TOML; every section and field is optional:
//!
//! ```toml
//! log_filter = "stepwise=debug"
//!
//! [playback]
//! base_delay_ms = 800
//! default_speed = 3
//!
//! [problem]
//! algorithm = "binary-search"
//! size = 12
//! seed = 7
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use stepwise_algorithms::{AlgorithmKind, DEFAULT_VALUE_RANGE, MAX_VALUE_MAGNITUDE};
use stepwise_playback::PlaybackConfig;

/// Seed used when none is configured
pub const DEFAULT_SEED: u64 = 42;

/// Which problem a fresh session starts on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProblemConfig {
    /// Algorithm selected at start-up
    pub algorithm: AlgorithmKind,
    /// Problem size; the algorithm's default when absent
    pub size: Option<usize>,
    /// Generator seed
    pub seed: u64,
    /// Smallest generated array value
    pub value_min: i64,
    /// Largest generated array value
    pub value_max: i64,
}

impl Default for ProblemConfig {
    fn default() -> Self {
        Self {
            algorithm: AlgorithmKind::BubbleSort,
            size: None,
            seed: DEFAULT_SEED,
            value_min: *DEFAULT_VALUE_RANGE.start(),
            value_max: *DEFAULT_VALUE_RANGE.end(),
        }
    }
}

impl ProblemConfig {
    /// Size to use for the configured algorithm
    #[must_use]
    pub fn effective_size(&self) -> usize {
        self.size.unwrap_or(self.algorithm.size_limits().default)
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepwiseConfig {
    /// Timer and speed settings
    pub playback: PlaybackConfig,
    /// Start-up problem
    pub problem: ProblemConfig,
    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for StepwiseConfig {
    fn default() -> Self {
        Self {
            playback: PlaybackConfig::default(),
            problem: ProblemConfig::default(),
            log_filter: "stepwise=info,warn".to_string(),
        }
    }
}

impl StepwiseConfig {
    /// Default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse TOML text
    ///
    /// # Errors
    /// [`ConfigError::Parse`] on malformed or mistyped input
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a TOML file
    ///
    /// # Errors
    /// [`ConfigError::Io`] if the file cannot be read, else as [`Self::from_toml_str`]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Replace the playback section
    #[must_use]
    pub fn with_playback(mut self, playback: PlaybackConfig) -> Self {
        self.playback = playback;
        self
    }

    /// Select the start-up algorithm
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: AlgorithmKind) -> Self {
        self.problem.algorithm = algorithm;
        self
    }

    /// Set the start-up problem size
    #[must_use]
    pub fn with_size(mut self, size: usize) -> Self {
        self.problem.size = Some(size);
        self
    }

    /// Set the generator seed
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.problem.seed = seed;
        self
    }

    /// Set the starting speed
    #[must_use]
    pub fn with_speed(mut self, speed: u8) -> Self {
        self.playback.default_speed = speed;
        self
    }

    /// Check every section
    ///
    /// # Errors
    /// The first inconsistency found
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.playback.validate()?;

        let problem = &self.problem;
        if problem.value_min > problem.value_max {
            return Err(ConfigError::Invalid(format!(
                "value range {}..={} is empty",
                problem.value_min, problem.value_max
            )));
        }
        for bound in [problem.value_min, problem.value_max] {
            if bound.unsigned_abs() > MAX_VALUE_MAGNITUDE.unsigned_abs() {
                return Err(ConfigError::Invalid(format!(
                    "value bound {bound} outside -{MAX_VALUE_MAGNITUDE}..={MAX_VALUE_MAGNITUDE}"
                )));
            }
        }
        let limits = problem.algorithm.size_limits();
        let size = problem.effective_size();
        if !limits.contains(size) {
            return Err(ConfigError::Invalid(format!(
                "size {size} out of range for {} (expected {limits})",
                problem.algorithm
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config = StepwiseConfig::from_toml_str("").unwrap();
        assert_eq!(config, StepwiseConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_sections_fill_in_defaults() {
        let config = StepwiseConfig::from_toml_str(
            r#"
            [playback]
            default_speed = 3

            [problem]
            algorithm = "binary-search"
            seed = 7
            "#,
        )
        .unwrap();
        assert_eq!(config.playback.default_speed, 3);
        assert_eq!(config.playback.base_delay_ms, 1000);
        assert_eq!(config.problem.algorithm, AlgorithmKind::BinarySearch);
        assert_eq!(config.problem.seed, 7);
        assert_eq!(config.problem.effective_size(), 15);
    }

    #[test]
    fn unknown_algorithm_is_a_parse_error() {
        let err = StepwiseConfig::from_toml_str("[problem]\nalgorithm = \"bogo-sort\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn validate_rejects_oversized_problem() {
        let config = StepwiseConfig::new().with_algorithm(AlgorithmKind::Fibonacci).with_size(31);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn validate_rejects_unbounded_value_range() {
        let config = StepwiseConfig::from_toml_str(
            "[problem]\nalgorithm = \"two-sum\"\nvalue_max = 9223372036854775807",
        )
        .unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = StepwiseConfig::new();
        config.problem.value_min = -MAX_VALUE_MAGNITUDE;
        config.problem.value_max = MAX_VALUE_MAGNITUDE;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_speed() {
        let config = StepwiseConfig::new().with_speed(0);
        assert!(matches!(config.validate(), Err(ConfigError::Playback(_))));
    }
}
