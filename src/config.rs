//! Hyperparameters for a gradient descent run.
//!
//! A [`TrainerConfig`] can be built in code with the chained setters or
//! loaded from a TOML file with a `[trainer]` table. Keys missing from the
//! file keep their default values.
//!
//! ```toml
//! [trainer]
//! n_samples = 100
//! n_features = 5
//! max_iterations = 10000
//! l2_lambda = 0.01
//! clip_limit = 1.0
//! convergence_threshold = 1e-6
//! log_interval = 100
//! init = { kind = "uniform", low = -0.1, high = 0.1 }
//! seed = 42
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// How weights are initialized at the start of a run. The bias always starts at zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WeightInit {
    #[default]
    Zeros,
    /// Independent samples from `[low, high)`, drawn from an RNG seeded with `TrainerConfig::seed`.
    Uniform { low: f64, high: f64 },
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// Number of rows (N) in the training set.
    pub n_samples: usize,
    /// Number of columns (F) per row.
    pub n_features: usize,
    pub max_iterations: usize,
    /// L2 strength applied to the weights, never to the bias.
    pub l2_lambda: f64,
    /// Weight gradients are clamped to `[-clip_limit, clip_limit]`.
    pub clip_limit: f64,
    pub convergence_threshold: f64,
    /// Iterations between cost checkpoints. Progress logging and the
    /// convergence check both run on this cadence.
    pub log_interval: usize,
    pub init: WeightInit,
    pub seed: u64,
}

#[derive(Deserialize)]
struct ConfigFile {
    #[serde(default)]
    trainer: TrainerConfig,
}

impl TrainerConfig {
    pub fn new(n_samples: usize, n_features: usize) -> Self {
        Self::default().n_samples(n_samples).n_features(n_features)
    }

    pub fn n_samples(mut self, n_samples: usize) -> Self {
        if n_samples == 0 {
            panic!("n_samples must be at least 1");
        }
        self.n_samples = n_samples;
        self
    }

    pub fn n_features(mut self, n_features: usize) -> Self {
        if n_features == 0 {
            panic!("n_features must be at least 1");
        }
        self.n_features = n_features;
        self
    }

    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn l2_lambda(mut self, l2_lambda: f64) -> Self {
        if !(l2_lambda >= 0.0) {
            panic!("l2_lambda must be non-negative, got {}", l2_lambda);
        }
        self.l2_lambda = l2_lambda;
        self
    }

    pub fn clip_limit(mut self, clip_limit: f64) -> Self {
        if !(clip_limit > 0.0) {
            panic!("clip_limit must be positive, got {}", clip_limit);
        }
        self.clip_limit = clip_limit;
        self
    }

    pub fn convergence_threshold(mut self, convergence_threshold: f64) -> Self {
        if !(convergence_threshold >= 0.0) {
            panic!(
                "convergence_threshold must be non-negative, got {}",
                convergence_threshold
            );
        }
        self.convergence_threshold = convergence_threshold;
        self
    }

    pub fn log_interval(mut self, log_interval: usize) -> Self {
        if log_interval == 0 {
            panic!("log_interval must be at least 1");
        }
        self.log_interval = log_interval;
        self
    }

    pub fn init(mut self, init: WeightInit) -> Self {
        if let WeightInit::Uniform { low, high } = init {
            if !(low < high) || !low.is_finite() || !high.is_finite() {
                panic!("uniform init needs finite low < high, got [{}, {})", low, high);
            }
        }
        self.init = init;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Expected length of a flattened feature buffer (`N * F`).
    pub fn feature_len(&self) -> usize {
        self.n_samples * self.n_features
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(&path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(toml_str)?;
        file.trainer.validate()?;
        Ok(file.trainer)
    }

    /// Checks the same constraints the setters enforce, without panicking.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_samples == 0 {
            return Err(ConfigError::Invalid("n_samples must be at least 1".to_string()));
        }
        if self.n_features == 0 {
            return Err(ConfigError::Invalid("n_features must be at least 1".to_string()));
        }
        if !(self.l2_lambda >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "l2_lambda must be non-negative, got {}",
                self.l2_lambda
            )));
        }
        if !(self.clip_limit > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "clip_limit must be positive, got {}",
                self.clip_limit
            )));
        }
        if !(self.convergence_threshold >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "convergence_threshold must be non-negative, got {}",
                self.convergence_threshold
            )));
        }
        if self.log_interval == 0 {
            return Err(ConfigError::Invalid("log_interval must be at least 1".to_string()));
        }
        if let WeightInit::Uniform { low, high } = self.init {
            if !(low < high) || !low.is_finite() || !high.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "uniform init needs finite low < high, got [{}, {})",
                    low, high
                )));
            }
        }
        Ok(())
    }
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            n_samples: 100,
            n_features: 5,
            max_iterations: 10_000,
            l2_lambda: 0.01,
            clip_limit: 1.0,
            convergence_threshold: 1e-6,
            log_interval: 100,
            init: WeightInit::Zeros,
            seed: 42,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrainerConfig::default();
        assert_eq!(config.n_samples, 100);
        assert_eq!(config.n_features, 5);
        assert_eq!(config.max_iterations, 10_000);
        assert_eq!(config.log_interval, 100);
        assert_eq!(config.init, WeightInit::Zeros);
        assert_eq!(config.feature_len(), 500);
    }

    #[test]
    fn test_builder_overrides() {
        let config = TrainerConfig::new(5, 1)
            .l2_lambda(0.0)
            .clip_limit(f64::INFINITY)
            .max_iterations(250)
            .init(WeightInit::Uniform { low: -0.1, high: 0.1 });

        assert_eq!(config.n_samples, 5);
        assert_eq!(config.n_features, 1);
        assert_eq!(config.l2_lambda, 0.0);
        assert!(config.clip_limit.is_infinite());
        assert_eq!(config.max_iterations, 250);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[should_panic(expected = "l2_lambda must be non-negative")]
    fn test_negative_lambda_panics() {
        TrainerConfig::default().l2_lambda(-0.5);
    }

    #[test]
    #[should_panic(expected = "clip_limit must be positive")]
    fn test_zero_clip_panics() {
        TrainerConfig::default().clip_limit(0.0);
    }

    #[test]
    #[should_panic(expected = "n_samples must be at least 1")]
    fn test_empty_dataset_panics() {
        TrainerConfig::new(0, 3);
    }

    #[test]
    #[should_panic(expected = "uniform init")]
    fn test_inverted_uniform_range_panics() {
        TrainerConfig::default().init(WeightInit::Uniform { low: 0.1, high: -0.1 });
    }

    #[test]
    fn test_toml_defaults_when_section_missing() {
        let config = TrainerConfig::from_toml_str("[other]\nvalue = 1").unwrap();
        assert_eq!(config, TrainerConfig::default());
    }

    #[test]
    fn test_toml_parses_custom_values() {
        let toml = r#"
            [trainer]
            n_samples = 5
            n_features = 1
            l2_lambda = 0.0
            clip_limit = inf
            log_interval = 10
            init = { kind = "uniform", low = -0.1, high = 0.1 }
            seed = 7
        "#;
        let config = TrainerConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.n_samples, 5);
        assert_eq!(config.n_features, 1);
        assert_eq!(config.l2_lambda, 0.0);
        assert!(config.clip_limit.is_infinite());
        assert_eq!(config.log_interval, 10);
        assert_eq!(config.init, WeightInit::Uniform { low: -0.1, high: 0.1 });
        assert_eq!(config.seed, 7);
        assert_eq!(config.max_iterations, 10_000);
    }

    #[test]
    fn test_toml_rejects_invalid_values() {
        let err = TrainerConfig::from_toml_str("[trainer]\nlog_interval = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = TrainerConfig::from_toml_str("[trainer]\nl2_lambda = -1.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_toml_syntax_error() {
        let err = TrainerConfig::from_toml_str("[trainer\nn_samples = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = TrainerConfig::load_from_file("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
