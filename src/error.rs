use std::io;

/// Errors produced while fitting or evaluating a linear model.
#[derive(Debug, thiserror::Error)]
pub enum TrainError {
    /// A buffer length does not match the configured dimensions.
    #[error("shape mismatch for {what}: got {got}, expected {expected}")]
    ShapeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },

    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),

    #[error("learning rate must be positive and finite, got {0}")]
    InvalidLearningRate(f64),

    /// A parameter became NaN or infinite, usually because the learning rate is too large.
    #[error("gradient descent diverged at iteration {iteration}")]
    Diverged { iteration: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
