//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Worker pool size must be between 1 and {max}")]
    InvalidConcurrency { max: usize },

    #[error("Invalid timeout for {0}")]
    InvalidTimeout(&'static str),

    #[error("At least one repository per request must be allowed")]
    InvalidRepositoryLimit,

    #[error("Clone depth must be at least 1")]
    InvalidCloneDepth,

    #[error("Invalid aggregation weights: {0}")]
    InvalidWeights(String),
}
