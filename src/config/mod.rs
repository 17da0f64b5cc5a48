//! Application configuration module
//!
//! Configuration is read from environment variables with the `REPO_QUALITY`
//! prefix; nested values are separated by double underscores. Every section
//! has defaults, so an empty environment yields a working configuration.
//!
//! # Example
//!
//! ```no_run
//! use repo_quality::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Workers: {}", config.ingestion.max_concurrency);
//! ```

mod aggregation;
mod error;
mod extractor;
mod git;
mod ingestion;
mod logging;
mod storage;

pub use aggregation::AggregationConfig;
pub use error::{ConfigError, ValidationError};
pub use extractor::ExtractorConfig;
pub use git::GitConfig;
pub use ingestion::{IngestionConfig, MAX_CONCURRENCY};
pub use logging::{LogFormat, LoggingConfig};
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Worker pool, per-repository timeout, working directory
    #[serde(default)]
    pub ingestion: IngestionConfig,

    /// Repository fetcher (git executable)
    #[serde(default)]
    pub git: GitConfig,

    /// Metric extraction tool
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Run persistence
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Composite weighting
    #[serde(default)]
    pub aggregation: AggregationConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Environment Variable Format
    ///
    /// - `REPO_QUALITY__INGESTION__MAX_CONCURRENCY=8` -> `ingestion.max_concurrency = 8`
    /// - `REPO_QUALITY__STORAGE__BACKEND=file` -> `storage.backend = file`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("REPO_QUALITY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ingestion.validate()?;
        self.git.validate()?;
        self.extractor.validate()?;
        self.storage.validate()?;
        self.logging.validate()?;
        self.aggregation.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("REPO_QUALITY__INGESTION__MAX_CONCURRENCY");
        env::remove_var("REPO_QUALITY__INGESTION__TASK_TIMEOUT_SECS");
        env::remove_var("REPO_QUALITY__STORAGE__BACKEND");
        env::remove_var("REPO_QUALITY__STORAGE__DATA_DIR");
        env::remove_var("REPO_QUALITY__LOGGING__FORMAT");
        env::remove_var("REPO_QUALITY__AGGREGATION__WEIGHTS");
    }

    #[test]
    fn test_load_with_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.ingestion.max_concurrency, 4);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("REPO_QUALITY__INGESTION__MAX_CONCURRENCY", "8");
        env::set_var("REPO_QUALITY__STORAGE__BACKEND", "file");
        env::set_var("REPO_QUALITY__STORAGE__DATA_DIR", "/tmp/runs");
        env::set_var("REPO_QUALITY__LOGGING__FORMAT", "json");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.ingestion.max_concurrency, 8);
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.storage.data_dir, std::path::PathBuf::from("/tmp/runs"));
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_validate_rejects_bad_weights() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("REPO_QUALITY__AGGREGATION__WEIGHTS", "security=zero");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidWeights(_))
        ));
    }

    #[test]
    fn test_validate_rejects_excess_concurrency() {
        let config = AppConfig {
            ingestion: IngestionConfig {
                max_concurrency: MAX_CONCURRENCY + 1,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
