//! Ingestion configuration (worker pool, timeouts, working directory)

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;

/// Upper bound for the worker pool.
pub const MAX_CONCURRENCY: usize = 64;

/// Ingestion configuration
#[derive(Debug, Clone, Deserialize)]
pub struct IngestionConfig {
    /// Root under which each request gets its own working directory
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    /// Number of repositories processed at the same time
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Budget for clone + extract + aggregate of one repository, in seconds
    #[serde(default = "default_task_timeout")]
    pub task_timeout_secs: u64,

    /// Largest accepted batch
    #[serde(default = "default_max_repositories")]
    pub max_repositories: usize,
}

impl IngestionConfig {
    /// Get the per-repository timeout as Duration
    pub fn task_timeout(&self) -> Duration {
        Duration::from_secs(self.task_timeout_secs)
    }

    /// Validate ingestion configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("INGESTION__BASE_DIR"));
        }
        if self.max_concurrency == 0 || self.max_concurrency > MAX_CONCURRENCY {
            return Err(ValidationError::InvalidConcurrency {
                max: MAX_CONCURRENCY,
            });
        }
        if self.task_timeout_secs == 0 || self.task_timeout_secs > 3600 {
            return Err(ValidationError::InvalidTimeout("ingestion task"));
        }
        if self.max_repositories == 0 {
            return Err(ValidationError::InvalidRepositoryLimit);
        }
        Ok(())
    }
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            max_concurrency: default_max_concurrency(),
            task_timeout_secs: default_task_timeout(),
            max_repositories: default_max_repositories(),
        }
    }
}

fn default_base_dir() -> PathBuf {
    std::env::temp_dir().join("repo-quality")
}

fn default_max_concurrency() -> usize {
    4
}

fn default_task_timeout() -> u64 {
    300
}

fn default_max_repositories() -> usize {
    20
}
