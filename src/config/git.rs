//! Git fetcher configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Git fetcher configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GitConfig {
    /// Path to the git executable
    #[serde(default = "default_program")]
    pub program: String,

    /// Timeout for a single clone in seconds
    #[serde(default = "default_clone_timeout")]
    pub clone_timeout_secs: u64,

    /// History depth fetched per clone
    #[serde(default = "default_clone_depth")]
    pub clone_depth: u32,
}

impl GitConfig {
    /// Get clone timeout as Duration
    pub fn clone_timeout(&self) -> Duration {
        Duration::from_secs(self.clone_timeout_secs)
    }

    /// Validate git configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.program.trim().is_empty() {
            return Err(ValidationError::MissingRequired("GIT__PROGRAM"));
        }
        if self.clone_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout("git clone"));
        }
        if self.clone_depth == 0 {
            return Err(ValidationError::InvalidCloneDepth);
        }
        Ok(())
    }
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            clone_timeout_secs: default_clone_timeout(),
            clone_depth: default_clone_depth(),
        }
    }
}

fn default_program() -> String {
    "git".to_string()
}

fn default_clone_timeout() -> u64 {
    120
}

fn default_clone_depth() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_config_defaults() {
        let config = GitConfig::default();
        assert_eq!(config.program, "git");
        assert_eq!(config.clone_timeout(), Duration::from_secs(120));
        assert_eq!(config.clone_depth, 1);
    }

    #[test]
    fn test_validation_zero_depth() {
        let config = GitConfig {
            clone_depth: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidCloneDepth)
        ));
    }
}
