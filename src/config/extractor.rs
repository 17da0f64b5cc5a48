//! Metric extractor configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Metric extractor configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractorConfig {
    /// Executable invoked with the repository directory as last argument
    #[serde(default = "default_program")]
    pub program: String,

    /// Extra arguments placed before the directory (comma-separated)
    pub args: Option<String>,

    /// Exit code the tool uses to report an unsupported language
    #[serde(default = "default_unsupported_exit_code")]
    pub unsupported_exit_code: i32,
}

impl ExtractorConfig {
    /// Get extra arguments as a vector
    pub fn args_list(&self) -> Vec<String> {
        self.args
            .as_ref()
            .map(|s| {
                s.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Validate extractor configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.program.trim().is_empty() {
            return Err(ValidationError::MissingRequired("EXTRACTOR__PROGRAM"));
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: None,
            unsupported_exit_code: default_unsupported_exit_code(),
        }
    }
}

fn default_program() -> String {
    "repo-metrics".to_string()
}

fn default_unsupported_exit_code() -> i32 {
    3
}
