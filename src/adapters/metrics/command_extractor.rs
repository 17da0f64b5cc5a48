//! Command Metric Extractor
//!
//! Runs a configured static-analysis executable against a checked-out
//! repository. The tool receives the directory as its last argument and must
//! print a flat JSON object of numbers, keyed by leaf attribute, e.g.
//!
//! ```json
//! {"comment_rate": 0.21, "method_size": 14.5, "duplication": 3.2}
//! ```
//!
//! A dedicated exit code signals an unsupported language; any other failure
//! is reported as a tool failure.

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use crate::config::ExtractorConfig;
use crate::domain::quality::RawMetrics;
use crate::ports::{ExtractionError, MetricExtractor};

/// Metric extractor backed by an external process.
#[derive(Debug, Clone)]
pub struct CommandMetricExtractor {
    program: String,
    args: Vec<String>,
    unsupported_exit_code: i32,
}

impl CommandMetricExtractor {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            unsupported_exit_code: 3,
        }
    }

    pub fn from_config(config: &ExtractorConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args_list(),
            unsupported_exit_code: config.unsupported_exit_code,
        }
    }

    /// Set arguments passed before the directory.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Set the exit code meaning "unsupported language".
    pub fn with_unsupported_exit_code(mut self, code: i32) -> Self {
        self.unsupported_exit_code = code;
        self
    }

    fn parse_metrics(stdout: &[u8]) -> Result<RawMetrics, ExtractionError> {
        serde_json::from_slice(stdout)
            .map_err(|e| ExtractionError::ToolFailed(format!("invalid metrics output: {}", e)))
    }
}

#[async_trait]
impl MetricExtractor for CommandMetricExtractor {
    async fn analyze(&self, dir: &Path) -> Result<RawMetrics, ExtractionError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                ExtractionError::ToolFailed(format!("failed to start {}: {}", self.program, e))
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        match output.status.code() {
            Some(0) => Self::parse_metrics(&output.stdout),
            Some(code) if code == self.unsupported_exit_code => {
                Err(ExtractionError::UnsupportedLanguage(stderr))
            }
            Some(code) => Err(ExtractionError::ToolFailed(format!(
                "{} exited with {}: {}",
                self.program, code, stderr
            ))),
            None => Err(ExtractionError::ToolFailed(format!(
                "{} terminated by signal",
                self.program
            ))),
        }
    }
}
