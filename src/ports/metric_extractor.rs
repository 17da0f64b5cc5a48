//! MetricExtractor port - the external static-analysis tool.

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

use crate::domain::quality::RawMetrics;

/// Per-repository extraction failures. Both cause a skip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Metric extraction failed: {0}")]
    ToolFailed(String),
}

/// Produces raw measurements for a checked-out repository.
#[async_trait]
pub trait MetricExtractor: Send + Sync {
    /// Analyzes the working tree at `dir`.
    async fn analyze(&self, dir: &Path) -> Result<RawMetrics, ExtractionError>;
}
