//! Per-repository task outcomes.
//!
//! Every ingestion task ends in exactly one [`TaskOutcome`]. Failures are
//! values here, so one repository's failure never affects its siblings.

use serde::Serialize;
use std::fmt;

use crate::domain::analysis::RepositoryReport;
use crate::domain::quality::QualityError;
use crate::ports::{ExtractionError, FetchError};

/// Why a repository was dropped from a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// Rejected by the fetcher's syntactic check.
    InvalidLocation,
    Fetch(FetchError),
    Extraction(ExtractionError),
    /// Raw metrics could not be turned into a tree.
    Metrics(QualityError),
    /// Whole task exceeded its budget (seconds).
    TimedOut(u64),
    /// Task panicked or was cancelled.
    TaskAborted(String),
}

impl SkipReason {
    /// Short machine-readable tag, used in logs and CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidLocation => "invalid_location",
            Self::Fetch(FetchError::InvalidOrPrivate(_)) => "invalid_or_private",
            Self::Fetch(FetchError::Network(_)) => "network",
            Self::Fetch(FetchError::Timeout(_)) => "fetch_timeout",
            Self::Extraction(ExtractionError::UnsupportedLanguage(_)) => "unsupported_language",
            Self::Extraction(ExtractionError::ToolFailed(_)) => "extraction_failed",
            Self::Metrics(_) => "invalid_metrics",
            Self::TimedOut(_) => "timed_out",
            Self::TaskAborted(_) => "task_aborted",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLocation => write!(f, "not a valid repository location"),
            Self::Fetch(e) => write!(f, "{}", e),
            Self::Extraction(e) => write!(f, "{}", e),
            Self::Metrics(e) => write!(f, "{}", e),
            Self::TimedOut(secs) => write!(f, "analysis timed out after {}s", secs),
            Self::TaskAborted(msg) => write!(f, "analysis task aborted: {}", msg),
        }
    }
}

impl From<FetchError> for SkipReason {
    fn from(err: FetchError) -> Self {
        Self::Fetch(err)
    }
}

impl From<ExtractionError> for SkipReason {
    fn from(err: ExtractionError) -> Self {
        Self::Extraction(err)
    }
}

impl From<QualityError> for SkipReason {
    fn from(err: QualityError) -> Self {
        Self::Metrics(err)
    }
}

/// A dropped location and the reason it was dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRepository {
    pub location: String,
    pub submission_index: usize,
    /// Tag from [`SkipReason::kind`].
    pub kind: &'static str,
    pub reason: String,
}

impl SkippedRepository {
    pub fn new(location: impl Into<String>, submission_index: usize, reason: &SkipReason) -> Self {
        Self {
            location: location.into(),
            submission_index,
            kind: reason.kind(),
            reason: reason.to_string(),
        }
    }
}

/// Result of one per-repository task.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutcome {
    Analyzed(RepositoryReport),
    Skipped {
        location: String,
        submission_index: usize,
        reason: SkipReason,
    },
}

impl TaskOutcome {
    pub fn skipped(location: impl Into<String>, submission_index: usize, reason: SkipReason) -> Self {
        Self::Skipped {
            location: location.into(),
            submission_index,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quality::QualityAttribute;

    #[test]
    fn kinds_distinguish_fetch_failures() {
        assert_eq!(
            SkipReason::from(FetchError::InvalidOrPrivate("x".into())).kind(),
            "invalid_or_private"
        );
        assert_eq!(SkipReason::from(FetchError::Timeout(5)).kind(), "fetch_timeout");
        assert_eq!(
            SkipReason::from(ExtractionError::UnsupportedLanguage("cobol".into())).kind(),
            "unsupported_language"
        );
    }

    #[test]
    fn skipped_repository_carries_readable_reason() {
        let reason = SkipReason::Metrics(QualityError::MissingMetric(QualityAttribute::Duplication));
        let skipped = SkippedRepository::new("https://github.com/a/b", 2, &reason);
        assert_eq!(skipped.kind, "invalid_metrics");
        assert_eq!(skipped.submission_index, 2);
        assert_eq!(skipped.reason, "Raw metric 'duplication' is missing");
    }

    #[test]
    fn timed_out_displays_budget() {
        assert_eq!(
            SkipReason::TimedOut(300).to_string(),
            "analysis timed out after 300s"
        );
    }
}
