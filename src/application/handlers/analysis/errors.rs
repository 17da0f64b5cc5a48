//! Analysis handler errors.

use thiserror::Error;

use super::outcome::SkippedRepository;
use crate::domain::foundation::{ErrorCode, ReportId, RunId, ValidationError};

/// Errors surfaced by the analysis handlers.
///
/// Per-repository failures never appear here; they are reported as skips.
/// `Persistence` and `Workspace` keep their details for logs only.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("Invalid analysis request: {0}")]
    InvalidRequest(#[from] ValidationError),

    #[error("No repository in the batch could be analyzed")]
    AllRepositoriesFailed { skipped: Vec<SkippedRepository> },

    #[error("Analysis run not found: {0}")]
    RunNotFound(RunId),

    #[error("Repository report not found: {0}")]
    ReportNotFound(ReportId),

    #[error("Failed to persist analysis: {0}")]
    Persistence(String),

    #[error("Working directory error: {0}")]
    Workspace(String),
}

impl AnalysisError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AnalysisError::InvalidRequest(_) => ErrorCode::ValidationFailed,
            AnalysisError::AllRepositoriesFailed { .. } => ErrorCode::AllRepositoriesFailed,
            AnalysisError::RunNotFound(_) => ErrorCode::RunNotFound,
            AnalysisError::ReportNotFound(_) => ErrorCode::ReportNotFound,
            AnalysisError::Persistence(_) => ErrorCode::DatabaseError,
            AnalysisError::Workspace(_) => ErrorCode::InternalError,
        }
    }

    /// Message safe to show to the caller.
    pub fn message(&self) -> String {
        match self {
            AnalysisError::InvalidRequest(err) => format!("Invalid request: {}", err),
            AnalysisError::AllRepositoriesFailed { .. } => "None of the submitted repositories \
                could be analyzed. Ensure at least one repository is public, written in a \
                supported language, and given as a valid repository URL."
                .to_string(),
            AnalysisError::RunNotFound(id) => format!("Analysis run not found: {}", id),
            AnalysisError::ReportNotFound(id) => format!("Repository report not found: {}", id),
            AnalysisError::Persistence(_) => {
                "The analysis could not be saved due to an internal error. Please try again."
                    .to_string()
            }
            AnalysisError::Workspace(_) => {
                "The analysis could not be started due to an internal error. Please try again."
                    .to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_failed_message_names_the_causes() {
        let err = AnalysisError::AllRepositoriesFailed { skipped: vec![] };
        let message = err.message();
        assert!(message.contains("public"));
        assert!(message.contains("supported language"));
        assert!(message.contains("valid repository URL"));
        assert_eq!(err.code(), ErrorCode::AllRepositoriesFailed);
    }

    #[test]
    fn persistence_message_hides_details() {
        let err = AnalysisError::Persistence("disk full at /var/lib/runs".to_string());
        assert!(!err.message().contains("/var/lib/runs"));
        assert_eq!(err.code(), ErrorCode::DatabaseError);
    }

    #[test]
    fn validation_errors_convert() {
        let err: AnalysisError = ValidationError::empty_field("locations").into();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }
}
