//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod analysis;

pub use analysis::{
    // Commands
    SubmitAnalysisCommand, SubmitAnalysisHandler, SubmitAnalysisResult, IngestionSettings,
    // Queries
    GetAnalysisResultHandler, GetAnalysisResultQuery, GetAnalysisResultView,
    GetReportHandler, GetReportQuery,
    // Support
    AnalysisError, BatchWorkspace, SkipReason, SkippedRepository, TaskOutcome,
};
