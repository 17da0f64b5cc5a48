//! Analysis handlers.
//!
//! - `SubmitAnalysisHandler` - Ingests a batch and persists the run
//! - `GetAnalysisResultHandler` - Ranks a stored run on read
//! - `GetReportHandler` - Loads a single repository report

mod errors;
mod get_analysis_result;
mod get_report;
mod outcome;
mod submit_analysis;
mod workspace;

pub use errors::AnalysisError;
pub use get_analysis_result::{
    GetAnalysisResultHandler, GetAnalysisResultQuery, GetAnalysisResultView,
};
pub use get_report::{GetReportHandler, GetReportQuery};
pub use outcome::{SkipReason, SkippedRepository, TaskOutcome};
pub use submit_analysis::{
    IngestionSettings, SubmitAnalysisCommand, SubmitAnalysisHandler, SubmitAnalysisResult,
};
pub use workspace::BatchWorkspace;
