//! GetReportHandler - Query handler for a single repository report.

use std::sync::Arc;
use tracing::error;

use super::errors::AnalysisError;
use crate::domain::analysis::RepositoryReport;
use crate::domain::foundation::ReportId;
use crate::ports::AnalysisRepository;

/// Query for one stored report.
#[derive(Debug, Clone)]
pub struct GetReportQuery {
    pub report_id: ReportId,
}

/// Handler for report queries.
pub struct GetReportHandler {
    repository: Arc<dyn AnalysisRepository>,
}

impl GetReportHandler {
    pub fn new(repository: Arc<dyn AnalysisRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetReportQuery) -> Result<RepositoryReport, AnalysisError> {
        self.repository
            .find_report(&query.report_id)
            .await
            .map_err(|e| {
                error!(error = %e, report_id = %query.report_id, "failed to load report");
                AnalysisError::Persistence(e.to_string())
            })?
            .ok_or(AnalysisError::ReportNotFound(query.report_id))
    }
}
