//! GetAnalysisResultHandler - Query handler for ranked run results.
//!
//! Ranks are computed here, on every read, from the stored trees and the
//! preferences and constraints saved with the run.

use std::sync::Arc;
use tracing::{debug, error};

use super::errors::AnalysisError;
use crate::domain::analysis::{AnalysisResult, AnalysisRun, RankingEngine};
use crate::domain::foundation::{DomainError, RunId};
use crate::ports::AnalysisRepository;

/// Query for the ranked result of one run.
#[derive(Debug, Clone)]
pub struct GetAnalysisResultQuery {
    pub run_id: RunId,
}

/// A run together with its freshly ranked reports.
#[derive(Debug, Clone)]
pub struct GetAnalysisResultView {
    pub run: AnalysisRun,
    pub result: AnalysisResult,
}

/// Handler for ranked result queries.
pub struct GetAnalysisResultHandler {
    repository: Arc<dyn AnalysisRepository>,
}

impl GetAnalysisResultHandler {
    pub fn new(repository: Arc<dyn AnalysisRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: GetAnalysisResultQuery,
    ) -> Result<GetAnalysisResultView, AnalysisError> {
        let run_id = query.run_id;

        let run = self
            .repository
            .find_run(&run_id)
            .await
            .map_err(persistence)?
            .ok_or(AnalysisError::RunNotFound(run_id))?;

        let reports = self.repository.load_reports(&run_id).await.map_err(persistence)?;
        let preferences = self
            .repository
            .load_preferences(&run_id)
            .await
            .map_err(persistence)?;
        let constraints = self
            .repository
            .load_constraints(&run_id)
            .await
            .map_err(persistence)?;

        let result = RankingEngine::order(reports, &preferences, &constraints);
        debug!(%run_id, ranked = result.len(), excluded = result.excluded, "ranked analysis run");

        Ok(GetAnalysisResultView { run, result })
    }
}

fn persistence(err: DomainError) -> AnalysisError {
    error!(error = %err, "failed to load analysis run");
    AnalysisError::Persistence(err.to_string())
}
