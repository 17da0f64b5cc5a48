//! In-Memory Analysis Repository
//!
//! Keeps runs and their reports in memory. A whole write set is inserted
//! under one write lock, so readers never see a run without its reports.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::stored_run::StoredRun;
use crate::domain::analysis::{AnalysisRun, Constraint, Preference, RepositoryReport};
use crate::domain::foundation::{DomainError, ReportId, RunId};
use crate::ports::{AnalysisRepository, RunWriteSet};

#[derive(Debug, Default)]
struct State {
    runs: HashMap<RunId, StoredRun>,
    report_index: HashMap<ReportId, RunId>,
}

/// In-memory storage for analysis runs
#[derive(Debug, Clone, Default)]
pub struct InMemoryAnalysisRepository {
    state: Arc<RwLock<State>>,
}

impl InMemoryAnalysisRepository {
    /// Create a new in-memory repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored runs
    pub async fn run_count(&self) -> usize {
        self.state.read().await.runs.len()
    }

    /// Get the number of stored reports across all runs
    pub async fn report_count(&self) -> usize {
        self.state.read().await.report_index.len()
    }
}

#[async_trait]
impl AnalysisRepository for InMemoryAnalysisRepository {
    async fn save_run(&self, write_set: RunWriteSet) -> Result<RunId, DomainError> {
        let id = RunId::new();
        let stored = StoredRun::from_write_set(id, write_set);

        let mut state = self.state.write().await;
        for report in &stored.reports {
            state.report_index.insert(report.id, id);
        }
        state.runs.insert(id, stored);
        Ok(id)
    }

    async fn find_run(&self, run_id: &RunId) -> Result<Option<AnalysisRun>, DomainError> {
        let state = self.state.read().await;
        Ok(state.runs.get(run_id).map(|stored| stored.run.clone()))
    }

    async fn load_reports(&self, run_id: &RunId) -> Result<Vec<RepositoryReport>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .runs
            .get(run_id)
            .map(|stored| stored.reports.clone())
            .unwrap_or_default())
    }

    async fn load_preferences(&self, run_id: &RunId) -> Result<Vec<Preference>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .runs
            .get(run_id)
            .map(|stored| stored.preferences.clone())
            .unwrap_or_default())
    }

    async fn load_constraints(&self, run_id: &RunId) -> Result<Vec<Constraint>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .runs
            .get(run_id)
            .map(|stored| stored.constraints.clone())
            .unwrap_or_default())
    }

    async fn find_report(
        &self,
        report_id: &ReportId,
    ) -> Result<Option<RepositoryReport>, DomainError> {
        let state = self.state.read().await;
        let Some(run_id) = state.report_index.get(report_id) else {
            return Ok(None);
        };
        Ok(state
            .runs
            .get(run_id)
            .and_then(|stored| stored.reports.iter().find(|r| r.id == *report_id))
            .cloned())
    }
}
