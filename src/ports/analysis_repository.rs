//! AnalysisRepository port - the persistence gateway for runs.
//!
//! # Design
//!
//! - **One write per batch**: the run, its reports, constraints and
//!   preferences travel together in a [`RunWriteSet`] and are committed
//!   atomically, so a run is never visible without its reports.
//! - **No ranks**: only trees and raw metrics are stored; ranking happens on read.

use async_trait::async_trait;

use crate::domain::analysis::{AnalysisRun, Constraint, Preference, RepositoryReport};
use crate::domain::foundation::{DomainError, OwnerId, ReportId, RunId, Timestamp};

/// Everything persisted for one successful batch.
#[derive(Debug, Clone)]
pub struct RunWriteSet {
    pub owner_id: OwnerId,
    pub created_at: Timestamp,
    pub reports: Vec<RepositoryReport>,
    pub constraints: Vec<Constraint>,
    pub preferences: Vec<Preference>,
}

/// Repository port for analysis runs.
#[async_trait]
pub trait AnalysisRepository: Send + Sync {
    /// Persists a whole batch and returns the new run id.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure; nothing is stored in that case
    async fn save_run(&self, write_set: RunWriteSet) -> Result<RunId, DomainError>;

    /// Finds a run by id. Returns `None` if not found.
    async fn find_run(&self, run_id: &RunId) -> Result<Option<AnalysisRun>, DomainError>;

    /// Reports stored for a run, in no particular order.
    async fn load_reports(&self, run_id: &RunId) -> Result<Vec<RepositoryReport>, DomainError>;

    async fn load_preferences(&self, run_id: &RunId) -> Result<Vec<Preference>, DomainError>;

    async fn load_constraints(&self, run_id: &RunId) -> Result<Vec<Constraint>, DomainError>;

    /// Finds a single report by id. Returns `None` if not found.
    async fn find_report(
        &self,
        report_id: &ReportId,
    ) -> Result<Option<RepositoryReport>, DomainError>;
}
