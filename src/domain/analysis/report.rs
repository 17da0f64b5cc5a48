//! Reports, runs and ranked results.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{OwnerId, ReportId, RunId, Timestamp};
use crate::domain::quality::{QualityTree, RawMetrics};

/// Canonical stored state for one analyzed repository.
///
/// Holds the tree and the raw metrics it was built from; the rank is never
/// stored here, see [`RankedReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryReport {
    pub id: ReportId,
    pub location: String,
    /// Position of `location` in the original request.
    pub submission_index: usize,
    pub raw_metrics: RawMetrics,
    pub quality: QualityTree,
}

/// A report together with the rank computed for one read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedReport {
    #[serde(flatten)]
    pub report: RepositoryReport,
    pub rank: f64,
}

/// Reports ordered by rank descending, ties in submission order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub reports: Vec<RankedReport>,
    /// Reports dropped because they failed a constraint.
    pub excluded: usize,
}

impl AnalysisResult {
    /// Locations in ranked order.
    pub fn locations(&self) -> Vec<&str> {
        self.reports
            .iter()
            .map(|r| r.report.location.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

/// One persisted batch submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRun {
    pub id: RunId,
    pub owner_id: OwnerId,
    pub created_at: Timestamp,
}
