//! Persisted shape of one run, shared by the storage adapters.

use serde::{Deserialize, Serialize};

use crate::domain::analysis::{AnalysisRun, Constraint, Preference, RepositoryReport};
use crate::domain::foundation::RunId;
use crate::ports::RunWriteSet;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StoredRun {
    pub run: AnalysisRun,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
    #[serde(default)]
    pub preferences: Vec<Preference>,
    pub reports: Vec<RepositoryReport>,
}

impl StoredRun {
    pub fn from_write_set(id: RunId, write_set: RunWriteSet) -> Self {
        Self {
            run: AnalysisRun {
                id,
                owner_id: write_set.owner_id,
                created_at: write_set.created_at,
            },
            constraints: write_set.constraints,
            preferences: write_set.preferences,
            reports: write_set.reports,
        }
    }
}
