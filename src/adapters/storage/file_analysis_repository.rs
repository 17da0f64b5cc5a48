//! File-based Analysis Repository
//!
//! Stores each run as a single YAML document at `<base_path>/<run_id>.yaml`.
//! The document is written to a temporary file first and renamed into place,
//! so a run appears with all of its reports or not at all.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::stored_run::StoredRun;
use crate::domain::analysis::{AnalysisRun, Constraint, Preference, RepositoryReport};
use crate::domain::foundation::{DomainError, ReportId, RunId};
use crate::ports::{AnalysisRepository, RunWriteSet};

const EXTENSION: &str = "yaml";

/// File-based storage for analysis runs
#[derive(Debug, Clone)]
pub struct FileAnalysisRepository {
    base_path: PathBuf,
}

impl FileAnalysisRepository {
    /// Create a new file repository rooted at `base_path`
    ///
    /// The directory is created on first write.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn run_file_path(&self, run_id: &RunId) -> PathBuf {
        self.base_path.join(format!("{}.{}", run_id, EXTENSION))
    }

    fn temp_file_path(&self, run_id: &RunId) -> PathBuf {
        self.base_path.join(format!(".{}.{}.tmp", run_id, EXTENSION))
    }

    /// Reads one run file; a file that does not exist reads as `None`.
    async fn read_run(&self, path: &Path) -> Result<Option<StoredRun>, DomainError> {
        let yaml = match fs::read_to_string(path).await {
            Ok(yaml) => yaml,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(DomainError::database(format!(
                    "failed to read run file: {}",
                    e
                )))
            }
        };
        serde_yaml::from_str(&yaml)
            .map(Some)
            .map_err(|e| DomainError::database(format!("corrupt run file: {}", e)))
    }

    async fn load(&self, run_id: &RunId) -> Result<Option<StoredRun>, DomainError> {
        self.read_run(&self.run_file_path(run_id)).await
    }
}

#[async_trait]
impl AnalysisRepository for FileAnalysisRepository {
    async fn save_run(&self, write_set: RunWriteSet) -> Result<RunId, DomainError> {
        let id = RunId::new();
        let stored = StoredRun::from_write_set(id, write_set);

        let yaml = serde_yaml::to_string(&stored)
            .map_err(|e| DomainError::database(format!("failed to serialize run: {}", e)))?;

        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| DomainError::database(format!("failed to create data dir: {}", e)))?;

        let temp_path = self.temp_file_path(&id);
        fs::write(&temp_path, yaml)
            .await
            .map_err(|e| DomainError::database(format!("failed to write run file: {}", e)))?;

        if let Err(e) = fs::rename(&temp_path, self.run_file_path(&id)).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(DomainError::database(format!(
                "failed to commit run file: {}",
                e
            )));
        }

        Ok(id)
    }

    async fn find_run(&self, run_id: &RunId) -> Result<Option<AnalysisRun>, DomainError> {
        Ok(self.load(run_id).await?.map(|stored| stored.run))
    }

    async fn load_reports(&self, run_id: &RunId) -> Result<Vec<RepositoryReport>, DomainError> {
        Ok(self
            .load(run_id)
            .await?
            .map(|stored| stored.reports)
            .unwrap_or_default())
    }

    async fn load_preferences(&self, run_id: &RunId) -> Result<Vec<Preference>, DomainError> {
        Ok(self
            .load(run_id)
            .await?
            .map(|stored| stored.preferences)
            .unwrap_or_default())
    }

    async fn load_constraints(&self, run_id: &RunId) -> Result<Vec<Constraint>, DomainError> {
        Ok(self
            .load(run_id)
            .await?
            .map(|stored| stored.constraints)
            .unwrap_or_default())
    }

    async fn find_report(
        &self,
        report_id: &ReportId,
    ) -> Result<Option<RepositoryReport>, DomainError> {
        let mut entries = match fs::read_dir(&self.base_path).await {
            Ok(entries) => entries,
            // Nothing has been saved yet
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(DomainError::database(format!(
                    "failed to list data dir: {}",
                    e
                )))
            }
        };

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| DomainError::database(format!("failed to list data dir: {}", e)))?
        {
            let path = entry.path();
            let is_run_file = path.extension().and_then(|e| e.to_str()) == Some(EXTENSION)
                && !path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .map(|n| n.starts_with('.'))
                    .unwrap_or(true);
            if !is_run_file {
                continue;
            }

            // A run file removed mid-scan is simply skipped
            let Some(stored) = self.read_run(&path).await? else {
                continue;
            };
            if let Some(report) = stored.reports.into_iter().find(|r| r.id == *report_id) {
                return Ok(Some(report));
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::{ComparisonOperator, RankingEngine};
    use crate::domain::foundation::{ErrorCode, OwnerId, Timestamp};
    use crate::domain::quality::{QualityAttribute, QualityTreeAggregator, RawMetrics};
    use tempfile::TempDir;

    fn report(location: &str, index: usize, security_hotspots: f64) -> RepositoryReport {
        let raw: RawMetrics = QualityAttribute::all()
            .iter()
            .filter(|a| a.is_leaf())
            .map(|a| (a.key(), 1.0))
            .collect::<RawMetrics>()
            .with("hotspot_priority", security_hotspots);
        RepositoryReport {
            id: ReportId::new(),
            location: location.to_string(),
            submission_index: index,
            quality: QualityTreeAggregator::new().build(&raw).unwrap(),
            raw_metrics: raw,
        }
    }

    fn write_set(reports: Vec<RepositoryReport>) -> RunWriteSet {
        RunWriteSet {
            owner_id: OwnerId::new("owner-1").unwrap(),
            created_at: Timestamp::now(),
            reports,
            constraints: vec![Constraint::new(
                QualityAttribute::Security,
                ComparisonOperator::GreaterOrEqual,
                0.0,
            )
            .unwrap()],
            preferences: vec![Preference::new(QualityAttribute::Security, 1.0).unwrap()],
        }
    }

    #[tokio::test]
    async fn save_writes_one_yaml_file_per_run() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileAnalysisRepository::new(temp_dir.path());

        let run_id = repo.save_run(write_set(vec![report("a", 0, 0.0)])).await.unwrap();

        let path = temp_dir.path().join(format!("{}.yaml", run_id));
        assert!(path.exists());
        let names: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names.len(), 1, "temporary file left behind: {:?}", names);
    }

    #[tokio::test]
    async fn reload_preserves_everything() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileAnalysisRepository::new(temp_dir.path());
        let reports = vec![report("a", 0, 0.0), report("b", 1, 30.0)];

        let run_id = repo.save_run(write_set(reports.clone())).await.unwrap();

        // A fresh adapter sees the same data
        let reopened = FileAnalysisRepository::new(temp_dir.path());
        let run = reopened.find_run(&run_id).await.unwrap().unwrap();
        assert_eq!(run.id, run_id);
        assert_eq!(reopened.load_reports(&run_id).await.unwrap(), reports);
        assert_eq!(reopened.load_preferences(&run_id).await.unwrap().len(), 1);
        assert_eq!(reopened.load_constraints(&run_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn reloaded_trees_rank_identically() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileAnalysisRepository::new(temp_dir.path());
        let reports = vec![
            report("a", 0, 50.0),
            report("b", 1, 0.0),
            report("c", 2, 10.0),
        ];
        let ws = write_set(reports.clone());
        let prefs = ws.preferences.clone();
        let constraints = ws.constraints.clone();

        let before = RankingEngine::order(reports, &prefs, &constraints);
        let run_id = repo.save_run(ws).await.unwrap();
        let after = RankingEngine::order(
            repo.load_reports(&run_id).await.unwrap(),
            &repo.load_preferences(&run_id).await.unwrap(),
            &repo.load_constraints(&run_id).await.unwrap(),
        );

        assert_eq!(before.locations(), after.locations());
        let ranks = |r: &crate::domain::analysis::AnalysisResult| {
            r.reports.iter().map(|x| x.rank.to_bits()).collect::<Vec<_>>()
        };
        assert_eq!(ranks(&before), ranks(&after));
    }

    #[tokio::test]
    async fn find_report_scans_runs() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileAnalysisRepository::new(temp_dir.path());
        let wanted = report("wanted", 0, 0.0);

        repo.save_run(write_set(vec![report("other", 0, 0.0)])).await.unwrap();
        repo.save_run(write_set(vec![wanted.clone()])).await.unwrap();

        assert_eq!(repo.find_report(&wanted.id).await.unwrap(), Some(wanted));
        assert_eq!(repo.find_report(&ReportId::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn missing_directory_reads_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileAnalysisRepository::new(temp_dir.path().join("never-created"));
        let id = RunId::new();
        assert!(repo.find_run(&id).await.unwrap().is_none());
        assert!(repo.load_reports(&id).await.unwrap().is_empty());
        assert!(repo.find_report(&ReportId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn data_dir_that_is_a_file_is_a_database_error() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("runs");
        std::fs::write(&blocker, "not a directory").unwrap();
        let repo = FileAnalysisRepository::new(&blocker);

        let err = repo.find_run(&RunId::new()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        let err = repo.find_report(&ReportId::new()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[tokio::test]
    async fn unwritable_location_is_a_database_error() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();
        let repo = FileAnalysisRepository::new(blocker.join("runs"));

        let err = repo
            .save_run(write_set(vec![report("a", 0, 0.0)]))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[tokio::test]
    async fn corrupt_file_is_a_database_error() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileAnalysisRepository::new(temp_dir.path());
        let id = RunId::new();
        std::fs::write(temp_dir.path().join(format!("{}.yaml", id)), ": : not yaml [").unwrap();

        let err = repo.find_run(&id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
