//! SubmitAnalysisHandler - Command handler that ingests a batch of repositories.
//!
//! Each location is fetched, measured and turned into a quality tree on its
//! own task. Tasks share a bounded worker pool; the handler waits for all of
//! them before deciding the batch outcome. Nothing is persisted unless at
//! least one repository succeeded.

use futures::future::join_all;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn, Instrument};

use super::errors::AnalysisError;
use super::outcome::{SkipReason, SkippedRepository, TaskOutcome};
use super::workspace::BatchWorkspace;
use crate::config::IngestionConfig;
use crate::domain::analysis::{AnalysisRequest, Constraint, Preference, RepositoryReport};
use crate::domain::foundation::{OwnerId, ReportId, RunId, Timestamp, ValidationError};
use crate::domain::quality::QualityTreeAggregator;
use crate::ports::{
    AnalysisRepository, IdGenerator, MetricExtractor, RepositoryFetcher, RunWriteSet,
};

/// Command to analyze a batch of repositories.
#[derive(Debug, Clone)]
pub struct SubmitAnalysisCommand {
    pub owner_id: OwnerId,
    /// Repository locations; order is the submission order.
    pub locations: Vec<String>,
    pub constraints: Vec<Constraint>,
    pub preferences: Vec<Preference>,
}

/// Result of a batch with at least one analyzed repository.
#[derive(Debug, Clone)]
pub struct SubmitAnalysisResult {
    pub run_id: RunId,
    pub analyzed: usize,
    /// Dropped locations in submission order.
    pub skipped: Vec<SkippedRepository>,
}

/// Worker pool and working-directory settings.
#[derive(Debug, Clone)]
pub struct IngestionSettings {
    pub base_dir: PathBuf,
    pub max_concurrency: usize,
    pub task_timeout: Duration,
    pub max_repositories: usize,
}

impl IngestionSettings {
    pub fn from_config(config: &IngestionConfig) -> Self {
        Self {
            base_dir: config.base_dir.clone(),
            max_concurrency: config.max_concurrency,
            task_timeout: config.task_timeout(),
            max_repositories: config.max_repositories,
        }
    }

    /// A pool without permits would never start a task.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_concurrency == 0 {
            return Err(ValidationError::not_positive("max_concurrency", 0.0));
        }
        Ok(())
    }
}

impl Default for IngestionSettings {
    fn default() -> Self {
        Self::from_config(&IngestionConfig::default())
    }
}

/// Handler for batch submissions.
pub struct SubmitAnalysisHandler {
    fetcher: Arc<dyn RepositoryFetcher>,
    extractor: Arc<dyn MetricExtractor>,
    repository: Arc<dyn AnalysisRepository>,
    ids: Arc<dyn IdGenerator>,
    aggregator: Arc<QualityTreeAggregator>,
    settings: IngestionSettings,
}

impl SubmitAnalysisHandler {
    pub fn new(
        fetcher: Arc<dyn RepositoryFetcher>,
        extractor: Arc<dyn MetricExtractor>,
        repository: Arc<dyn AnalysisRepository>,
        ids: Arc<dyn IdGenerator>,
        settings: IngestionSettings,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            repository,
            ids,
            aggregator: Arc::new(QualityTreeAggregator::new()),
            settings,
        }
    }

    /// Use a non-default aggregation strategy.
    pub fn with_aggregator(mut self, aggregator: QualityTreeAggregator) -> Self {
        self.aggregator = Arc::new(aggregator);
        self
    }

    pub async fn handle(
        &self,
        cmd: SubmitAnalysisCommand,
    ) -> Result<SubmitAnalysisResult, AnalysisError> {
        self.settings.validate()?;
        let request = AnalysisRequest::new(
            cmd.locations,
            cmd.constraints,
            cmd.preferences,
            self.settings.max_repositories,
        )?;

        let request_id = self.ids.next_id();
        let span = tracing::info_span!(
            "analysis_batch",
            %request_id,
            owner_id = %cmd.owner_id,
            repositories = request.locations().len()
        );

        self.process(cmd.owner_id, request, request_id)
            .instrument(span)
            .await
    }

    async fn process(
        &self,
        owner_id: OwnerId,
        request: AnalysisRequest,
        request_id: uuid::Uuid,
    ) -> Result<SubmitAnalysisResult, AnalysisError> {
        let workspace = BatchWorkspace::create(&self.settings.base_dir, request_id)
            .await
            .map_err(|e| {
                error!(error = %e, base_dir = %self.settings.base_dir.display(), "failed to create batch workspace");
                AnalysisError::Workspace(e.to_string())
            })?;

        let outcomes = self.run_tasks(&workspace, request.locations()).await;

        if let Err(e) = workspace.release().await {
            warn!(error = %e, "failed to remove batch workspace");
        }

        let (mut reports, mut skipped) = (Vec::new(), Vec::new());
        for outcome in outcomes {
            match outcome {
                TaskOutcome::Analyzed(report) => reports.push(report),
                TaskOutcome::Skipped {
                    location,
                    submission_index,
                    reason,
                } => {
                    warn!(%location, kind = reason.kind(), %reason, "repository skipped");
                    skipped.push(SkippedRepository::new(location, submission_index, &reason));
                }
            }
        }
        skipped.sort_by_key(|s| s.submission_index);

        if reports.is_empty() {
            warn!(skipped = skipped.len(), "no repository could be analyzed");
            return Err(AnalysisError::AllRepositoriesFailed { skipped });
        }

        reports.sort_by_key(|r| r.submission_index);
        let analyzed = reports.len();
        let write_set = RunWriteSet {
            owner_id,
            created_at: Timestamp::now(),
            reports,
            constraints: request.constraints().to_vec(),
            preferences: request.preferences().to_vec(),
        };

        let run_id = self.repository.save_run(write_set).await.map_err(|e| {
            error!(error = %e, "failed to persist analysis run");
            AnalysisError::Persistence(e.to_string())
        })?;

        info!(%run_id, analyzed, skipped = skipped.len(), "analysis batch completed");

        Ok(SubmitAnalysisResult {
            run_id,
            analyzed,
            skipped,
        })
    }

    /// Spawns one task per location and waits for every one of them.
    async fn run_tasks(&self, workspace: &BatchWorkspace, locations: &[String]) -> Vec<TaskOutcome> {
        let semaphore = Arc::new(Semaphore::new(self.settings.max_concurrency));

        let handles: Vec<_> = locations
            .iter()
            .enumerate()
            .map(|(submission_index, location)| {
                let task = RepositoryTask {
                    fetcher: Arc::clone(&self.fetcher),
                    extractor: Arc::clone(&self.extractor),
                    aggregator: Arc::clone(&self.aggregator),
                    report_id: ReportId::from_uuid(self.ids.next_id()),
                    dir: workspace.task_dir(self.ids.next_id()),
                    location: location.clone(),
                    submission_index,
                    timeout: self.settings.task_timeout,
                };
                let semaphore = Arc::clone(&semaphore);
                let span = tracing::debug_span!("repository", %location, submission_index);

                let handle = AbortOnDrop(tokio::spawn(
                    async move {
                        let _permit = match semaphore.acquire_owned().await {
                            Ok(permit) => permit,
                            Err(e) => {
                                return TaskOutcome::skipped(
                                    task.location,
                                    task.submission_index,
                                    SkipReason::TaskAborted(e.to_string()),
                                )
                            }
                        };
                        task.run().await
                    }
                    .instrument(span),
                ));
                (location.clone(), submission_index, handle)
            })
            .collect();

        join_all(
            handles
                .into_iter()
                .map(|(location, submission_index, mut handle)| async move {
                    match (&mut handle.0).await {
                        Ok(outcome) => outcome,
                        Err(e) => {
                            error!(%location, error = %e, "repository task failed");
                            TaskOutcome::skipped(
                                location,
                                submission_index,
                                SkipReason::TaskAborted(e.to_string()),
                            )
                        }
                    }
                }),
        )
        .await
    }
}

/// Aborts the spawned task when dropped.
///
/// A dropped `handle()` future drops these, so no task outlives its batch
/// workspace or recreates directories under it.
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Everything one repository needs, owned so it can move into a spawned task.
struct RepositoryTask {
    fetcher: Arc<dyn RepositoryFetcher>,
    extractor: Arc<dyn MetricExtractor>,
    aggregator: Arc<QualityTreeAggregator>,
    report_id: ReportId,
    dir: PathBuf,
    location: String,
    submission_index: usize,
    timeout: Duration,
}

impl RepositoryTask {
    async fn run(self) -> TaskOutcome {
        let result = tokio::time::timeout(self.timeout, self.analyze()).await;

        // The clone is only needed until the tree is built
        if let Err(e) = tokio::fs::remove_dir_all(&self.dir).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                debug!(error = %e, dir = %self.dir.display(), "failed to remove repository directory");
            }
        }

        match result {
            Ok(Ok(report)) => TaskOutcome::Analyzed(report),
            Ok(Err(reason)) => TaskOutcome::skipped(self.location, self.submission_index, reason),
            Err(_) => TaskOutcome::skipped(
                self.location,
                self.submission_index,
                SkipReason::TimedOut(self.timeout.as_secs()),
            ),
        }
    }

    async fn analyze(&self) -> Result<RepositoryReport, SkipReason> {
        if !self.fetcher.validate(&self.location) {
            return Err(SkipReason::InvalidLocation);
        }

        debug!("cloning repository");
        self.fetcher.fetch_into(&self.location, &self.dir).await?;

        debug!("extracting metrics");
        let raw_metrics = self.extractor.analyze(&self.dir).await?;

        let quality = self.aggregator.build(&raw_metrics)?;
        debug!(overall = %quality.overall(), "quality tree built");

        Ok(RepositoryReport {
            id: self.report_id,
            location: self.location.clone(),
            submission_index: self.submission_index,
            raw_metrics,
            quality,
        })
    }
}
