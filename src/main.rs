//! repo-quality: analyze and rank repositories by code quality
//!
//! Configuration comes from `REPO_QUALITY__*` environment variables (or a
//! `.env` file). Results go to stdout as JSON; logs go to stderr.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use repo_quality::adapters::{
    CommandMetricExtractor, FileAnalysisRepository, GitCliFetcher, InMemoryAnalysisRepository,
    UuidGenerator,
};
use repo_quality::application::{
    AnalysisError, GetAnalysisResultHandler, GetAnalysisResultQuery, GetReportHandler,
    GetReportQuery, IngestionSettings, SubmitAnalysisCommand, SubmitAnalysisHandler,
};
use repo_quality::config::{AppConfig, LogFormat, LoggingConfig, StorageBackend};
use repo_quality::domain::analysis::{Constraint, Preference};
use repo_quality::domain::foundation::{OwnerId, ReportId, RunId};
use repo_quality::domain::quality::QualityTreeAggregator;
use repo_quality::ports::AnalysisRepository;

#[derive(Parser)]
#[command(name = "repo-quality")]
#[command(version, about = "Analyze and rank repositories by code quality", long_about = None)]
#[command(after_help = "EXAMPLES:
    # Rank two repositories, favoring security
    repo-quality analyze --prefer security=2 \\
        https://github.com/acme/widgets https://github.com/acme/gadgets

    # Exclude anything with poor cyclomatic complexity
    repo-quality analyze --constraint 'cyclomatic_complexity>=0.5' https://github.com/acme/widgets

    # Re-rank a stored run (file storage)
    REPO_QUALITY__STORAGE__BACKEND=file repo-quality result <run-id>")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a batch of repositories and store the run
    Analyze(AnalyzeArgs),

    /// Print the ranked result of a stored run
    Result {
        /// Run identifier printed by `analyze`
        run_id: RunId,
    },

    /// Print a single stored repository report
    Report {
        report_id: ReportId,
    },
}

/// Arguments for the `analyze` subcommand
#[derive(Args)]
struct AnalyzeArgs {
    /// Owner recorded on the run
    #[arg(long, env = "REPO_QUALITY_OWNER", default_value = "local")]
    owner: String,

    /// Ranking weight, e.g. `security=2` (repeatable)
    #[arg(long = "prefer", value_name = "ATTR=WEIGHT")]
    preferences: Vec<Preference>,

    /// Hard filter, e.g. `complexity>=0.4` (repeatable)
    #[arg(long = "constraint", value_name = "ATTR<OP>VALUE")]
    constraints: Vec<Constraint>,

    /// Repository URLs, in submission order
    #[arg(required = true)]
    locations: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;
    init_tracing(&config.logging);

    let repository: Arc<dyn AnalysisRepository> = match config.storage.backend {
        StorageBackend::Memory => Arc::new(InMemoryAnalysisRepository::new()),
        StorageBackend::File => Arc::new(FileAnalysisRepository::new(&config.storage.data_dir)),
    };

    match cli.command {
        Commands::Analyze(args) => analyze(&config, repository, args).await,
        Commands::Result { run_id } => print_result(repository, run_id).await,
        Commands::Report { report_id } => {
            let handler = GetReportHandler::new(repository);
            let report = handler
                .handle(GetReportQuery { report_id })
                .await
                .map_err(user_error)?;
            print_json(&report)
        }
    }
}

async fn analyze(
    config: &AppConfig,
    repository: Arc<dyn AnalysisRepository>,
    args: AnalyzeArgs,
) -> Result<()> {
    let aggregator = QualityTreeAggregator::with_strategy(config.aggregation.strategy()?)?;
    let handler = SubmitAnalysisHandler::new(
        Arc::new(GitCliFetcher::from_config(&config.git)),
        Arc::new(CommandMetricExtractor::from_config(&config.extractor)),
        Arc::clone(&repository),
        Arc::new(UuidGenerator::new()),
        IngestionSettings::from_config(&config.ingestion),
    )
    .with_aggregator(aggregator);

    let command = SubmitAnalysisCommand {
        owner_id: OwnerId::new(args.owner)?,
        locations: args.locations,
        constraints: args.constraints,
        preferences: args.preferences,
    };

    let outcome = match handler.handle(command).await {
        Ok(outcome) => outcome,
        Err(AnalysisError::AllRepositoriesFailed { skipped }) => {
            for s in &skipped {
                eprintln!("  {} ({}): {}", s.location, s.kind, s.reason);
            }
            return Err(user_error(AnalysisError::AllRepositoriesFailed { skipped }));
        }
        Err(e) => return Err(user_error(e)),
    };

    print_json(&serde_json::json!({
        "run_id": outcome.run_id,
        "analyzed": outcome.analyzed,
        "skipped": outcome.skipped,
    }))?;

    // Nothing outlives this process with in-memory storage; show the ranking now
    if !config.storage.is_durable() {
        print_result(repository, outcome.run_id).await?;
    }
    Ok(())
}

async fn print_result(repository: Arc<dyn AnalysisRepository>, run_id: RunId) -> Result<()> {
    let handler = GetAnalysisResultHandler::new(repository);
    let view = handler
        .handle(GetAnalysisResultQuery { run_id })
        .await
        .map_err(user_error)?;
    print_json(&serde_json::json!({
        "run": view.run,
        "result": view.result,
    }))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn user_error(err: AnalysisError) -> anyhow::Error {
    anyhow::anyhow!("[{}] {}", err.code(), err.message())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let registry = tracing_subscriber::registry().with(filter);

    match logging.format {
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}
