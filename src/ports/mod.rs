//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Ingestion Ports
//!
//! - `RepositoryFetcher` - Validates and clones repository locations
//! - `MetricExtractor` - External static-analysis tool producing raw metrics
//! - `IdGenerator` - Identifier source for working directories
//!
//! ## Persistence Ports
//!
//! - `AnalysisRepository` - Runs, reports, preferences and constraints

mod analysis_repository;
mod id_generator;
mod metric_extractor;
mod repository_fetcher;

pub use analysis_repository::{AnalysisRepository, RunWriteSet};
pub use id_generator::IdGenerator;
pub use metric_extractor::{ExtractionError, MetricExtractor};
pub use repository_fetcher::{FetchError, RepositoryFetcher};
