//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `git` - Repository fetcher using the git CLI
//! - `metrics` - Metric extractor running an external tool
//! - `storage` - Analysis run persistence (in-memory, YAML files)
//! - `ids` - Identifier generators

pub mod git;
pub mod ids;
pub mod metrics;
pub mod storage;

pub use git::GitCliFetcher;
pub use ids::{SequentialIdGenerator, UuidGenerator};
pub use metrics::CommandMetricExtractor;
pub use storage::{FileAnalysisRepository, InMemoryAnalysisRepository};
