//! Storage Adapters
//!
//! Implementations of the AnalysisRepository port.
//!
//! ## Available Adapters
//!
//! - **InMemoryAnalysisRepository** - Keeps runs in memory (testing/development)
//! - **FileAnalysisRepository** - One YAML document per run on disk
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileAnalysisRepository, InMemoryAnalysisRepository};
//!
//! // Durable: survives restarts
//! let repo = FileAnalysisRepository::new("./data/runs");
//!
//! // Testing: in-memory storage
//! let repo = InMemoryAnalysisRepository::new();
//! ```

mod file_analysis_repository;
mod in_memory_analysis_repository;
mod stored_run;

pub use file_analysis_repository::FileAnalysisRepository;
pub use in_memory_analysis_repository::InMemoryAnalysisRepository;
