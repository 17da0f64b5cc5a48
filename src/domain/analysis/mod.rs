//! Analysis Module - Requests, reports and the ranking engine.
//!
//! # Components
//!
//! - `AnalysisRequest` - Validated batch of locations plus ranking inputs
//! - `Preference` / `Constraint` - Weighted scoring inputs and hard filters
//! - `RepositoryReport` - Canonical stored state (tree + raw metrics)
//! - `RankingEngine` - Pure filter/score/order over reports
//!
//! Ranks are recomputed on every read and never persisted, so a change to the
//! scoring formula needs no data migration.

mod preference;
mod ranking;
mod report;
mod request;

pub use preference::{ComparisonOperator, Constraint, Preference, EQUALITY_TOLERANCE};
pub use ranking::RankingEngine;
pub use report::{AnalysisResult, AnalysisRun, RankedReport, RepositoryReport};
pub use request::AnalysisRequest;
