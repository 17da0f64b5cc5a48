//! Quality Module - Normalized, hierarchical quality trees.
//!
//! # Components
//!
//! - `QualityAttribute` - Fixed set of tree tags (root, six composites, leaves)
//! - `Normalization` - Reference ranges mapping raw measurements onto [0, 1]
//! - `QualityTreeAggregator` - Builds a `QualityTree` from `RawMetrics`
//! - `QualityTree` - Immutable tree plus tag index for O(1) lookups
//!
//! All functions here are pure; no ports are involved.

mod aggregator;
mod attribute;
mod normalization;
mod raw_metrics;
mod score;
mod tree;

pub use aggregator::{AggregationStrategy, QualityError, QualityTreeAggregator};
pub use attribute::QualityAttribute;
pub use normalization::Normalization;
pub use raw_metrics::RawMetrics;
pub use score::Score;
pub use tree::{QualityMetricNode, QualityTree};
