//! Metric Extraction Adapters
//!
//! Implementations of the MetricExtractor port.
//!
//! - **CommandMetricExtractor** - Runs an external analysis tool and reads JSON from stdout

mod command_extractor;

pub use command_extractor::CommandMetricExtractor;
