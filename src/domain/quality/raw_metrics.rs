//! Raw measurements produced by the external metric extractor.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Flat mapping from metric name to measured value.
///
/// Ordered so serialized reports are byte-stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawMetrics(BTreeMap<String, f64>);

impl RawMetrics {
    /// Creates an empty metric set.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Returns a copy with one more measurement.
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.0.insert(name.into(), value);
        self
    }

    /// Looks up a measurement by name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    /// Iterates measurements in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for RawMetrics {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_adds_measurement() {
        let metrics = RawMetrics::new().with("duplication", 3.5);
        assert_eq!(metrics.get("duplication"), Some(3.5));
        assert_eq!(metrics.get("missing"), None);
        assert_eq!(metrics.len(), 1);
    }

    #[test]
    fn deserializes_flat_json_object() {
        let metrics: RawMetrics =
            serde_json::from_str(r#"{"method_size": 12.0, "comment_rate": 20}"#).unwrap();
        assert_eq!(metrics.get("comment_rate"), Some(20.0));
        let names: Vec<_> = metrics.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["comment_rate", "method_size"]);
    }
}
