//! Quality tree aggregation configuration

use serde::Deserialize;
use std::collections::BTreeMap;

use super::error::ValidationError;
use crate::domain::quality::{AggregationStrategy, QualityAttribute};

/// Aggregation configuration
///
/// With no weights, composites use the unweighted mean. Otherwise `weights`
/// holds `attribute=weight` pairs, e.g. `security=2,duplication=0.5`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AggregationConfig {
    pub weights: Option<String>,
}

impl AggregationConfig {
    /// Parse the configured weights into a strategy
    pub fn strategy(&self) -> Result<AggregationStrategy, ValidationError> {
        let Some(raw) = self.weights.as_deref().filter(|s| !s.trim().is_empty()) else {
            return Ok(AggregationStrategy::Mean);
        };

        let mut weights = BTreeMap::new();
        for pair in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (name, weight) = pair
                .split_once('=')
                .ok_or_else(|| ValidationError::InvalidWeights(pair.to_string()))?;
            let attribute: QualityAttribute = name
                .parse()
                .map_err(|_| ValidationError::InvalidWeights(pair.to_string()))?;
            let weight: f64 = weight
                .trim()
                .parse()
                .map_err(|_| ValidationError::InvalidWeights(pair.to_string()))?;
            if !weight.is_finite() || weight <= 0.0 {
                return Err(ValidationError::InvalidWeights(pair.to_string()));
            }
            weights.insert(attribute, weight);
        }
        Ok(AggregationStrategy::WeightedMean(weights))
    }

    /// Validate aggregation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.strategy().map(|_| ())
    }
}
