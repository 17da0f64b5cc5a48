//! Quality Tree Aggregator - builds the normalized attribute tree.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use super::{Normalization, QualityAttribute, QualityMetricNode, QualityTree, RawMetrics, Score};

/// Errors raised while turning raw measurements into a tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QualityError {
    #[error("Raw metric '{0}' is missing")]
    MissingMetric(QualityAttribute),

    #[error("Raw metric '{attribute}' must be finite and non-negative, got {value}")]
    InvalidMetric {
        attribute: QualityAttribute,
        value: f64,
    },

    #[error("Aggregation weight for '{attribute}' must be finite and positive, got {weight}")]
    InvalidWeight {
        attribute: QualityAttribute,
        weight: f64,
    },
}

/// How a composite node combines its children.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationStrategy {
    /// Unweighted arithmetic mean.
    #[default]
    Mean,
    /// Weighted mean; children without an entry weigh 1.0.
    WeightedMean(BTreeMap<QualityAttribute, f64>),
}

impl AggregationStrategy {
    fn weight(&self, attribute: QualityAttribute) -> f64 {
        match self {
            Self::Mean => 1.0,
            Self::WeightedMean(weights) => weights.get(&attribute).copied().unwrap_or(1.0),
        }
    }

    fn combine(&self, children: &[QualityMetricNode]) -> Score {
        let (sum, total_weight) = children.iter().fold((0.0, 0.0), |(sum, total), child| {
            let w = self.weight(child.attribute);
            (sum + w * child.value.value(), total + w)
        });
        if total_weight == 0.0 {
            return Score::ZERO;
        }
        Score::new(sum / total_weight)
    }
}

/// Builds [`QualityTree`]s from [`RawMetrics`].
///
/// Pure and deterministic: the same input always yields bit-identical scores,
/// since children are combined in the fixed attribute order.
#[derive(Debug, Clone, Default)]
pub struct QualityTreeAggregator {
    strategy: AggregationStrategy,
}

impl QualityTreeAggregator {
    /// Aggregator using the unweighted mean.
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregator using a custom strategy; weights are validated up front.
    pub fn with_strategy(strategy: AggregationStrategy) -> Result<Self, QualityError> {
        if let AggregationStrategy::WeightedMean(weights) = &strategy {
            if let Some((attribute, weight)) = weights
                .iter()
                .find(|(_, w)| !w.is_finite() || **w <= 0.0)
            {
                return Err(QualityError::InvalidWeight {
                    attribute: *attribute,
                    weight: *weight,
                });
            }
        }
        Ok(Self { strategy })
    }

    pub fn strategy(&self) -> &AggregationStrategy {
        &self.strategy
    }

    /// Builds the fixed three-level tree.
    ///
    /// # Errors
    ///
    /// - `MissingMetric` if a leaf's raw measurement is absent
    /// - `InvalidMetric` if a measurement is negative or not finite
    pub fn build(&self, raw: &RawMetrics) -> Result<QualityTree, QualityError> {
        let composites = QualityAttribute::composites()
            .iter()
            .map(|composite| {
                let leaves = composite
                    .leaves()
                    .iter()
                    .map(|leaf| self.build_leaf(*leaf, raw))
                    .collect::<Result<Vec<_>, _>>()?;
                let value = self.strategy.combine(&leaves);
                Ok(QualityMetricNode::composite(*composite, value, leaves))
            })
            .collect::<Result<Vec<_>, QualityError>>()?;

        let overall = self.strategy.combine(&composites);
        Ok(QualityTree::from_root(QualityMetricNode::composite(
            QualityAttribute::Quality,
            overall,
            composites,
        )))
    }

    fn build_leaf(
        &self,
        attribute: QualityAttribute,
        raw: &RawMetrics,
    ) -> Result<QualityMetricNode, QualityError> {
        let value = raw
            .get(attribute.key())
            .ok_or(QualityError::MissingMetric(attribute))?;
        if !value.is_finite() || value < 0.0 {
            return Err(QualityError::InvalidMetric { attribute, value });
        }
        // Every leaf has a reference range; a composite here would be a hierarchy bug.
        let score = Normalization::for_attribute(attribute)
            .map(|n| n.apply(value))
            .unwrap_or(Score::ZERO);
        Ok(QualityMetricNode::leaf(attribute, score))
    }
}
