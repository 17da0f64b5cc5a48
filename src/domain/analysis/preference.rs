//! Caller-supplied ranking inputs: weighted preferences and hard constraints.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;
use crate::domain::quality::QualityAttribute;

/// Absolute tolerance used by [`ComparisonOperator::Equal`].
pub const EQUALITY_TOLERANCE: f64 = 1e-9;

/// Relative importance of one attribute when scoring a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preference {
    pub attribute: QualityAttribute,
    pub weight: f64,
}

impl Preference {
    /// Creates a preference, rejecting weights that are not finite and positive.
    pub fn new(attribute: QualityAttribute, weight: f64) -> Result<Self, ValidationError> {
        let preference = Self { attribute, weight };
        preference.validate()?;
        Ok(preference)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(ValidationError::not_positive("weight", self.weight));
        }
        Ok(())
    }
}

/// Parses `attribute=weight`, e.g. `security=1.5`.
impl FromStr for Preference {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (attribute, weight) = s.split_once('=').ok_or_else(|| {
            ValidationError::invalid_format("preference", "expected attribute=weight")
        })?;
        let weight = weight.trim().parse::<f64>().map_err(|e| {
            ValidationError::invalid_format("preference", format!("bad weight: {}", e))
        })?;
        Self::new(attribute.parse()?, weight)
    }
}

/// Comparison used by a [`Constraint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOperator {
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = "=")]
    Equal,
}

impl ComparisonOperator {
    /// Evaluates `value <op> threshold`.
    pub fn evaluate(&self, value: f64, threshold: f64) -> bool {
        match self {
            Self::LessThan => value < threshold,
            Self::LessOrEqual => value <= threshold,
            Self::GreaterThan => value > threshold,
            Self::GreaterOrEqual => value >= threshold,
            Self::Equal => (value - threshold).abs() <= EQUALITY_TOLERANCE,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::LessThan => "<",
            Self::LessOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterOrEqual => ">=",
            Self::Equal => "=",
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Hard filter: reports whose attribute fails the comparison are excluded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub attribute: QualityAttribute,
    pub operator: ComparisonOperator,
    pub threshold: f64,
}

impl Constraint {
    pub fn new(
        attribute: QualityAttribute,
        operator: ComparisonOperator,
        threshold: f64,
    ) -> Result<Self, ValidationError> {
        let constraint = Self {
            attribute,
            operator,
            threshold,
        };
        constraint.validate()?;
        Ok(constraint)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.threshold.is_finite() {
            return Err(ValidationError::not_finite("threshold", self.threshold));
        }
        Ok(())
    }

    /// Checks a node value against this constraint.
    pub fn is_satisfied_by(&self, value: f64) -> bool {
        self.operator.evaluate(value, self.threshold)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.attribute, self.operator, self.threshold)
    }
}

/// Parses `attribute<op>threshold`, e.g. `cyclomatic_complexity<0.3`.
impl FromStr for Constraint {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let start = s.find(|c: char| matches!(c, '<' | '>' | '=')).ok_or_else(|| {
            ValidationError::invalid_format("constraint", "expected attribute<op>threshold")
        })?;
        let (attribute, rest) = s.split_at(start);
        let (operator, threshold) = if let Some(t) = rest.strip_prefix("<=") {
            (ComparisonOperator::LessOrEqual, t)
        } else if let Some(t) = rest.strip_prefix(">=") {
            (ComparisonOperator::GreaterOrEqual, t)
        } else if let Some(t) = rest.strip_prefix('<') {
            (ComparisonOperator::LessThan, t)
        } else if let Some(t) = rest.strip_prefix('>') {
            (ComparisonOperator::GreaterThan, t)
        } else {
            (ComparisonOperator::Equal, &rest[1..])
        };
        let threshold = threshold.trim().parse::<f64>().map_err(|e| {
            ValidationError::invalid_format("constraint", format!("bad threshold: {}", e))
        })?;
        Self::new(attribute.parse()?, operator, threshold)
    }
}
