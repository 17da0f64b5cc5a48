//! QualityAttribute enum naming every node of the quality tree.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Attribute tags of the quality tree.
///
/// `Quality` is the synthetic root, the next six are the composite level,
/// the remainder are leaves derived from raw measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityAttribute {
    Quality,
    Comprehension,
    Simplicity,
    Maintainability,
    Reliability,
    Complexity,
    Security,
    CommentRate,
    MethodSize,
    Duplication,
    BugSeverity,
    TechnicalDebtRatio,
    ReliabilityRemediationEffort,
    CyclomaticComplexity,
    CognitiveComplexity,
    VulnerabilitySeverity,
    HotspotPriority,
    SecurityRemediationEffort,
}

impl QualityAttribute {
    /// Returns all attributes in canonical (root, composites, leaves) order.
    pub fn all() -> &'static [QualityAttribute] {
        &[
            QualityAttribute::Quality,
            QualityAttribute::Comprehension,
            QualityAttribute::Simplicity,
            QualityAttribute::Maintainability,
            QualityAttribute::Reliability,
            QualityAttribute::Complexity,
            QualityAttribute::Security,
            QualityAttribute::CommentRate,
            QualityAttribute::MethodSize,
            QualityAttribute::Duplication,
            QualityAttribute::BugSeverity,
            QualityAttribute::TechnicalDebtRatio,
            QualityAttribute::ReliabilityRemediationEffort,
            QualityAttribute::CyclomaticComplexity,
            QualityAttribute::CognitiveComplexity,
            QualityAttribute::VulnerabilitySeverity,
            QualityAttribute::HotspotPriority,
            QualityAttribute::SecurityRemediationEffort,
        ]
    }

    /// The composite attributes directly below the root.
    pub fn composites() -> &'static [QualityAttribute] {
        &[
            QualityAttribute::Comprehension,
            QualityAttribute::Simplicity,
            QualityAttribute::Maintainability,
            QualityAttribute::Reliability,
            QualityAttribute::Complexity,
            QualityAttribute::Security,
        ]
    }

    /// Leaf attributes grouped under this composite. Empty for leaves and the root.
    pub fn leaves(&self) -> &'static [QualityAttribute] {
        match self {
            QualityAttribute::Comprehension => &[QualityAttribute::CommentRate],
            QualityAttribute::Simplicity => &[QualityAttribute::MethodSize],
            QualityAttribute::Maintainability => &[QualityAttribute::Duplication],
            QualityAttribute::Reliability => &[
                QualityAttribute::BugSeverity,
                QualityAttribute::TechnicalDebtRatio,
                QualityAttribute::ReliabilityRemediationEffort,
            ],
            QualityAttribute::Complexity => &[
                QualityAttribute::CyclomaticComplexity,
                QualityAttribute::CognitiveComplexity,
            ],
            QualityAttribute::Security => &[
                QualityAttribute::VulnerabilitySeverity,
                QualityAttribute::HotspotPriority,
                QualityAttribute::SecurityRemediationEffort,
            ],
            _ => &[],
        }
    }

    /// Returns true for attributes computed directly from a raw measurement.
    pub fn is_leaf(&self) -> bool {
        *self != QualityAttribute::Quality && !Self::composites().contains(self)
    }

    /// Snake-case key, identical to the raw metric name for leaves.
    pub fn key(&self) -> &'static str {
        match self {
            QualityAttribute::Quality => "quality",
            QualityAttribute::Comprehension => "comprehension",
            QualityAttribute::Simplicity => "simplicity",
            QualityAttribute::Maintainability => "maintainability",
            QualityAttribute::Reliability => "reliability",
            QualityAttribute::Complexity => "complexity",
            QualityAttribute::Security => "security",
            QualityAttribute::CommentRate => "comment_rate",
            QualityAttribute::MethodSize => "method_size",
            QualityAttribute::Duplication => "duplication",
            QualityAttribute::BugSeverity => "bug_severity",
            QualityAttribute::TechnicalDebtRatio => "technical_debt_ratio",
            QualityAttribute::ReliabilityRemediationEffort => "reliability_remediation_effort",
            QualityAttribute::CyclomaticComplexity => "cyclomatic_complexity",
            QualityAttribute::CognitiveComplexity => "cognitive_complexity",
            QualityAttribute::VulnerabilitySeverity => "vulnerability_severity",
            QualityAttribute::HotspotPriority => "hotspot_priority",
            QualityAttribute::SecurityRemediationEffort => "security_remediation_effort",
        }
    }
}

impl fmt::Display for QualityAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for QualityAttribute {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|attr| attr.key() == wanted)
            .ok_or_else(|| {
                ValidationError::invalid_format("attribute", format!("unknown attribute '{}'", s))
            })
    }
}
