//! Leaf normalization against fixed reference ranges.
//!
//! Every mapping is monotonic and lands in [0, 1] with 1.0 meaning "best".
//!
//! | Leaf | Raw unit | Mapping |
//! |------|----------|---------|
//! | comment_rate | % comment lines | higher is better, 0 → 25 |
//! | method_size | avg lines per method | lower is better, 10 → 60 |
//! | duplication | % duplicated lines | lower is better, 0 → 20 |
//! | bug_severity | weighted bug count | saturating, half at 5 |
//! | technical_debt_ratio | % | lower is better, 0 → 50 |
//! | reliability_remediation_effort | minutes | saturating, half at 60 |
//! | cyclomatic_complexity | avg per function | lower is better, 1 → 25 |
//! | cognitive_complexity | avg per function | lower is better, 0 → 30 |
//! | vulnerability_severity | weighted count | saturating, half at 3 |
//! | hotspot_priority | weighted count | saturating, half at 5 |
//! | security_remediation_effort | minutes | saturating, half at 60 |

use super::{QualityAttribute, Score};

/// Mapping from a raw measurement onto a [`Score`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Normalization {
    /// Linear ramp from `floor` (0.0) to `ceiling` (1.0), clamped.
    HigherIsBetter { floor: f64, ceiling: f64 },
    /// Linear ramp from `best` (1.0) down to `worst` (0.0), clamped.
    LowerIsBetter { best: f64, worst: f64 },
    /// `half / (half + raw)`: 1.0 at zero, 0.5 at `half`, tends to 0.
    Saturating { half: f64 },
}

impl Normalization {
    /// Reference mapping for a leaf attribute; `None` for composites and root.
    pub fn for_attribute(attribute: QualityAttribute) -> Option<Self> {
        use QualityAttribute::*;

        let normalization = match attribute {
            CommentRate => Self::HigherIsBetter {
                floor: 0.0,
                ceiling: 25.0,
            },
            MethodSize => Self::LowerIsBetter {
                best: 10.0,
                worst: 60.0,
            },
            Duplication => Self::LowerIsBetter {
                best: 0.0,
                worst: 20.0,
            },
            BugSeverity => Self::Saturating { half: 5.0 },
            TechnicalDebtRatio => Self::LowerIsBetter {
                best: 0.0,
                worst: 50.0,
            },
            ReliabilityRemediationEffort => Self::Saturating { half: 60.0 },
            CyclomaticComplexity => Self::LowerIsBetter {
                best: 1.0,
                worst: 25.0,
            },
            CognitiveComplexity => Self::LowerIsBetter {
                best: 0.0,
                worst: 30.0,
            },
            VulnerabilitySeverity => Self::Saturating { half: 3.0 },
            HotspotPriority => Self::Saturating { half: 5.0 },
            SecurityRemediationEffort => Self::Saturating { half: 60.0 },
            Quality | Comprehension | Simplicity | Maintainability | Reliability | Complexity
            | Security => return None,
        };
        Some(normalization)
    }

    /// Maps a raw, finite, non-negative measurement onto [0, 1].
    pub fn apply(&self, raw: f64) -> Score {
        match *self {
            Self::HigherIsBetter { floor, ceiling } => {
                Score::new((raw - floor) / (ceiling - floor))
            }
            Self::LowerIsBetter { best, worst } => Score::new((worst - raw) / (worst - best)),
            Self::Saturating { half } => Score::new(half / (half + raw)),
        }
    }
}
