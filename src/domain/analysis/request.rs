//! AnalysisRequest - one immutable batch submission.

use serde::{Deserialize, Serialize};

use super::{Constraint, Preference};
use crate::domain::foundation::ValidationError;

/// Repository locations plus the ranking inputs attached to them.
///
/// Location order is the submission order used for ranking tie-breaks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    locations: Vec<String>,
    constraints: Vec<Constraint>,
    preferences: Vec<Preference>,
}

impl AnalysisRequest {
    /// Creates a validated request.
    ///
    /// # Errors
    ///
    /// - `EmptyField` when no location is given
    /// - `TooMany` when more than `max_locations` are given
    /// - `NotPositive` / `NotFinite` for bad weights or thresholds
    pub fn new(
        locations: Vec<String>,
        constraints: Vec<Constraint>,
        preferences: Vec<Preference>,
        max_locations: usize,
    ) -> Result<Self, ValidationError> {
        if locations.is_empty() {
            return Err(ValidationError::empty_field("locations"));
        }
        if locations.len() > max_locations {
            return Err(ValidationError::too_many(
                "locations",
                max_locations,
                locations.len(),
            ));
        }
        for constraint in &constraints {
            constraint.validate()?;
        }
        for preference in &preferences {
            preference.validate()?;
        }

        Ok(Self {
            locations: locations.into_iter().map(|l| l.trim().to_string()).collect(),
            constraints,
            preferences,
        })
    }

    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn preferences(&self) -> &[Preference] {
        &self.preferences
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quality::QualityAttribute;

    fn locations(n: usize) -> Vec<String> {
        (0..n)
            .map(|i| format!("https://github.com/acme/repo-{}", i))
            .collect()
    }

    #[test]
    fn accepts_valid_request() {
        let pref = Preference::new(QualityAttribute::Security, 1.0).unwrap();
        let request = AnalysisRequest::new(locations(2), vec![], vec![pref], 10).unwrap();
        assert_eq!(request.locations().len(), 2);
        assert_eq!(request.preferences().len(), 1);
        assert!(request.constraints().is_empty());
    }

    #[test]
    fn rejects_empty_locations() {
        let result = AnalysisRequest::new(vec![], vec![], vec![], 10);
        assert!(matches!(result, Err(ValidationError::EmptyField { .. })));
    }

    #[test]
    fn rejects_too_many_locations() {
        let result = AnalysisRequest::new(locations(4), vec![], vec![], 3);
        assert!(matches!(result, Err(ValidationError::TooMany { max: 3, actual: 4, .. })));
    }

    #[test]
    fn rejects_bad_preference_weight() {
        let bad = Preference {
            attribute: QualityAttribute::Security,
            weight: -1.0,
        };
        let result = AnalysisRequest::new(locations(1), vec![], vec![bad], 10);
        assert!(matches!(result, Err(ValidationError::NotPositive { .. })));
    }

    #[test]
    fn trims_locations_and_keeps_order() {
        let request = AnalysisRequest::new(
            vec![" b ".to_string(), "a".to_string()],
            vec![],
            vec![],
            10,
        )
        .unwrap();
        assert_eq!(request.locations(), &["b".to_string(), "a".to_string()]);
    }
}
