//! Ranking Engine - constraint filtering, weighted scoring, stable ordering.

use crate::domain::quality::QualityTree;

use super::{AnalysisResult, Constraint, Preference, RankedReport, RepositoryReport};

/// Stateless ranking functions.
///
/// Nothing here holds state, so any number of readers may rank the same or
/// different trees concurrently.
pub struct RankingEngine;

impl RankingEngine {
    /// Checks every constraint against the tree.
    ///
    /// An attribute missing from the tree fails its constraint, so the report
    /// is excluded rather than ranked on partial information.
    pub fn satisfies(tree: &QualityTree, constraints: &[Constraint]) -> bool {
        constraints.iter().all(|constraint| {
            tree.value(constraint.attribute)
                .map(|score| constraint.is_satisfied_by(score.value()))
                .unwrap_or(false)
        })
    }

    /// Weighted sum of preferred attribute values.
    ///
    /// # Edge Cases
    /// - No preferences: the overall quality (root) value
    /// - Attribute missing from the tree: contributes zero
    pub fn score(tree: &QualityTree, preferences: &[Preference]) -> f64 {
        if preferences.is_empty() {
            return tree.overall().value();
        }
        preferences
            .iter()
            .filter_map(|p| tree.value(p.attribute).map(|score| p.weight * score.value()))
            .sum()
    }

    /// Rank of a single tree, or `None` when it fails a constraint.
    pub fn rank(
        tree: &QualityTree,
        preferences: &[Preference],
        constraints: &[Constraint],
    ) -> Option<f64> {
        if !Self::satisfies(tree, constraints) {
            return None;
        }
        Some(Self::score(tree, preferences))
    }

    /// Filters, scores and orders reports.
    ///
    /// Input order does not matter: reports are first put in submission order,
    /// then stably sorted by rank descending so equal ranks keep that order.
    pub fn order(
        mut reports: Vec<RepositoryReport>,
        preferences: &[Preference],
        constraints: &[Constraint],
    ) -> AnalysisResult {
        reports.sort_by_key(|r| r.submission_index);
        let total = reports.len();

        let mut ranked: Vec<RankedReport> = reports
            .into_iter()
            .filter_map(|report| {
                Self::rank(&report.quality, preferences, constraints)
                    .map(|rank| RankedReport { report, rank })
            })
            .collect();

        // slice::sort_by is stable
        ranked.sort_by(|a, b| b.rank.total_cmp(&a.rank));

        AnalysisResult {
            excluded: total - ranked.len(),
            reports: ranked,
        }
    }
}
