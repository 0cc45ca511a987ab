//! Composite score for a candidate combination
//!
//! Scores a set of items (one per category) against a user vector by
//! blending four terms:
//!
//! - `sim_global`: mean of cosine and Pearson between the user and the
//!   combo vector (elementwise mean of the items)
//! - `error_score`: `1 - weighted_error(user, combo)`
//! - `min_sim`: the weakest single-item cosine
//! - `min_corr`: the weakest single-item Pearson correlation
//!
//! Mean and min do not depend on item order, so neither does the score.

use crate::distance::{cosine, mean_vector, pearson, weighted_error};
use crate::weights::ScoreWeights;
use serde::{Deserialize, Serialize};

/// Single-item terms against a fixed user vector
///
/// These do not depend on the rest of the combination, so search code
/// computes them once per shortlisted candidate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ItemTerms {
    pub cosine: f32,
    pub pearson: f32,
}

impl ItemTerms {
    pub fn compute(user: &[f32], item: &[f32]) -> Self {
        Self {
            cosine: cosine(user, item),
            pearson: pearson(user, item),
        }
    }
}

/// Per-term values behind a composite score (unweighted) plus the total
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct ScoreBreakdown {
    pub sim_global: f32,
    pub error_score: f32,
    pub min_sim: f32,
    pub min_corr: f32,
    /// Weighted total
    pub score: f32,
}

/// Composite scorer with a fixed set of weights
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CompositeScorer {
    weights: ScoreWeights,
}

impl CompositeScorer {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Composite score of `items` for `user`
    pub fn score(&self, user: &[f32], items: &[&[f32]]) -> f32 {
        self.breakdown(user, items).score
    }

    /// Composite score of `items` for `user`, with every term reported
    ///
    /// An empty item set scores an all-zero breakdown.
    pub fn breakdown(&self, user: &[f32], items: &[&[f32]]) -> ScoreBreakdown {
        let terms: Vec<ItemTerms> = items
            .iter()
            .map(|item| ItemTerms::compute(user, item))
            .collect();
        self.breakdown_with_terms(user, items, &terms)
    }

    /// Like [`CompositeScorer::breakdown`], reusing single-item terms
    /// computed earlier. `terms[i]` must belong to `items[i]`.
    pub fn breakdown_with_terms(
        &self,
        user: &[f32],
        items: &[&[f32]],
        terms: &[ItemTerms],
    ) -> ScoreBreakdown {
        debug_assert_eq!(items.len(), terms.len());
        if items.is_empty() {
            return ScoreBreakdown::default();
        }

        let combo = mean_vector(items);
        let sim_global = (cosine(user, &combo) + pearson(user, &combo)) / 2.0;
        let error_score = 1.0 - weighted_error(user, &combo);
        let min_sim = terms.iter().map(|t| t.cosine).fold(f32::INFINITY, f32::min);
        let min_corr = terms.iter().map(|t| t.pearson).fold(f32::INFINITY, f32::min);

        let w = &self.weights;
        let score = w.sim_global * sim_global
            + w.error * error_score
            + w.min_sim * min_sim
            + w.min_corr * min_corr;

        ScoreBreakdown {
            sim_global,
            error_score,
            min_sim,
            min_corr,
            score,
        }
    }
}

/// Composite score of `items` for `user` under `weights`
pub fn composite_score(user: &[f32], items: &[&[f32]], weights: ScoreWeights) -> f32 {
    CompositeScorer::new(weights).score(user, items)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    fn user() -> Vec<f32> {
        vec![0.9, 0.1, 0.0, 0.6, 0.3, 0.0]
    }

    fn items() -> Vec<Vec<f32>> {
        vec![
            vec![1.0, 0.0, 0.0, 0.5, 0.2, 0.1],
            vec![0.2, 0.3, 0.1, 0.9, 0.0, 0.0],
            vec![0.7, 0.0, 0.4, 0.3, 0.6, 0.2],
        ]
    }

    #[test]
    fn test_perfect_match_scores_weight_sum() {
        let user = user();
        let scorer = CompositeScorer::default();
        let b = scorer.breakdown(&user, &[&user, &user, &user]);
        assert!((b.sim_global - 1.0).abs() < EPS);
        assert!((b.error_score - 1.0).abs() < EPS);
        assert!((b.min_sim - 1.0).abs() < EPS);
        assert!((b.min_corr - 1.0).abs() < EPS);
        assert!((b.score - 1.0).abs() < EPS);
    }

    #[test]
    fn test_terms_match_definition() {
        let user = user();
        let items = items();
        let refs: Vec<&[f32]> = items.iter().map(|v| v.as_slice()).collect();
        let b = CompositeScorer::default().breakdown(&user, &refs);

        let combo = mean_vector(&refs);
        let expected_global = (cosine(&user, &combo) + pearson(&user, &combo)) / 2.0;
        assert_eq!(b.sim_global, expected_global);
        assert_eq!(b.error_score, 1.0 - weighted_error(&user, &combo));

        let min_sim = refs.iter().map(|v| cosine(&user, v)).fold(f32::INFINITY, f32::min);
        let min_corr = refs.iter().map(|v| pearson(&user, v)).fold(f32::INFINITY, f32::min);
        assert_eq!(b.min_sim, min_sim);
        assert_eq!(b.min_corr, min_corr);

        let expected = 0.5 * b.sim_global + 0.2 * b.error_score + 0.15 * b.min_sim + 0.15 * b.min_corr;
        assert!((b.score - expected).abs() < EPS);
    }

    #[test]
    fn test_invariant_to_item_order() {
        let user = user();
        let items = items();
        let (a, b, c) = (items[0].as_slice(), items[1].as_slice(), items[2].as_slice());
        let scorer = CompositeScorer::default();

        let base = scorer.score(&user, &[a, b, c]);
        for perm in [[a, c, b], [b, a, c], [b, c, a], [c, a, b], [c, b, a]] {
            assert!((scorer.score(&user, &perm) - base).abs() < EPS);
        }
    }

    #[test]
    fn test_single_weight_isolates_term() {
        let user = user();
        let items = items();
        let refs: Vec<&[f32]> = items.iter().map(|v| v.as_slice()).collect();

        let b = CompositeScorer::default().breakdown(&user, &refs);
        let only_global = composite_score(&user, &refs, ScoreWeights::new(1.0, 0.0, 0.0, 0.0));
        assert_eq!(only_global, b.sim_global);
        let only_min_corr = composite_score(&user, &refs, ScoreWeights::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(only_min_corr, b.min_corr);
    }

    #[test]
    fn test_degenerate_user_stays_finite() {
        let zero = vec![0.0f32; 6];
        let constant = vec![0.4f32; 6];
        let items = items();
        let refs: Vec<&[f32]> = items.iter().map(|v| v.as_slice()).collect();
        let scorer = CompositeScorer::default();

        let b = scorer.breakdown(&zero, &refs);
        assert_eq!(b.sim_global, 0.0);
        assert_eq!(b.error_score, 1.0);
        assert_eq!(b.min_sim, 0.0);
        assert_eq!(b.min_corr, 0.0);
        assert!((b.score - 0.2).abs() < EPS);

        let b = scorer.breakdown(&constant, &refs);
        assert!(b.score.is_finite());
        assert_eq!(b.min_corr, 0.0);
    }

    #[test]
    fn test_precomputed_terms_are_bit_identical() {
        let user = user();
        let items = items();
        let refs: Vec<&[f32]> = items.iter().map(|v| v.as_slice()).collect();
        let terms: Vec<ItemTerms> = refs.iter().map(|v| ItemTerms::compute(&user, v)).collect();
        let scorer = CompositeScorer::default();

        assert_eq!(
            scorer.breakdown(&user, &refs),
            scorer.breakdown_with_terms(&user, &refs, &terms)
        );
    }

    #[test]
    fn test_empty_items() {
        let b = CompositeScorer::default().breakdown(&user(), &[]);
        assert_eq!(b, ScoreBreakdown::default());
    }
}
