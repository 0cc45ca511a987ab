//! Request results handed to the rendering side

use crate::optimizer::RankedCombination;
use kitx_similarity::ScoreBreakdown;
use serde::Serialize;

/// The item chosen for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub category: String,
    pub identifier: String,
    /// Cosine similarity of this item alone to the profile
    pub similarity: f32,
}

/// Exactly one selected item per requested category, in request order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Combination {
    selections: Vec<Selection>,
}

impl Combination {
    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    /// Identifier chosen for `category`
    pub fn get(&self, category: &str) -> Option<&str> {
        self.selections
            .iter()
            .find(|s| s.category == category)
            .map(|s| s.identifier.as_str())
    }

    /// `(category, identifier)` pairs in request order
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.selections
            .iter()
            .map(|s| (s.category.as_str(), s.identifier.as_str()))
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}

/// A complete recommendation: the combination, its score and how it was reached
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCombination {
    pub combination: Combination,
    pub score: f32,
    pub breakdown: ScoreBreakdown,
    /// Combinations scored to find this one
    pub evaluated: u64,
}

impl ScoredCombination {
    pub(crate) fn from_ranked(ranked: &RankedCombination<'_>, evaluated: u64) -> Self {
        let selections = ranked
            .members
            .iter()
            .map(|candidate| Selection {
                category: candidate.item.category().to_string(),
                identifier: candidate.item.identifier().to_string(),
                similarity: candidate.similarity(),
            })
            .collect();

        Self {
            combination: Combination { selections },
            score: ranked.breakdown.score,
            breakdown: ranked.breakdown,
            evaluated,
        }
    }
}
