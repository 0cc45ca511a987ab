//! Exhaustive search over the Cartesian product of shortlists
//!
//! Combinations are enumerated as if by nested loops, first category
//! outermost. Each combination gets an ordinal (its position in that order)
//! and ties on score go to the lower ordinal, so the first combination
//! encountered wins. Because the ordering is total, scoring can be split
//! across the rayon pool without changing the result.
//!
//! The optimum is over the shortlisted candidates only. An item that was cut
//! from its category's shortlist is never considered, even if it would have
//! produced a better joint score.

use crate::selector::Candidate;
use kitx_core::{FeatureVector, ResourceError, Result};
use kitx_similarity::{CompositeScorer, ItemTerms, ScoreBreakdown};
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use smallvec::SmallVec;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Inline capacity for per-combination buffers; most requests have three or four slots
type Slots<T> = SmallVec<[T; 4]>;

/// Candidates for one requested category
#[derive(Debug, Clone)]
pub struct Shortlist<'a> {
    pub category: &'a str,
    pub candidates: Vec<Candidate<'a>>,
}

impl<'a> Shortlist<'a> {
    pub fn new(category: &'a str, candidates: Vec<Candidate<'a>>) -> Self {
        Self { category, candidates }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// One combination from the search, with its score terms
#[derive(Debug, Clone)]
pub struct RankedCombination<'a> {
    /// One candidate per shortlist, in shortlist order
    pub members: Vec<Candidate<'a>>,
    pub breakdown: ScoreBreakdown,
    /// Position in nested-iteration order
    pub ordinal: u64,
}

impl<'a> RankedCombination<'a> {
    pub fn score(&self) -> f32 {
        self.breakdown.score
    }
}

/// Result of a search: best combinations first
#[derive(Debug, Clone)]
pub struct SearchOutcome<'a> {
    pub ranked: Vec<RankedCombination<'a>>,
    /// Number of combinations scored
    pub evaluated: u64,
}

impl<'a> SearchOutcome<'a> {
    pub fn best(&self) -> Option<&RankedCombination<'a>> {
        self.ranked.first()
    }

    pub fn into_best(self) -> Option<RankedCombination<'a>> {
        self.ranked.into_iter().next()
    }
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    key: f32,
    ordinal: u64,
    breakdown: ScoreBreakdown,
}

impl Entry {
    /// Higher score ranks first, then the earlier ordinal
    fn rank(&self) -> (OrderedFloat<f32>, Reverse<u64>) {
        (OrderedFloat(self.key), Reverse(self.ordinal))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.rank() == other.rank()
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

/// Bounded min-heap of the best entries seen so far; the root is the worst kept
#[derive(Debug, Clone)]
struct TopK {
    k: usize,
    heap: BinaryHeap<Reverse<Entry>>,
}

impl TopK {
    fn new(k: usize) -> Self {
        Self {
            k,
            heap: BinaryHeap::with_capacity(k.min(64) + 1),
        }
    }

    fn offer(&mut self, entry: Entry) {
        if self.heap.len() < self.k {
            self.heap.push(Reverse(entry));
        } else if let Some(mut worst) = self.heap.peek_mut() {
            if entry > worst.0 {
                *worst = Reverse(entry);
            }
        }
    }

    fn merge(mut self, other: TopK) -> TopK {
        for Reverse(entry) in other.heap {
            self.offer(entry);
        }
        self
    }

    /// Kept entries, best first
    fn into_sorted(self) -> Vec<Entry> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(entry)| entry)
            .collect()
    }
}

/// Exhaustive combination search
#[derive(Debug, Clone)]
pub struct ComboOptimizer {
    scorer: CompositeScorer,
    max_combinations: Option<u64>,
    parallel_threshold: u64,
}

impl ComboOptimizer {
    pub fn new(scorer: CompositeScorer) -> Self {
        Self {
            scorer,
            max_combinations: None,
            parallel_threshold: u64::MAX,
        }
    }

    /// Refuse searches larger than `limit` combinations
    pub fn with_limit(mut self, limit: Option<u64>) -> Self {
        self.max_combinations = limit;
        self
    }

    /// Score on the rayon pool once the search space reaches `threshold`
    pub fn with_parallel_threshold(mut self, threshold: u64) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn scorer(&self) -> &CompositeScorer {
        &self.scorer
    }

    /// Number of combinations in the product of `shortlists`, saturating at `u64::MAX`
    pub fn search_space(shortlists: &[Shortlist<'_>]) -> u64 {
        shortlists
            .iter()
            .fold(1u64, |acc, s| acc.saturating_mul(s.len() as u64))
    }

    /// Best-scoring combination
    pub fn search<'a>(
        &self,
        profile: &FeatureVector,
        shortlists: &[Shortlist<'a>],
    ) -> Result<SearchOutcome<'a>> {
        self.search_ranked(profile, shortlists, 1)
    }

    /// The `k` best combinations, best first
    ///
    /// Fails with [`ResourceError::SearchSpaceTooLarge`] before scoring
    /// anything when the product exceeds the configured limit. An empty
    /// shortlist, or no shortlists at all, yields an empty outcome.
    pub fn search_ranked<'a>(
        &self,
        profile: &FeatureVector,
        shortlists: &[Shortlist<'a>],
        k: usize,
    ) -> Result<SearchOutcome<'a>> {
        let total = Self::search_space(shortlists);
        if let Some(limit) = self.max_combinations {
            if total > limit {
                return Err(ResourceError::SearchSpaceTooLarge {
                    combinations: total,
                    limit,
                }
                .into());
            }
        }

        if shortlists.is_empty() || total == 0 || k == 0 {
            return Ok(SearchOutcome {
                ranked: Vec::new(),
                evaluated: 0,
            });
        }

        let user = profile.as_slice();
        let top = if total >= self.parallel_threshold {
            (0..total)
                .into_par_iter()
                .fold(
                    || TopK::new(k),
                    |mut top, ordinal| {
                        top.offer(self.evaluate(user, shortlists, ordinal));
                        top
                    },
                )
                .reduce(|| TopK::new(k), TopK::merge)
        } else {
            (0..total).fold(TopK::new(k), |mut top, ordinal| {
                top.offer(self.evaluate(user, shortlists, ordinal));
                top
            })
        };

        let ranked = top
            .into_sorted()
            .into_iter()
            .map(|entry| RankedCombination {
                members: decode(shortlists, entry.ordinal)
                    .into_iter()
                    .zip(shortlists)
                    .map(|(i, list)| list.candidates[i])
                    .collect(),
                breakdown: entry.breakdown,
                ordinal: entry.ordinal,
            })
            .collect();

        Ok(SearchOutcome {
            ranked,
            evaluated: total,
        })
    }

    fn evaluate(&self, user: &[f32], shortlists: &[Shortlist<'_>], ordinal: u64) -> Entry {
        let indices = decode(shortlists, ordinal);
        let mut vectors: Slots<&[f32]> = SmallVec::with_capacity(indices.len());
        let mut terms: Slots<ItemTerms> = SmallVec::with_capacity(indices.len());
        for (&i, list) in indices.iter().zip(shortlists) {
            let candidate = &list.candidates[i];
            vectors.push(candidate.item.vector().as_slice());
            terms.push(candidate.terms);
        }

        let breakdown = self.scorer.breakdown_with_terms(user, &vectors, &terms);
        // A NaN score can never win
        let key = if breakdown.score.is_nan() {
            f32::NEG_INFINITY
        } else {
            breakdown.score
        };
        Entry {
            key,
            ordinal,
            breakdown,
        }
    }
}

/// Mixed-radix decode of an ordinal into one index per shortlist, last shortlist fastest
fn decode(shortlists: &[Shortlist<'_>], ordinal: u64) -> Slots<usize> {
    let mut indices: Slots<usize> = SmallVec::from_elem(0, shortlists.len());
    let mut rest = ordinal;
    for (slot, list) in shortlists.iter().enumerate().rev() {
        let radix = list.len() as u64;
        indices[slot] = (rest % radix) as usize;
        rest /= radix;
    }
    indices
}
