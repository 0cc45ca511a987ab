//! Per-category shortlisting

use kitx_core::{FeatureVector, Item};
use kitx_similarity::{cosine, pearson, ItemTerms};
use ordered_float::OrderedFloat;
use std::cmp::Reverse;

/// A shortlisted item with its single-item terms against the profile
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub item: &'a Item,
    /// Position of the item inside its category
    pub position: usize,
    pub terms: ItemTerms,
}

impl<'a> Candidate<'a> {
    /// Cosine similarity of the item to the profile
    pub fn similarity(&self) -> f32 {
        self.terms.cosine
    }
}

/// Narrows a category to the items most similar to the profile
#[derive(Debug, Clone, Copy, Default)]
pub struct CandidateSelector;

impl CandidateSelector {
    pub fn new() -> Self {
        Self
    }

    /// The `n` items with the highest cosine similarity to `profile`
    ///
    /// Ties keep the order of `items`. Returns fewer than `n` candidates when
    /// the category is smaller, and none for an empty slice.
    pub fn top_n<'a>(
        &self,
        profile: &FeatureVector,
        items: &'a [Item],
        n: usize,
    ) -> Vec<Candidate<'a>> {
        let user = profile.as_slice();
        let mut ranked: Vec<(usize, f32)> = items
            .iter()
            .enumerate()
            .map(|(position, item)| (position, cosine(user, item.vector().as_slice())))
            .collect();

        // Stable sort: equal similarities stay in catalog order
        ranked.sort_by_key(|&(_, similarity)| Reverse(OrderedFloat(similarity)));
        ranked.truncate(n);

        ranked
            .into_iter()
            .map(|(position, similarity)| {
                let item = &items[position];
                let terms = ItemTerms {
                    cosine: similarity,
                    pearson: pearson(user, item.vector().as_slice()),
                };
                Candidate { item, position, terms }
            })
            .collect()
    }
}

/// Shortlist of the `n` items most similar to `profile`
pub fn top_n<'a>(profile: &FeatureVector, items: &'a [Item], n: usize) -> Vec<Candidate<'a>> {
    CandidateSelector.top_n(profile, items, n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitx_core::{Catalog, ItemRecord};

    fn catalog(records: Vec<(&str, Vec<f32>)>) -> Catalog {
        Catalog::from_records(
            records
                .into_iter()
                .map(|(id, v)| ItemRecord::new("Head", id, v)),
        )
        .unwrap()
    }

    fn ids(candidates: &[Candidate<'_>]) -> Vec<String> {
        candidates
            .iter()
            .map(|c| c.item.identifier().to_string())
            .collect()
    }

    #[test]
    fn test_picks_most_similar() {
        let catalog = catalog(vec![("h1", vec![1.0, 0.0, 0.0]), ("h2", vec![0.0, 1.0, 0.0])]);
        let items = catalog.require("Head").unwrap().items();
        let user = FeatureVector::new(vec![1.0, 0.0, 0.0]);

        let shortlist = top_n(&user, items, 1);
        assert_eq!(ids(&shortlist), vec!["h1"]);
        assert!((shortlist[0].similarity() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_sorted_descending_and_truncated() {
        let catalog = catalog(vec![
            ("low", vec![0.0, 1.0]),
            ("high", vec![1.0, 0.1]),
            ("mid", vec![1.0, 1.0]),
        ]);
        let items = catalog.require("Head").unwrap().items();
        let user = FeatureVector::new(vec![1.0, 0.0]);

        assert_eq!(ids(&top_n(&user, items, 3)), vec!["high", "mid", "low"]);
        assert_eq!(ids(&top_n(&user, items, 2)), vec!["high", "mid"]);
        assert_eq!(top_n(&user, items, 10).len(), 3);
        assert!(top_n(&user, items, 0).is_empty());
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let catalog = catalog(vec![
            ("b", vec![0.0, 1.0]),
            ("a1", vec![2.0, 0.0]),
            ("a2", vec![1.0, 0.0]),
            ("a3", vec![3.0, 0.0]),
        ]);
        let items = catalog.require("Head").unwrap().items();
        let user = FeatureVector::new(vec![1.0, 0.0]);

        let shortlist = top_n(&user, items, 4);
        assert_eq!(ids(&shortlist), vec!["a1", "a2", "a3", "b"]);
        assert_eq!(shortlist[0].position, 1);
    }

    #[test]
    fn test_set_invariant_under_permutation() {
        let rows = vec![
            ("p", vec![0.9, 0.1, 0.3]),
            ("q", vec![0.1, 0.8, 0.2]),
            ("r", vec![0.5, 0.5, 0.5]),
            ("s", vec![0.7, 0.0, 0.9]),
            ("t", vec![0.0, 0.2, 1.0]),
        ];
        let mut reversed = rows.clone();
        reversed.reverse();
        let forward = catalog(rows);
        let backward = catalog(reversed);
        let user = FeatureVector::new(vec![0.8, 0.1, 0.4]);

        let mut a = ids(&top_n(&user, forward.require("Head").unwrap().items(), 3));
        let mut b = ids(&top_n(&user, backward.require("Head").unwrap().items(), 3));
        a.sort();
        b.sort();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_input() {
        let user = FeatureVector::new(vec![1.0]);
        assert!(top_n(&user, &[], 5).is_empty());
    }

    #[test]
    fn test_zero_profile_keeps_catalog_order() {
        let catalog = catalog(vec![("x", vec![0.3, 0.1]), ("y", vec![0.9, 0.9])]);
        let items = catalog.require("Head").unwrap().items();
        let user = FeatureVector::new(vec![0.0, 0.0]);

        let shortlist = top_n(&user, items, 2);
        assert_eq!(ids(&shortlist), vec!["x", "y"]);
        assert!(shortlist.iter().all(|c| c.similarity() == 0.0));
    }
}
