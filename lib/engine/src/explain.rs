//! Per-axis view of a recommendation
//!
//! Lines the profile up against each chosen item and their combo vector,
//! one row per feature axis.

use crate::combination::ScoredCombination;
use kitx_core::{Catalog, FeatureVector, InputError, Result};
use kitx_similarity::mean_vector;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisExplanation {
    pub axis: String,
    pub user: f32,
    /// Each selected item's value on this axis, in selection order
    pub items: Vec<f32>,
    /// Mean of the selected items on this axis
    pub combo: f32,
    pub abs_error: f32,
}

/// One row per axis comparing `profile` with the selected items
///
/// Every selection must still exist in `catalog`.
pub fn explain_axes(
    catalog: &Catalog,
    profile: &FeatureVector,
    scored: &ScoredCombination,
) -> Result<Vec<AxisExplanation>> {
    if profile.dim() != catalog.dim() {
        return Err(InputError::DimensionMismatch {
            expected: catalog.dim(),
            actual: profile.dim(),
        }
        .into());
    }

    let mut vectors: Vec<&[f32]> = Vec::with_capacity(scored.combination.len());
    for (category, identifier) in scored.combination.pairs() {
        vectors.push(catalog.item(category, identifier)?.vector().as_slice());
    }
    let combo = mean_vector(&vectors);

    Ok(profile
        .iter()
        .zip(combo)
        .enumerate()
        .map(|(i, (&user, combo))| AxisExplanation {
            axis: catalog.axis_name(i),
            user,
            items: vectors.iter().map(|v| v[i]).collect(),
            combo,
            abs_error: (user - combo).abs(),
        })
        .collect())
}
