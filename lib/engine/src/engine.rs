use crate::combination::ScoredCombination;
use crate::config::{EngineConfig, ProfileScaling, RecommendRequest};
use crate::explain::{explain_axes, AxisExplanation};
use crate::optimizer::{ComboOptimizer, SearchOutcome, Shortlist};
use crate::selector::CandidateSelector;
use crate::variety::VarietyOptions;
use kitx_core::{Catalog, CatalogError, FeatureVector, InputError, ItemRecord, Result};
use kitx_similarity::CompositeScorer;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Picks the best combination of one item per category for a profile
///
/// Holds configuration only. The catalog and profile are passed to every
/// call, so one engine can serve concurrent requests against whichever
/// catalog snapshot each caller holds.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    config: EngineConfig,
    selector: CandidateSelector,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            selector: CandidateSelector::new(),
        }
    }
}

impl RecommendationEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            selector: CandidateSelector::new(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validate decoded records into a catalog
    pub fn load_catalog<I>(records: I) -> Result<Catalog>
    where
        I: IntoIterator<Item = ItemRecord>,
    {
        let catalog = Catalog::from_records(records)?;
        info!(
            "Catalog loaded: {} items in {} categories, dim {}",
            catalog.len(),
            catalog.category_names().len(),
            catalog.dim()
        );
        Ok(catalog)
    }

    /// Best combination for `profile` over the requested categories
    pub fn recommend(
        &self,
        catalog: &Catalog,
        profile: &FeatureVector,
        request: &RecommendRequest,
    ) -> Result<ScoredCombination> {
        let outcome = self.search(catalog, profile, request, 1)?;
        let evaluated = outcome.evaluated;
        let best = outcome.into_best().ok_or(CatalogError::Empty)?;
        Ok(ScoredCombination::from_ranked(&best, evaluated))
    }

    /// The `k` best combinations, best first
    pub fn recommend_ranked(
        &self,
        catalog: &Catalog,
        profile: &FeatureVector,
        request: &RecommendRequest,
        k: usize,
    ) -> Result<Vec<ScoredCombination>> {
        let outcome = self.search(catalog, profile, request, k)?;
        Ok(outcome
            .ranked
            .iter()
            .map(|ranked| ScoredCombination::from_ranked(ranked, outcome.evaluated))
            .collect())
    }

    /// Draw one of the best `variety.pool` combinations using `variety.seed`
    ///
    /// With `pool == 1` this is [`RecommendationEngine::recommend`]. A pool
    /// larger than the search space draws from every combination.
    pub fn recommend_varied(
        &self,
        catalog: &Catalog,
        profile: &FeatureVector,
        request: &RecommendRequest,
        variety: VarietyOptions,
    ) -> Result<ScoredCombination> {
        variety.validate()?;
        let outcome = self.search(catalog, profile, request, variety.pool)?;
        let pick = variety.pick(outcome.ranked.len());
        debug!("Variety pick {} of {} (seed {})", pick, outcome.ranked.len(), variety.seed);
        let chosen = outcome.ranked.get(pick).ok_or(CatalogError::Empty)?;
        Ok(ScoredCombination::from_ranked(chosen, outcome.evaluated))
    }

    /// Per-axis comparison of the profile, as the engine sees it, with the
    /// selected items
    pub fn explain(
        &self,
        catalog: &Catalog,
        profile: &FeatureVector,
        scored: &ScoredCombination,
    ) -> Result<Vec<AxisExplanation>> {
        let profile = self.prepare_profile(catalog, profile)?;
        explain_axes(catalog, &profile, scored)
    }

    fn prepare_profile(&self, catalog: &Catalog, profile: &FeatureVector) -> Result<FeatureVector> {
        if profile.dim() != catalog.dim() {
            return Err(InputError::DimensionMismatch {
                expected: catalog.dim(),
                actual: profile.dim(),
            }
            .into());
        }
        if let Some(axis) = profile.first_non_finite() {
            return Err(InputError::NonFiniteValue { axis }.into());
        }

        Ok(match self.config.profile_scaling {
            ProfileScaling::Raw => profile.clone(),
            ProfileScaling::Max => profile.scaled_to_max(),
        })
    }

    /// Shortlist every requested category and keep the `k` best combinations
    ///
    /// Categories are non-empty and `top_n >= 1` once the request validates,
    /// so the outcome holds at least one combination whenever `k >= 1`.
    fn search<'c>(
        &self,
        catalog: &'c Catalog,
        profile: &FeatureVector,
        request: &RecommendRequest,
        k: usize,
    ) -> Result<SearchOutcome<'c>> {
        let params = request.resolve(&self.config)?;
        let profile = self.prepare_profile(catalog, profile)?;
        check_categories(&request.categories)?;

        let mut shortlists = Vec::with_capacity(request.categories.len());
        for name in &request.categories {
            let category = catalog.require(name)?;
            let candidates = self.selector.top_n(&profile, category.items(), params.top_n);
            shortlists.push(Shortlist::new(category.name(), candidates));
        }

        let optimizer = ComboOptimizer::new(CompositeScorer::new(params.weights))
            .with_limit(params.max_combinations)
            .with_parallel_threshold(self.config.parallel_threshold);

        let outcome = optimizer
            .search_ranked(&profile, &shortlists, k)
            .map_err(|e| {
                warn!("Recommendation rejected: {}", e);
                e
            })?;

        let sizes: Vec<usize> = shortlists.iter().map(Shortlist::len).collect();
        debug!(
            "Searched {} combinations (shortlists {:?}), best score {:?}",
            outcome.evaluated,
            sizes,
            outcome.best().map(|b| b.score())
        );
        Ok(outcome)
    }
}

fn check_categories(categories: &[String]) -> Result<()> {
    if categories.is_empty() {
        return Err(InputError::NoCategories.into());
    }
    let mut seen = HashSet::with_capacity(categories.len());
    for name in categories {
        if !seen.insert(name.as_str()) {
            return Err(InputError::DuplicateCategory(name.clone()).into());
        }
    }
    Ok(())
}
