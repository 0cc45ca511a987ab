use kitx_core::{Error, Result};
use kitx_similarity::ScoreWeights;
use serde::{Deserialize, Serialize};

/// How the profile is conditioned before matching
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProfileScaling {
    /// Use the profile as given
    #[default]
    Raw,
    /// Divide by the largest component so it becomes 1.0
    Max,
}

/// Engine-wide defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Shortlist size per category
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    #[serde(default)]
    pub weights: ScoreWeights,

    /// Upper bound on enumerated combinations; `None` disables the guard
    #[serde(default = "default_max_combinations")]
    pub max_combinations: Option<u64>,

    /// Search spaces at least this large are scored in parallel
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: u64,

    #[serde(default)]
    pub profile_scaling: ProfileScaling,
}

fn default_top_n() -> usize {
    10
}

fn default_max_combinations() -> Option<u64> {
    Some(1_000_000)
}

fn default_parallel_threshold() -> u64 {
    4096
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            weights: ScoreWeights::default(),
            max_combinations: default_max_combinations(),
            parallel_threshold: default_parallel_threshold(),
            profile_scaling: ProfileScaling::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        validate_top_n(self.top_n)?;
        self.weights.validate()?;
        validate_limit(self.max_combinations)?;
        Ok(())
    }
}

fn validate_top_n(top_n: usize) -> Result<()> {
    if top_n == 0 {
        return Err(Error::InvalidConfig("top_n must be at least 1".to_string()));
    }
    Ok(())
}

fn validate_limit(limit: Option<u64>) -> Result<()> {
    if limit == Some(0) {
        return Err(Error::InvalidConfig(
            "max_combinations must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// One recommendation request
///
/// Categories are selected in the order given, which also fixes the
/// enumeration order of the search. Unset overrides fall back to the
/// engine's [`EngineConfig`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendRequest {
    pub categories: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_n: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<ScoreWeights>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_combinations: Option<u64>,
}

impl RecommendRequest {
    pub fn new<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            top_n: None,
            weights: None,
            max_combinations: None,
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = Some(top_n);
        self
    }

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = Some(weights);
        self
    }

    pub fn with_max_combinations(mut self, limit: u64) -> Self {
        self.max_combinations = Some(limit);
        self
    }

    /// Effective parameters after applying `config` defaults
    pub(crate) fn resolve(&self, config: &EngineConfig) -> Result<ResolvedParams> {
        let params = ResolvedParams {
            top_n: self.top_n.unwrap_or(config.top_n),
            weights: self.weights.unwrap_or(config.weights),
            max_combinations: self.max_combinations.or(config.max_combinations),
        };
        validate_top_n(params.top_n)?;
        params.weights.validate()?;
        validate_limit(params.max_combinations)?;
        Ok(params)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ResolvedParams {
    pub top_n: usize,
    pub weights: ScoreWeights,
    pub max_combinations: Option<u64>,
}
