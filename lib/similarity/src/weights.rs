//! Weights of the four composite score terms

use kitx_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Blend of the composite score terms
///
/// Weights are used as given. They are not normalized, so a caller can
/// switch a term off with 0.0 or emphasise one beyond the others.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScoreWeights {
    /// Weight of the global similarity (mean of cosine and Pearson against the combo vector)
    #[serde(default = "default_sim_global")]
    pub sim_global: f32,

    /// Weight of `1 - weighted_error`
    #[serde(default = "default_error")]
    pub error: f32,

    /// Weight of the lowest single-item cosine
    #[serde(default = "default_min_sim")]
    pub min_sim: f32,

    /// Weight of the lowest single-item Pearson correlation
    #[serde(default = "default_min_corr")]
    pub min_corr: f32,
}

fn default_sim_global() -> f32 {
    0.5
}

fn default_error() -> f32 {
    0.2
}

fn default_min_sim() -> f32 {
    0.15
}

fn default_min_corr() -> f32 {
    0.15
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            sim_global: default_sim_global(),
            error: default_error(),
            min_sim: default_min_sim(),
            min_corr: default_min_corr(),
        }
    }
}

impl ScoreWeights {
    pub fn new(sim_global: f32, error: f32, min_sim: f32, min_corr: f32) -> Self {
        Self {
            sim_global,
            error,
            min_sim,
            min_corr,
        }
    }

    /// Build from `[p1, p2, p3, p4]`
    pub fn from_slice(values: &[f32]) -> Result<Self> {
        match values {
            [p1, p2, p3, p4] => {
                let weights = Self::new(*p1, *p2, *p3, *p4);
                weights.validate()?;
                Ok(weights)
            }
            _ => Err(Error::InvalidConfig(format!(
                "expected 4 score weights, got {}",
                values.len()
            ))),
        }
    }

    pub fn as_array(&self) -> [f32; 4] {
        [self.sim_global, self.error, self.min_sim, self.min_corr]
    }

    /// Every weight must be a finite number
    pub fn validate(&self) -> Result<()> {
        if self.as_array().iter().any(|w| !w.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "score weights must be finite, got {:?}",
                self.as_array()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(ScoreWeights::default().as_array(), [0.5, 0.2, 0.15, 0.15]);
    }

    #[test]
    fn test_from_slice() {
        let weights = ScoreWeights::from_slice(&[1.0, 0.0, 0.0, 0.0]).unwrap();
        assert_eq!(weights.sim_global, 1.0);
        assert!(ScoreWeights::from_slice(&[1.0, 0.0]).is_err());
        assert!(ScoreWeights::from_slice(&[1.0, f32::NAN, 0.0, 0.0]).is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let weights: ScoreWeights = serde_json::from_str(r#"{"sim_global": 1.0}"#).unwrap();
        assert_eq!(weights.as_array(), [1.0, 0.2, 0.15, 0.15]);
    }
}
