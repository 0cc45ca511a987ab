use serde::{Deserialize, Serialize};

/// A fixed-length profile over the catalog's feature axes
///
/// Values are usually in [0, 1] but nothing here assumes it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct FeatureVector {
    data: Vec<f32>,
}

impl FeatureVector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, f32> {
        self.data.iter()
    }

    /// Index of the first NaN or infinite component, if any
    pub fn first_non_finite(&self) -> Option<usize> {
        self.data.iter().position(|x| !x.is_finite())
    }

    /// Largest component, or `None` for an empty vector
    pub fn max_component(&self) -> Option<f32> {
        self.data.iter().copied().reduce(f32::max)
    }

    /// Copy rescaled so the largest component becomes 1.0
    ///
    /// Left unchanged when the maximum is not positive.
    #[must_use]
    pub fn scaled_to_max(&self) -> Self {
        match self.max_component() {
            Some(max) if max > 0.0 => {
                Self::new(self.data.iter().map(|x| x / max).collect())
            }
            _ => self.clone(),
        }
    }
}

impl From<Vec<f32>> for FeatureVector {
    fn from(data: Vec<f32>) -> Self {
        Self::new(data)
    }
}

impl AsRef<[f32]> for FeatureVector {
    fn as_ref(&self) -> &[f32] {
        &self.data
    }
}
