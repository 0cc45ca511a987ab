use serde::{Deserialize, Serialize};
use crate::vector::FeatureVector;

/// A decoded catalog row as handed over by the data-loading side
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemRecord {
    pub category: String,
    pub identifier: String,
    #[serde(alias = "vector")]
    pub features: Vec<f32>,
}

impl ItemRecord {
    pub fn new(
        category: impl Into<String>,
        identifier: impl Into<String>,
        features: Vec<f32>,
    ) -> Self {
        Self {
            category: category.into(),
            identifier: identifier.into(),
            features,
        }
    }
}

/// A catalogued item. Immutable once it is part of a [`crate::Catalog`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Item {
    category: String,
    identifier: String,
    vector: FeatureVector,
}

impl Item {
    pub(crate) fn from_record(record: ItemRecord) -> Self {
        Self {
            category: record.category,
            identifier: record.identifier,
            vector: FeatureVector::new(record.features),
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn vector(&self) -> &FeatureVector {
        &self.vector
    }
}
