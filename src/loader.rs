//! JSON input for the CLI and embedders
//!
//! The engine crates take decoded records and never touch files; this module
//! is the decoding side. A catalog file is either a plain array of records
//!
//! ```json
//! [{"category": "Head", "identifier": "cap.png", "features": [0.1, 0.9]}]
//! ```
//!
//! or an object that also names the feature axes
//!
//! ```json
//! {"axes": ["Rock", "Pop"], "items": [ ... ]}
//! ```

use kitx_core::{Catalog, Error, FeatureVector, ItemRecord, Result};
use kitx_engine::{EngineConfig, RecommendationEngine};
use kitx_similarity::ScoreWeights;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Records(Vec<ItemRecord>),
    Described {
        #[serde(default)]
        axes: Option<Vec<String>>,
        items: Vec<ItemRecord>,
    },
}

/// Decode and validate a catalog from JSON
pub fn read_catalog<R: Read>(reader: R) -> Result<Catalog> {
    let document: CatalogDocument =
        serde_json::from_reader(reader).map_err(|e| Error::Serialization(e.to_string()))?;

    let (axes, records) = match document {
        CatalogDocument::Records(records) => (None, records),
        CatalogDocument::Described { axes, items } => (axes, items),
    };

    let catalog = RecommendationEngine::load_catalog(records)?;
    match axes {
        Some(axes) => Ok(catalog.with_axes(axes)?),
        None => Ok(catalog),
    }
}

pub fn load_catalog_file<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let file = File::open(path.as_ref())?;
    read_catalog(BufReader::new(file))
}

/// Read and validate an [`EngineConfig`]; missing fields take their defaults
pub fn load_config_file<P: AsRef<Path>>(path: P) -> Result<EngineConfig> {
    let file = File::open(path.as_ref())?;
    let config: EngineConfig = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| Error::Serialization(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

fn parse_floats(input: &str) -> Result<Vec<f32>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f32>()
                .map_err(|e| Error::Serialization(format!("invalid number '{}': {}", s, e)))
        })
        .collect()
}

/// Parse a profile given as comma-separated numbers, e.g. `"0.1, 0, 0.9"`
pub fn parse_profile(input: &str) -> Result<FeatureVector> {
    let values = parse_floats(input)?;
    if values.is_empty() {
        return Err(Error::Serialization("profile is empty".to_string()));
    }
    Ok(FeatureVector::new(values))
}

/// Parse four comma-separated score weights
pub fn parse_weights(input: &str) -> Result<ScoreWeights> {
    ScoreWeights::from_slice(&parse_floats(input)?)
}
