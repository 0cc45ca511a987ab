//! # kitx
//!
//! Personalized accessory combinations: match a user preference vector
//! against catalogued items and pick the best combination of one item per
//! category.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! kitx --catalog accessories.json --profile 0.9,0.1,0.0,0.6 --categories Head,Torso,Face
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use kitx::prelude::*;
//!
//! let catalog = RecommendationEngine::load_catalog(vec![
//!     ItemRecord::new("Head", "cap", vec![0.9, 0.1, 0.0]),
//!     ItemRecord::new("Torso", "jacket", vec![0.7, 0.0, 0.3]),
//!     ItemRecord::new("Face", "glasses", vec![0.2, 0.9, 0.1]),
//! ])
//! .unwrap();
//!
//! let engine = RecommendationEngine::default();
//! let profile = FeatureVector::new(vec![0.8, 0.2, 0.1]);
//! let request = RecommendRequest::new(["Head", "Torso", "Face"]);
//!
//! let best = engine.recommend(&catalog, &profile, &request).unwrap();
//! assert_eq!(best.combination.len(), 3);
//! ```
//!
//! ## Crate Structure
//!
//! - [`kitx-core`](https://docs.rs/kitx-core) - Feature vectors, catalog, error taxonomy
//! - [`kitx-similarity`](https://docs.rs/kitx-similarity) - Cosine, Pearson and the composite score
//! - [`kitx-engine`](https://docs.rs/kitx-engine) - Shortlisting, combination search, recommendation
//!
//! ## Features
//!
//! - **Composite scoring**: global similarity, weighted error and weakest-item terms
//! - **Deterministic search**: identical inputs give bit-identical results
//! - **Parallel search**: large search spaces are scored on the rayon pool
//! - **Hot reload**: swap catalogs atomically while requests are in flight
//! - **Seeded variety**: draw from the top combinations reproducibly

pub mod loader;

// Re-export core types
pub use kitx_core::{
    Catalog, CatalogError, CatalogHandle, Category, Error, FeatureVector, InputError, Item,
    ItemRecord, ResourceError, Result, DEFAULT_GENRE_AXES,
};

// Re-export scoring
pub use kitx_similarity::{
    composite_score, cosine, pearson, CompositeScorer, ScoreBreakdown, ScoreWeights,
};

// Re-export engine
pub use kitx_engine::{
    AxisExplanation, CandidateSelector, Combination, ComboOptimizer, EngineConfig,
    ProfileScaling, RecommendRequest, RecommendationEngine, ScoredCombination, Selection,
    VarietyOptions,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Catalog, CatalogHandle, EngineConfig, Error, FeatureVector, ItemRecord,
        RecommendRequest, RecommendationEngine, Result, ScoreWeights, ScoredCombination,
        VarietyOptions,
    };
}
