//! # kitx Engine
//!
//! Picks the combination of one item per category that best represents a
//! user profile.
//!
//! Matching a profile against several item pools is not a nearest-neighbour
//! lookup per pool: the items have to work together. The engine shortlists
//! each category by single-item cosine similarity, then searches every
//! combination of the shortlists under a composite score (see
//! [`kitx_similarity::CompositeScorer`]).
//!
//! ## Example
//!
//! ```rust
//! use kitx_core::{FeatureVector, ItemRecord};
//! use kitx_engine::{RecommendRequest, RecommendationEngine};
//!
//! let catalog = RecommendationEngine::load_catalog(vec![
//!     ItemRecord::new("Head", "cap", vec![1.0, 0.0, 0.0]),
//!     ItemRecord::new("Head", "crown", vec![0.0, 1.0, 0.0]),
//!     ItemRecord::new("Face", "glasses", vec![0.9, 0.1, 0.0]),
//! ])
//! .unwrap();
//!
//! let engine = RecommendationEngine::default();
//! let profile = FeatureVector::new(vec![1.0, 0.0, 0.0]);
//! let request = RecommendRequest::new(["Head", "Face"]);
//!
//! let best = engine.recommend(&catalog, &profile, &request).unwrap();
//! assert_eq!(best.combination.get("Head"), Some("cap"));
//! assert_eq!(best.combination.get("Face"), Some("glasses"));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Catalog   │────>│  Selector   │────>│  Optimizer  │
//! │ (category → │     │ (top-N per  │     │ (product of │
//! │   items)    │     │  category)  │     │ shortlists) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │   Variety   │<────│   Engine    │
//!                     │  (seeded)   │     │ (validate,  │
//!                     └─────────────┘     │  assemble)  │
//!                                         └─────────────┘
//! ```
//!
//! The search is exact over the shortlists but not over the catalog: an
//! item cut from its shortlist is never considered. Larger `top_n` trades
//! time (the product of shortlist sizes) for coverage.

pub mod combination;
pub mod config;
pub mod engine;
pub mod explain;
pub mod optimizer;
pub mod selector;
pub mod variety;

pub use combination::{Combination, ScoredCombination, Selection};
pub use config::{EngineConfig, ProfileScaling, RecommendRequest};
pub use engine::RecommendationEngine;
pub use explain::{explain_axes, AxisExplanation};
pub use optimizer::{ComboOptimizer, RankedCombination, SearchOutcome, Shortlist};
pub use selector::{top_n, Candidate, CandidateSelector};
pub use variety::VarietyOptions;
