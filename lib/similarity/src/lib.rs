//! # kitx Similarity
//!
//! Similarity measures and the multi-term composite score used to rank
//! item combinations against a user profile.
//!
//! ## Features
//!
//! - **Total measures**: [`cosine`] and [`pearson`] return 0.0 instead of NaN
//!   for zero-norm or constant vectors
//! - **Composite score**: global similarity, weighted error, and the weakest
//!   per-item similarity and correlation, blended by [`ScoreWeights`]
//! - **Breakdown**: every term behind a score is reported in [`ScoreBreakdown`]
//!
//! ## Example
//!
//! ```rust
//! use kitx_similarity::{CompositeScorer, ScoreWeights};
//!
//! let user = [0.9f32, 0.1, 0.0, 0.6];
//! let head = [1.0f32, 0.0, 0.1, 0.5];
//! let face = [0.8f32, 0.2, 0.0, 0.7];
//!
//! let scorer = CompositeScorer::new(ScoreWeights::default());
//! let breakdown = scorer.breakdown(&user, &[&head, &face]);
//! assert!(breakdown.score > 0.8);
//! ```

pub mod composite;
pub mod distance;
pub mod weights;

pub use composite::{composite_score, CompositeScorer, ItemTerms, ScoreBreakdown};
pub use distance::{cosine, mean_vector, pearson, weighted_error};
pub use weights::ScoreWeights;
