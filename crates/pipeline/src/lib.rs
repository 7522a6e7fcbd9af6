//! Feature engineering and diversity ranking for mood recommendations.
//!
//! This crate provides:
//! - FeatureNormalizer for per-request min-max scaling
//! - FeatureEngineer for composite relevance scores over a shortlist
//! - DiversityRanker for the greedy relevance/diversity selection
//!
//! ## Architecture
//! The pipeline processes a mood shortlist in stages:
//! 1. FeatureEngineer scales mood affinity, rating and popularity over the
//!    shortlist and blends them (0.5 / 0.3 / 0.2)
//! 2. DiversityRanker greedily picks `n` rows, seeded with the top mood match
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{DiversityRanker, FeatureEngineer};
//!
//! let features = FeatureEngineer::new().compute_features(&catalog.movies, &shortlist, mood);
//! let composite: Vec<f32> = features.iter().map(|f| f.composite_score).collect();
//!
//! let rows = DiversityRanker::new().rank(&shortlist, &catalog.similarity, &composite, 0.3, 5);
//! ```

pub mod features;
pub mod normalize;
pub mod ranker;

// Re-export main types
pub use features::{CandidateFeatures, FeatureEngineer, composite_score};
pub use normalize::FeatureNormalizer;
pub use ranker::{DiversityRanker, RankedPick};
