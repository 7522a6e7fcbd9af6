//! Feature engineering for shortlisted candidates.
//!
//! Three columns are read from the catalog for the shortlist (mood affinity,
//! rating, popularity), each min-max scaled over the shortlist alone, and
//! blended into a composite relevance score.

use crate::normalize::FeatureNormalizer;
use data_loader::{CatalogStore, Mood, RowIndex};

/// Weight of the normalized mood affinity in the composite score
pub const MOOD_WEIGHT: f32 = 0.5;
/// Weight of the normalized vote average
pub const RATING_WEIGHT: f32 = 0.3;
/// Weight of the normalized popularity
pub const POPULARITY_WEIGHT: f32 = 0.2;

/// Features computed for each shortlisted candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateFeatures {
    pub row: RowIndex,

    // Raw signals
    pub mood_score: f32,
    pub vote_average: f32,
    pub popularity: f32,

    // Scaled over the shortlist
    pub mood_norm: f32,
    pub rating_norm: f32,
    pub popularity_norm: f32,

    pub composite_score: f32,
}

impl CandidateFeatures {
    /// Create a new CandidateFeatures with zeroed signals.
    pub fn new(row: RowIndex) -> Self {
        Self {
            row,
            mood_score: 0.0,
            vote_average: 0.0,
            popularity: 0.0,
            mood_norm: 0.0,
            rating_norm: 0.0,
            popularity_norm: 0.0,
            composite_score: 0.0,
        }
    }
}

/// Weighted blend of the three normalized signals
pub fn composite_score(mood_norm: f32, rating_norm: f32, popularity_norm: f32) -> f32 {
    MOOD_WEIGHT * mood_norm + RATING_WEIGHT * rating_norm + POPULARITY_WEIGHT * popularity_norm
}

/// Computes shortlist features.
///
/// Output order matches the shortlist order; nothing is re-sorted here.
#[derive(Debug, Clone, Default)]
pub struct FeatureEngineer {
    normalizer: FeatureNormalizer,
}

impl FeatureEngineer {
    pub fn new() -> Self {
        Self {
            normalizer: FeatureNormalizer::new(),
        }
    }

    /// Compute features for every shortlisted row.
    ///
    /// Rows missing from the catalog keep zeroed raw signals.
    pub fn compute_features(
        &self,
        catalog: &CatalogStore,
        shortlist: &[RowIndex],
        mood: Mood,
    ) -> Vec<CandidateFeatures> {
        let mut features: Vec<CandidateFeatures> = shortlist
            .iter()
            .map(|&row| {
                let mut f = CandidateFeatures::new(row);
                if let Some(movie) = catalog.get(row) {
                    f.mood_score = movie.mood_score(mood);
                    f.vote_average = movie.vote_average;
                    f.popularity = movie.popularity;
                }
                f
            })
            .collect();

        let mood_norm = self.normalize_column(&features, |f| f.mood_score);
        let rating_norm = self.normalize_column(&features, |f| f.vote_average);
        let popularity_norm = self.normalize_column(&features, |f| f.popularity);

        for (i, f) in features.iter_mut().enumerate() {
            f.mood_norm = mood_norm[i];
            f.rating_norm = rating_norm[i];
            f.popularity_norm = popularity_norm[i];
            f.composite_score = composite_score(f.mood_norm, f.rating_norm, f.popularity_norm);
        }
        features
    }

    fn normalize_column(
        &self,
        features: &[CandidateFeatures],
        column: impl Fn(&CandidateFeatures) -> f32,
    ) -> Vec<f32> {
        let values: Vec<f32> = features.iter().map(column).collect();
        self.normalizer.normalize(&values)
    }
}
