//! # Recommendation Service
//!
//! Coordinates a mood recommendation request:
//! 1. Fetch the shared catalog (loaded once, on first use)
//! 2. Shortlist rows for the mood
//! 3. Compute composite features over the shortlist
//! 4. Rank the shortlist for relevance and diversity
//! 5. Map picks back to catalog rows and format them
//!
//! Whenever the mood path cannot fill the request (unknown mood, empty
//! catalog, short result) the top-rated list is returned instead.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, instrument};

use data_loader::{Catalog, CatalogHandle, Mood, MovieId, MovieRecord, RowIndex};
use pipeline::{DiversityRanker, FeatureEngineer, RankedPick};
use sources::{CandidateSelector, TopRatedSource};

use crate::error::RecommendError;

/// Results returned when the request doesn't say
pub const DEFAULT_COUNT: usize = 5;
/// Diversity weight used when the request doesn't say
pub const DEFAULT_DIVERSITY: f32 = 0.3;
/// Cast members included in a [`MovieView`]
pub const CAST_LIMIT: usize = 5;

/// External representation of a recommended movie
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieView {
    pub id: MovieId,
    pub title: String,
    pub overview: String,
    pub genres: Vec<String>,
    pub rating: f32,
    pub vote_count: u32,
    pub release_date: String,
    pub runtime: Option<u32>,
    pub cast: Vec<String>,
    pub director: String,
    pub poster_path: String,
}

impl From<&MovieRecord> for MovieView {
    fn from(movie: &MovieRecord) -> Self {
        Self {
            id: movie.tmdb_id,
            title: movie.title.clone(),
            overview: movie.overview.clone(),
            genres: movie.genres.clone(),
            rating: movie.vote_average,
            vote_count: movie.vote_count,
            release_date: movie
                .release_date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            runtime: movie.runtime,
            cast: movie.cast.iter().take(CAST_LIMIT).cloned().collect(),
            director: movie.director.clone().unwrap_or_default(),
            poster_path: movie.poster_path.clone().unwrap_or_default(),
        }
    }
}

/// How a recommendation was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationSource {
    /// Mood shortlist + diversity ranking
    MoodDiversified,
    /// Top-rated fallback list
    TopRated,
    /// Nearest neighbours in the similarity matrix
    Similar,
}

/// One recommendation with its provenance
#[derive(Debug, Clone)]
pub struct MovieRecommendation {
    pub row: RowIndex,
    pub movie: MovieView,
    /// Composite score for mood picks, similarity for neighbours
    pub score: Option<f32>,
    pub source: RecommendationSource,
    pub explanation: String,
}

/// Clamp a caller-supplied diversity factor into [0, 1]
pub fn clamp_diversity(diversity: f32) -> f32 {
    if diversity.is_finite() {
        diversity.clamp(0.0, 1.0)
    } else {
        DEFAULT_DIVERSITY
    }
}

/// Entry point for every recommendation query.
///
/// Cheap to clone; all clones share the same catalog handle.
#[derive(Debug, Clone)]
pub struct RecommendationService {
    catalog: Arc<CatalogHandle>,
    selector: CandidateSelector,
    top_rated: TopRatedSource,
    feature_engineer: FeatureEngineer,
    ranker: DiversityRanker,
}

impl RecommendationService {
    pub fn new(catalog: Arc<CatalogHandle>) -> Self {
        Self {
            catalog,
            selector: CandidateSelector::new(),
            top_rated: TopRatedSource::new(),
            feature_engineer: FeatureEngineer::new(),
            ranker: DiversityRanker::new(),
        }
    }

    /// The fixed, ordered list of mood identifiers
    pub fn moods() -> Vec<&'static str> {
        Mood::ALL.iter().map(|mood| mood.as_str()).collect()
    }

    /// Whether the catalog load has already happened
    pub fn catalog_loaded(&self) -> bool {
        self.catalog.is_loaded()
    }

    /// Shared catalog; the first call performs the load
    pub fn catalog(&self) -> Result<Arc<Catalog>, RecommendError> {
        Ok(self.catalog.get()?)
    }

    /// Recommend `count` movies for `mood`.
    ///
    /// # Arguments
    /// * `mood` - Mood identifier; unknown moods take the top-rated fallback
    /// * `count` - Number of recommendations wanted
    /// * `diversity` - Relevance/diversity trade-off, clamped to [0, 1]
    ///
    /// # Returns
    /// Recommendations in pick order (the best mood match first)
    #[instrument(skip(self))]
    pub fn recommend(
        &self,
        mood: &str,
        count: usize,
        diversity: f32,
    ) -> Result<Vec<MovieRecommendation>, RecommendError> {
        let start_time = Instant::now();
        let catalog = self.catalog()?;

        if count == 0 {
            return Ok(Vec::new());
        }
        let diversity = clamp_diversity(diversity);

        // Shortlist
        let requested = Mood::parse(mood);
        let shortlist = self.selector.select(&catalog.movies, requested, count);
        let mood = match requested {
            Some(mood) if !shortlist.is_empty() => mood,
            _ => {
                info!("No mood shortlist for '{}', using top-rated fallback", mood);
                return Ok(self.top_rated_recommendations(&catalog, count));
            }
        };
        debug!("Shortlisted {} candidates for {}", shortlist.len(), mood);

        // Features
        let features = self
            .feature_engineer
            .compute_features(&catalog.movies, &shortlist, mood);
        let composite: Vec<f32> = features.iter().map(|f| f.composite_score).collect();

        // Ranking
        let picks = self.ranker.rank_with_scores(
            &shortlist,
            &catalog.similarity,
            &composite,
            diversity,
            count,
        );
        let recommendations = self.format_picks(&catalog, mood, &picks)?;

        if recommendations.len() < count {
            info!(
                "Ranking produced {} of {} requested, using top-rated fallback",
                recommendations.len(),
                count
            );
            return Ok(self.top_rated_recommendations(&catalog, count));
        }

        info!(
            "Selected {} recommendations for {} (diversity {:.2}) in {:.2?}",
            recommendations.len(),
            mood,
            diversity,
            start_time.elapsed()
        );
        Ok(recommendations)
    }

    /// Movies most similar to catalog row `id`
    #[instrument(skip(self))]
    pub fn similar(
        &self,
        id: RowIndex,
        count: usize,
    ) -> Result<Vec<MovieRecommendation>, RecommendError> {
        let catalog = self.catalog()?;
        let anchor = catalog.movies.get(id).ok_or(RecommendError::NotFound(id))?;

        let recommendations: Vec<MovieRecommendation> = catalog
            .similarity
            .most_similar(id, count)
            .into_iter()
            .filter_map(|(row, similarity)| {
                let movie = catalog.movies.get(row)?;
                Some(MovieRecommendation {
                    row,
                    movie: MovieView::from(movie),
                    score: Some(similarity),
                    source: RecommendationSource::Similar,
                    explanation: format!("Similarity {:.2} to {}", similarity, anchor.title),
                })
            })
            .collect();

        debug!("Found {} movies similar to {}", recommendations.len(), anchor.title);
        Ok(recommendations)
    }

    /// Title search over the catalog
    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<MovieView>, RecommendError> {
        let catalog = self.catalog()?;
        Ok(catalog
            .movies
            .search_title(query, limit)
            .into_iter()
            .map(MovieView::from)
            .collect())
    }

    /// Top-`count` catalog rows by rating, then vote count
    fn top_rated_recommendations(&self, catalog: &Catalog, count: usize) -> Vec<MovieRecommendation> {
        self.top_rated
            .top(&catalog.movies, count)
            .into_iter()
            .filter_map(|row| {
                let movie = catalog.movies.get(row)?;
                Some(MovieRecommendation {
                    row,
                    movie: MovieView::from(movie),
                    score: None,
                    source: RecommendationSource::TopRated,
                    explanation: format!(
                        "Top rated: {:.1} from {} votes",
                        movie.vote_average, movie.vote_count
                    ),
                })
            })
            .collect()
    }

    /// Map ranked picks back to catalog rows
    fn format_picks(
        &self,
        catalog: &Catalog,
        mood: Mood,
        picks: &[RankedPick],
    ) -> Result<Vec<MovieRecommendation>, RecommendError> {
        picks
            .iter()
            .map(|pick| {
                let movie = catalog.movies.get(pick.row).ok_or_else(|| {
                    RecommendError::Internal(format!("Ranked row {} is not in the catalog", pick.row))
                })?;
                Ok(MovieRecommendation {
                    row: pick.row,
                    movie: MovieView::from(movie),
                    score: Some(pick.composite_score),
                    source: RecommendationSource::MoodDiversified,
                    explanation: format!(
                        "{} affinity {:.2}, composite {:.2}, pick score {:.2}",
                        mood,
                        movie.mood_score(mood),
                        pick.composite_score,
                        pick.combined_score
                    ),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{CatalogStore, LoadOptions, MoodScores, SimilarityMatrix};

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    /// 20 movies; happy affinity falls with row order, ratings do not
    fn build_test_catalog() -> Catalog {
        let movies: Vec<MovieRecord> = (0..20)
            .map(|i| {
                let mut movie = MovieRecord::new(500 + i as u32, format!("Movie {}", i));
                movie.mood_scores = MoodScores::default().with(Mood::Happy, 20.0 - i as f32);
                movie.vote_average = (i % 5) as f32 + 4.0;
                movie.vote_count = 10 * (i as u32 + 1);
                movie.popularity = i as f32;
                movie.cast = (0..8).map(|c| format!("Actor {}", c)).collect();
                movie
            })
            .collect();
        Catalog::new(CatalogStore::new(movies), SimilarityMatrix::identity(20))
    }

    fn build_service(catalog: Catalog) -> RecommendationService {
        RecommendationService::new(Arc::new(CatalogHandle::preloaded(catalog)))
    }

    fn rows(recommendations: &[MovieRecommendation]) -> Vec<RowIndex> {
        recommendations.iter().map(|r| r.row).collect()
    }

    // ============================================================================
    // Tests
    // ============================================================================

    #[test]
    fn test_moods_list() {
        let moods = RecommendationService::moods();
        assert_eq!(moods.len(), 10);
        assert_eq!(moods[0], "happy");
        assert_eq!(moods[9], "inspired");
    }

    #[test]
    fn test_mood_recommendations() {
        let service = build_service(build_test_catalog());

        let recs = service.recommend("happy", 3, 0.0).unwrap();
        assert_eq!(rows(&recs), vec![0, 1, 2]);
        assert!(recs.iter().all(|r| r.source == RecommendationSource::MoodDiversified));
        assert!(recs.iter().all(|r| r.score.is_some()));
    }

    #[test]
    fn test_unknown_mood_falls_back_to_top_rated() {
        let service = build_service(build_test_catalog());

        let recs = service.recommend("hangry", 4, 0.3).unwrap();
        // rating 8.0 rows are 4, 9, 14, 19; most votes first
        assert_eq!(rows(&recs), vec![19, 14, 9, 4]);
        assert!(recs.iter().all(|r| r.source == RecommendationSource::TopRated));
    }

    #[test]
    fn test_mood_identifiers_match_exactly() {
        let service = build_service(build_test_catalog());

        for mood in ["HAPPY", " happy", "Happy "] {
            let recs = service.recommend(mood, 3, 0.0).unwrap();
            assert_eq!(rows(&recs), vec![19, 14, 9]);
            assert!(recs.iter().all(|r| r.source == RecommendationSource::TopRated));
        }
    }

    #[test]
    fn test_empty_catalog_returns_nothing() {
        let service = build_service(Catalog::default());
        assert!(service.recommend("happy", 5, 0.3).unwrap().is_empty());
    }

    #[test]
    fn test_short_ranking_falls_back() {
        let mut catalog = build_test_catalog();
        catalog.movies = CatalogStore::new(catalog.movies.as_slice()[..3].to_vec());
        let service = build_service(catalog);

        let recs = service.recommend("happy", 5, 0.3).unwrap();
        assert_eq!(recs.len(), 3);
        assert!(recs.iter().all(|r| r.source == RecommendationSource::TopRated));
    }

    #[test]
    fn test_zero_count() {
        let service = build_service(build_test_catalog());
        assert!(service.recommend("happy", 0, 0.3).unwrap().is_empty());
    }

    #[test]
    fn test_out_of_range_diversity_is_clamped() {
        let service = build_service(build_test_catalog());

        let high = service.recommend("happy", 3, 7.5).unwrap();
        let full = service.recommend("happy", 3, 1.0).unwrap();
        assert_eq!(rows(&high), rows(&full));

        let low = service.recommend("happy", 3, -2.0).unwrap();
        assert_eq!(rows(&low), vec![0, 1, 2]);

        assert_eq!(clamp_diversity(f32::NAN), DEFAULT_DIVERSITY);
    }

    #[test]
    fn test_view_truncates_cast() {
        let service = build_service(build_test_catalog());
        let recs = service.recommend("happy", 1, 0.3).unwrap();

        let view = &recs[0].movie;
        assert_eq!(view.id, 500);
        assert_eq!(view.cast.len(), CAST_LIMIT);
        assert_eq!(view.release_date, "");
        assert_eq!(view.director, "");
    }

    #[test]
    fn test_similar_movies() {
        let mut catalog = build_test_catalog();
        let mut rows_data = vec![vec![0.0; 20]; 20];
        for (i, row) in rows_data.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        rows_data[3][7] = 0.9;
        rows_data[3][11] = 0.6;
        catalog.similarity = SimilarityMatrix::from_rows(rows_data).unwrap();
        let service = build_service(catalog);

        let recs = service.similar(3, 2).unwrap();
        assert_eq!(rows(&recs), vec![7, 11]);
        assert_eq!(recs[0].score, Some(0.9));
        assert_eq!(recs[0].source, RecommendationSource::Similar);

        assert!(matches!(service.similar(99, 2), Err(RecommendError::NotFound(99))));
    }

    #[test]
    fn test_search() {
        let service = build_service(build_test_catalog());
        let results = service.search("movie 1", 3).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].title, "Movie 1");
    }

    #[test]
    fn test_unavailable_data_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let handle = CatalogHandle::new(dir.path(), LoadOptions::default());
        let service = RecommendationService::new(Arc::new(handle));

        assert!(matches!(
            service.recommend("happy", 5, 0.3),
            Err(RecommendError::DataUnavailable(_))
        ));
        // Same condition on the next call
        assert!(matches!(
            service.recommend("sad", 5, 0.3),
            Err(RecommendError::DataUnavailable(_))
        ));
    }
}
