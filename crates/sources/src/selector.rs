//! Mood shortlist generation.
//!
//! Narrows the whole catalog to the rows with the strongest affinity for the
//! requested mood. The shortlist deliberately overshoots the number of
//! results asked for so the diversity stage has room to choose.
//!
//! ## Algorithm
//! 1. Unknown mood: empty shortlist (the caller falls back to top-rated)
//! 2. Read every row's affinity for the mood (undefined reads as 0)
//! 3. Stable sort descending, so equal affinities keep catalog order
//! 4. Keep the first `min(n * overshoot, catalog size)` rows

use data_loader::{CatalogStore, Mood, RowIndex};
use tracing::{debug, instrument};

/// Default shortlist size multiplier
pub const SHORTLIST_OVERSHOOT: usize = 5;

/// Selects a mood-sorted shortlist of catalog rows
#[derive(Debug, Clone)]
pub struct CandidateSelector {
    overshoot: usize,
}

impl CandidateSelector {
    pub fn new() -> Self {
        Self {
            overshoot: SHORTLIST_OVERSHOOT,
        }
    }

    /// Configure the shortlist multiplier (default: 5)
    pub fn with_overshoot(mut self, overshoot: usize) -> Self {
        self.overshoot = overshoot.max(1);
        self
    }

    /// Shortlist size for a request of `n` results
    pub fn shortlist_len(&self, catalog_size: usize, n: usize) -> usize {
        n.saturating_mul(self.overshoot).min(catalog_size)
    }

    /// Row indices of the best `n * overshoot` matches for `mood`,
    /// strongest first.
    ///
    /// `None` is the unknown-mood case and yields an empty shortlist.
    #[instrument(skip(self, catalog), fields(catalog_size = catalog.len()))]
    pub fn select(&self, catalog: &CatalogStore, mood: Option<Mood>, n: usize) -> Vec<RowIndex> {
        let Some(mood) = mood else {
            debug!("No score column for requested mood; empty shortlist");
            return Vec::new();
        };

        let scores: Vec<f32> = catalog.iter().map(|movie| movie.mood_score(mood)).collect();

        let mut rows: Vec<RowIndex> = (0..scores.len()).collect();
        // sort_by is stable: ties keep catalog order
        rows.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
        rows.truncate(self.shortlist_len(catalog.len(), n));

        debug!("Shortlisted {} rows for mood {}", rows.len(), mood);
        rows
    }
}

impl Default for CandidateSelector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{MoodScores, MovieRecord};

    fn catalog_with_happy_scores(scores: &[f32]) -> CatalogStore {
        CatalogStore::new(
            scores
                .iter()
                .enumerate()
                .map(|(i, &score)| {
                    let mut movie = MovieRecord::new(i as u32, format!("Movie {}", i));
                    movie.mood_scores = MoodScores::default().with(Mood::Happy, score);
                    movie
                })
                .collect(),
        )
    }

    #[test]
    fn test_unknown_mood_is_empty() {
        let catalog = catalog_with_happy_scores(&[1.0, 2.0]);
        let selector = CandidateSelector::new();
        assert!(selector.select(&catalog, None, 5).is_empty());
    }

    #[test]
    fn test_sorted_by_affinity_with_stable_ties() {
        let catalog = catalog_with_happy_scores(&[1.0, 3.0, 2.0, 3.0, 0.5]);
        let selector = CandidateSelector::new();

        let rows = selector.select(&catalog, Some(Mood::Happy), 1);
        assert_eq!(rows, vec![1, 3, 2, 0, 4]);
    }

    #[test]
    fn test_shortlist_overshoots_requested_count() {
        let scores: Vec<f32> = (0..30).map(|i| i as f32).collect();
        let catalog = catalog_with_happy_scores(&scores);
        let selector = CandidateSelector::new();

        let rows = selector.select(&catalog, Some(Mood::Happy), 3);
        assert_eq!(rows.len(), 15);
        assert_eq!(rows[0], 29);
        assert_eq!(rows[14], 15);
    }

    #[test]
    fn test_shortlist_capped_by_catalog_size() {
        let catalog = catalog_with_happy_scores(&[1.0, 2.0, 3.0]);
        let selector = CandidateSelector::new().with_overshoot(10);

        assert_eq!(selector.select(&catalog, Some(Mood::Happy), 4).len(), 3);
    }

    #[test]
    fn test_undefined_scores_rank_as_zero() {
        let catalog = catalog_with_happy_scores(&[f32::NAN, 0.5, 0.0]);
        let selector = CandidateSelector::new();

        // NaN reads as 0.0 and keeps its place ahead of the later zero
        assert_eq!(selector.select(&catalog, Some(Mood::Happy), 1), vec![1, 0, 2]);
    }

    #[test]
    fn test_many_undefined_scores_keep_a_total_order() {
        let scores: Vec<f32> = (0..64)
            .map(|i| if i % 4 == 0 { f32::NAN } else { i as f32 })
            .collect();
        let catalog = catalog_with_happy_scores(&scores);

        let rows = CandidateSelector::new().select(&catalog, Some(Mood::Happy), 20);
        assert_eq!(rows.len(), 64);
        assert_eq!(&rows[..3], &[63, 62, 61]);
        assert!(rows[48..].iter().all(|&row| row % 4 == 0));
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = CatalogStore::default();
        let selector = CandidateSelector::new();
        assert!(selector.select(&catalog, Some(Mood::Sad), 5).is_empty());
    }
}
