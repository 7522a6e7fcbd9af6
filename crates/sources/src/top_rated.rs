//! Top-rated fallback list.
//!
//! Used whenever mood ranking cannot produce a full result: highest
//! `vote_average` first, then highest `vote_count`, then catalog order.

use data_loader::{CatalogStore, MovieRecord, RowIndex};
use tracing::{debug, instrument};

/// Produces the catalog's natural "best rated" ordering
#[derive(Debug, Clone, Default)]
pub struct TopRatedSource;

impl TopRatedSource {
    pub fn new() -> Self {
        Self
    }

    /// Row indices of the `count` best-rated movies
    #[instrument(skip(self, catalog), fields(catalog_size = catalog.len()))]
    pub fn top(&self, catalog: &CatalogStore, count: usize) -> Vec<RowIndex> {
        let movies = catalog.as_slice();
        let mut rows: Vec<RowIndex> = (0..movies.len()).collect();

        rows.sort_by(|&a, &b| {
            rating_key(&movies[b])
                .total_cmp(&rating_key(&movies[a]))
                .then_with(|| movies[b].vote_count.cmp(&movies[a].vote_count))
        });
        rows.truncate(count);

        debug!("Selected {} top-rated rows", rows.len());
        rows
    }
}

/// Sort key for the rating; a non-finite rating ranks last
fn rating_key(movie: &MovieRecord) -> f32 {
    if movie.vote_average.is_finite() {
        movie.vote_average
    } else {
        f32::NEG_INFINITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(title: &str, vote_average: f32, vote_count: u32) -> MovieRecord {
        let mut movie = MovieRecord::new(0, title);
        movie.vote_average = vote_average;
        movie.vote_count = vote_count;
        movie
    }

    #[test]
    fn test_orders_by_rating_then_votes() {
        let catalog = CatalogStore::new(vec![
            movie("Decent", 7.0, 500),
            movie("Great but obscure", 8.5, 20),
            movie("Great and famous", 8.5, 9000),
            movie("Poor", 4.0, 10000),
        ]);

        let rows = TopRatedSource::new().top(&catalog, 3);
        assert_eq!(rows, vec![2, 1, 0]);
    }

    #[test]
    fn test_full_ties_keep_catalog_order() {
        let catalog = CatalogStore::new(vec![
            movie("First", 6.0, 100),
            movie("Second", 6.0, 100),
        ]);

        assert_eq!(TopRatedSource::new().top(&catalog, 5), vec![0, 1]);
    }

    #[test]
    fn test_zero_count() {
        let catalog = CatalogStore::new(vec![movie("Only", 6.0, 1)]);
        assert!(TopRatedSource::new().top(&catalog, 0).is_empty());
    }

    #[test]
    fn test_non_finite_ratings_rank_last() {
        let catalog = CatalogStore::new(
            (0..40)
                .map(|i| {
                    let rating = if i % 3 == 0 { f32::NAN } else { (i % 10) as f32 };
                    movie(&format!("Movie {}", i), rating, i as u32)
                })
                .collect(),
        );

        let rows = TopRatedSource::new().top(&catalog, 40);
        assert_eq!(rows.len(), 40);
        // 9.0 rows by vote count: 29, 19 (9 and 39 are NaN rows)
        assert_eq!(&rows[..2], &[29, 19]);
        assert!(rows[26..].iter().all(|&row| row % 3 == 0));
    }
}
