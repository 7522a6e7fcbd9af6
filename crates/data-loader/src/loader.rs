//! Catalog loading and alignment checks.
//!
//! Both artifacts are parsed in parallel and only ever returned together,
//! so a catalog can never be paired with a matrix from another build.

use crate::error::{DataLoadError, Result};
use crate::parser::{self, MOVIES_FILE, SIMILARITY_FILE};
use crate::types::*;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// Knobs for [`Catalog::load_from_dir`]
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Fail the load when matrix and catalog row counts differ.
    ///
    /// When false the mismatch is only logged and lookups outside the
    /// matrix are skipped at ranking time.
    pub strict_alignment: bool,
}

impl LoadOptions {
    pub fn strict() -> Self {
        Self {
            strict_alignment: true,
        }
    }
}

impl Catalog {
    /// Load `movies.jsonl` and `similarity.csv` from a data directory
    pub fn load_from_dir(data_dir: &Path, options: &LoadOptions) -> Result<Self> {
        info!("Loading catalog from {:?}", data_dir);
        let start = Instant::now();

        let movies_path = data_dir.join(MOVIES_FILE);
        let similarity_path = data_dir.join(SIMILARITY_FILE);

        let (movies, similarity) = rayon::join(
            || parser::parse_movies(&movies_path),
            || parser::parse_similarity(&similarity_path),
        );
        let movies = movies?;
        let similarity = similarity?;

        let catalog = Catalog::new(CatalogStore::new(movies), similarity);
        catalog.validate(options)?;

        info!(
            "Loaded {} movies and a {}x{} similarity matrix in {:?}",
            catalog.movies.len(),
            catalog.similarity.dim(),
            catalog.similarity.dim(),
            start.elapsed()
        );
        Ok(catalog)
    }

    /// Check integrity of the loaded pair
    ///
    /// - ratings and popularity must be finite
    /// - row counts must agree (fatal only under strict alignment)
    pub fn validate(&self, options: &LoadOptions) -> Result<()> {
        for movie in self.movies.iter() {
            if !movie.vote_average.is_finite() {
                return Err(DataLoadError::ValidationError(format!(
                    "Row {} ({}) has non-finite vote_average {}",
                    movie.id, movie.title, movie.vote_average
                )));
            }
            if !movie.popularity.is_finite() {
                return Err(DataLoadError::ValidationError(format!(
                    "Row {} ({}) has non-finite popularity {}",
                    movie.id, movie.title, movie.popularity
                )));
            }
        }

        if !self.is_aligned() {
            if options.strict_alignment {
                return Err(DataLoadError::DimensionMismatch {
                    catalog_rows: self.movies.len(),
                    matrix_rows: self.similarity.dim(),
                });
            }
            warn!(
                "Similarity matrix has {} rows but catalog has {} movies; out-of-range pairs will be skipped",
                self.similarity.dim(),
                self.movies.len()
            );
        }
        Ok(())
    }
}
