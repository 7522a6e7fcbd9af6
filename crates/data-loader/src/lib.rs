//! # Data Loader Crate
//!
//! Loads the read-only mood catalog and its pairwise similarity matrix.
//!
//! ## Main Components
//!
//! - **types**: domain types (Mood, MovieRecord, CatalogStore, SimilarityMatrix, Catalog)
//! - **parser**: parse the `movies.jsonl` and `similarity.csv` artifacts
//! - **loader**: load both artifacts together and check their alignment
//! - **handle**: load-once, shared access to the catalog
//! - **error**: error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{CatalogHandle, LoadOptions, Mood};
//!
//! let handle = CatalogHandle::new("data", LoadOptions::default());
//! let catalog = handle.get()?;
//!
//! let movie = catalog.movies.get(0).unwrap();
//! println!("{} scores {} for happy", movie.title, movie.mood_score(Mood::Happy));
//! ```

// Public modules
pub mod error;
pub mod handle;
pub mod loader;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use handle::CatalogHandle;
pub use loader::LoadOptions;
pub use types::{
    Catalog, CatalogStore, Mood, MoodScores, MovieId, MovieRecord, RowIndex, SimilarityMatrix,
};
