//! # Sources Crate
//!
//! Candidate generation for mood recommendations.
//!
//! ## Components
//!
//! ### CandidateSelector
//! Mood shortlist: the catalog rows with the strongest affinity for the
//! requested mood, overshooting the requested count (5x by default) so the
//! diversity ranker has a pool to choose from.
//!
//! ### TopRatedSource
//! Fallback list: the best-rated rows of the catalog, used when the mood is
//! unknown or the mood ranking comes up short.
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{CatalogHandle, LoadOptions, Mood};
//! use sources::{CandidateSelector, TopRatedSource};
//!
//! let catalog = CatalogHandle::new("data", LoadOptions::default()).get()?;
//!
//! let shortlist = CandidateSelector::new().select(&catalog.movies, Some(Mood::Happy), 5);
//! let fallback = TopRatedSource::new().top(&catalog.movies, 5);
//! ```

// Public modules
pub mod selector;
pub mod top_rated;

// Re-export commonly used types
pub use selector::{CandidateSelector, SHORTLIST_OVERSHOOT};
pub use top_rated::TopRatedSource;
