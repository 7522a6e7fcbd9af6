//! Errors surfaced by the recommendation service.

use data_loader::{DataLoadError, RowIndex};
use std::sync::Arc;
use thiserror::Error;

/// Failure modes of a recommendation call.
///
/// An unknown mood is not among them: it takes the top-rated fallback.
#[derive(Error, Debug, Clone)]
pub enum RecommendError {
    /// The request is missing something it needs; nothing was computed
    #[error("{0}")]
    Validation(String),

    /// A referenced catalog row does not exist
    #[error("Movie {0} not found")]
    NotFound(RowIndex),

    /// Catalog artifacts could not be loaded; stays failed for the process
    #[error("Recommendation data unavailable: {0}")]
    DataUnavailable(Arc<DataLoadError>),

    /// Unexpected fault while computing a result
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<Arc<DataLoadError>> for RecommendError {
    fn from(err: Arc<DataLoadError>) -> Self {
        RecommendError::DataUnavailable(err)
    }
}
