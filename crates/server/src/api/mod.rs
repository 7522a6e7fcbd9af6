//! HTTP surface over [`RecommendationService`](crate::service::RecommendationService).

mod error;
mod handlers;
mod routes;
mod state;

pub use error::ApiError;
pub use handlers::{RecommendRequest, RecommendResponse};
pub use routes::create_router;
pub use state::{AppState, DEFAULT_MAX_COUNT};
