use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/moods", get(handlers::list_moods))
        .route("/recommendations", post(handlers::recommend))
        .route("/movies/:id/similar", get(handlers::similar))
        .route("/search", get(handlers::search))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
