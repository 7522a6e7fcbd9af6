//! Server crate for the mood recommendation engine.
//!
//! [`service::RecommendationService`] coordinates selection, feature
//! computation and diversity ranking; [`api`] exposes it over HTTP.

pub mod api;
pub mod config;
pub mod error;
pub mod service;

pub use api::{create_router, AppState};
pub use config::ServerConfig;
pub use error::RecommendError;
pub use service::{
    MovieRecommendation, MovieView, RecommendationService, RecommendationSource,
    DEFAULT_COUNT, DEFAULT_DIVERSITY,
};
