use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::task;

use data_loader::RowIndex;

use super::error::ApiResult;
use super::AppState;
use crate::error::RecommendError;
use crate::service::{MovieView, RecommendationService, DEFAULT_COUNT, DEFAULT_DIVERSITY};

/// Results returned by `/search` when no limit is given
const DEFAULT_SEARCH_LIMIT: usize = 20;

// Request/Response types

#[derive(Debug, Default, Deserialize)]
pub struct RecommendRequest {
    pub mood: Option<String>,
    pub count: Option<usize>,
    pub diversity: Option<f32>,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub success: bool,
    pub mood: String,
    pub count: usize,
    pub recommendations: Vec<MovieView>,
    pub ml_powered: bool,
}

#[derive(Debug, Deserialize)]
pub struct SimilarQuery {
    pub count: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub limit: Option<usize>,
}

/// Run CPU-bound or possibly-loading work off the async reactor
async fn run_blocking<T, F>(work: F) -> Result<T, RecommendError>
where
    F: FnOnce() -> Result<T, RecommendError> + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(work)
        .await
        .map_err(|e| RecommendError::Internal(format!("Recommendation task failed: {}", e)))?
}

// Health check

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "catalog_loaded": state.service.catalog_loaded(),
    }))
}

// Moods

pub async fn list_moods() -> Json<Value> {
    Json(json!({
        "success": true,
        "moods": RecommendationService::moods(),
    }))
}

// Recommendations

pub async fn recommend(
    State(state): State<AppState>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> ApiResult<Json<RecommendResponse>> {
    let Json(request) = payload?;

    // Only blank moods are rejected; anything else unrecognized takes the fallback
    let mood = request
        .mood
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| RecommendError::Validation("Mood is required".to_string()))?;
    let count = request.count.unwrap_or(DEFAULT_COUNT).min(state.max_count);
    let diversity = request.diversity.unwrap_or(DEFAULT_DIVERSITY);

    let service = state.service.clone();
    let requested = mood.clone();
    let recommendations =
        run_blocking(move || service.recommend(&requested, count, diversity)).await?;

    let recommendations: Vec<MovieView> = recommendations.into_iter().map(|r| r.movie).collect();
    Ok(Json(RecommendResponse {
        success: true,
        mood,
        count: recommendations.len(),
        recommendations,
        ml_powered: true,
    }))
}

// Similar movies

pub async fn similar(
    State(state): State<AppState>,
    path: Result<Path<RowIndex>, PathRejection>,
    query: Result<Query<SimilarQuery>, QueryRejection>,
) -> ApiResult<Json<Value>> {
    let Path(id) = path?;
    let Query(query) = query?;
    let count = query.count.unwrap_or(DEFAULT_COUNT).min(state.max_count);

    let service = state.service.clone();
    let recommendations = run_blocking(move || service.similar(id, count)).await?;
    let recommendations: Vec<MovieView> = recommendations.into_iter().map(|r| r.movie).collect();

    Ok(Json(json!({
        "success": true,
        "count": recommendations.len(),
        "recommendations": recommendations,
    })))
}

// Search

pub async fn search(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> ApiResult<Json<Value>> {
    let Query(query) = query?;
    let limit = query.limit.unwrap_or(DEFAULT_SEARCH_LIMIT).min(state.max_count);

    let service = state.service.clone();
    let results = run_blocking(move || service.search(&query.q, limit)).await?;

    Ok(Json(json!({
        "success": true,
        "count": results.len(),
        "results": results,
    })))
}
