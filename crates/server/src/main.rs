//! HTTP server for mood-based movie recommendations.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use data_loader::CatalogHandle;
use server::{create_router, AppState, RecommendationService, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::parse();
    info!("Starting mood-recs server with {:?}", config);

    let handle = Arc::new(CatalogHandle::new(config.data_dir.clone(), config.load_options()));

    if config.preload {
        info!("Preloading catalog from {:?}...", config.data_dir);
        let preload = Arc::clone(&handle);
        let catalog = tokio::task::spawn_blocking(move || preload.get())
            .await
            .context("Catalog preload task failed")?
            .with_context(|| format!("Failed to load catalog from {:?}", config.data_dir))?;
        info!(
            "Catalog ready: {} movies, {}x{} similarity matrix",
            catalog.movies.len(),
            catalog.similarity.dim(),
            catalog.similarity.dim()
        );
    }

    let service = RecommendationService::new(handle);
    let app = create_router(config.apply(AppState::new(service)));

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    info!("Listening on http://{}", config.bind);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
