//! Server configuration, from flags or `MOOD_RECS_*` environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use data_loader::LoadOptions;

use crate::api::{AppState, DEFAULT_MAX_COUNT};

#[derive(Parser, Debug, Clone)]
#[command(name = "mood-recs-server")]
#[command(about = "Mood-based movie recommendation HTTP server", long_about = None)]
pub struct ServerConfig {
    /// Directory holding movies.jsonl and similarity.csv
    #[arg(long, env = "MOOD_RECS_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Address to listen on
    #[arg(long, env = "MOOD_RECS_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Load the catalog at startup instead of on the first request
    #[arg(long, env = "MOOD_RECS_PRELOAD")]
    pub preload: bool,

    /// Fail the load when catalog and similarity matrix sizes differ
    #[arg(long, env = "MOOD_RECS_STRICT_ALIGNMENT")]
    pub strict_alignment: bool,

    /// Largest count a single request may ask for
    #[arg(long, env = "MOOD_RECS_MAX_COUNT", default_value_t = DEFAULT_MAX_COUNT)]
    pub max_count: usize,
}

impl ServerConfig {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            strict_alignment: self.strict_alignment,
        }
    }

    /// Apply request limits to freshly built state
    pub fn apply(&self, state: AppState) -> AppState {
        state.with_max_count(self.max_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::RecommendationService;
    use data_loader::{Catalog, CatalogHandle};
    use std::sync::Arc;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::try_parse_from(["mood-recs-server"]).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.bind.port(), 8000);
        assert!(!config.preload);
        assert!(!config.load_options().strict_alignment);
        assert_eq!(config.max_count, 50);
    }

    #[test]
    fn test_flags() {
        let config = ServerConfig::try_parse_from([
            "mood-recs-server",
            "--data-dir",
            "/srv/recs",
            "--bind",
            "0.0.0.0:9000",
            "--preload",
            "--strict-alignment",
            "--max-count",
            "10",
        ])
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/recs"));
        assert!(config.preload);
        assert!(config.load_options().strict_alignment);

        let handle = CatalogHandle::preloaded(Catalog::default());
        let state = config.apply(AppState::new(RecommendationService::new(Arc::new(handle))));
        assert_eq!(state.max_count, 10);
    }
}
