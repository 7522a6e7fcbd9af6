use crate::service::RecommendationService;

/// Default cap on `count` for a single request
pub const DEFAULT_MAX_COUNT: usize = 50;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: RecommendationService,
    /// Upper bound applied to every requested count
    pub max_count: usize,
}

impl AppState {
    pub fn new(service: RecommendationService) -> Self {
        Self {
            service,
            max_count: DEFAULT_MAX_COUNT,
        }
    }

    pub fn with_max_count(mut self, max_count: usize) -> Self {
        self.max_count = max_count;
        self
    }
}
