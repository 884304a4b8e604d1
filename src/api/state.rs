use std::sync::Arc;

use crate::services::{MealPlannerStore, RecommendationEngine, RecommendationSettings};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: RecommendationEngine,
}

impl AppState {
    pub fn new(engine: RecommendationEngine) -> Self {
        Self { engine }
    }

    /// Builds state around a store with the given engine settings
    pub fn with_store(store: Arc<dyn MealPlannerStore>, settings: RecommendationSettings) -> Self {
        Self::new(RecommendationEngine::new(store, settings))
    }
}
