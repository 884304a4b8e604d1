pub mod recommendations;
pub mod store;

pub use recommendations::{RecommendationEngine, RecommendationSettings};
pub use store::MealPlannerStore;
