mod dish;
mod meal;
mod recommendation;
mod user_preferences;

pub use dish::{Difficulty, Dish, DishType, Nutrition, SpiceLevel};
pub use meal::{MealLogEntry, MealType};
pub use recommendation::{ApiResponse, RecommendationResult, RecommendationsResponse};
pub use user_preferences::{UserPreferenceProfile, VEGETARIAN};
