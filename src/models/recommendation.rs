use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use super::{Difficulty, Dish, DishType, MealType, Nutrition, SpiceLevel};

/// A dish returned to the caller, annotated with its score
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResult {
    pub id: Uuid,
    pub name: String,
    pub cuisine: String,
    #[serde(rename = "type")]
    pub dish_type: DishType,
    pub calories: u32,
    pub dietary_tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spice_level: Option<SpiceLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<u32>,
    pub nutrition: Nutrition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Score rounded to one decimal place
    pub recommendation_score: f64,
    pub is_favorite: bool,
    pub reason: String,
}

impl RecommendationResult {
    /// Snapshots a dish together with its final score, favorite flag and reason
    pub fn from_dish(
        dish: Dish,
        recommendation_score: f64,
        is_favorite: bool,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            id: dish.id,
            name: dish.name,
            cuisine: dish.cuisine,
            dish_type: dish.dish_type,
            calories: dish.calories.unwrap_or(0),
            dietary_tags: dish.dietary_tags,
            spice_level: dish.spice_level,
            difficulty: dish.difficulty,
            prep_time: dish.prep_time,
            cook_time: dish.cook_time,
            nutrition: dish.nutrition.unwrap_or_default(),
            image: dish.image,
            description: dish.description,
            recommendation_score,
            is_favorite,
            reason: reason.into(),
        }
    }
}

/// Recommendations for one meal slot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsResponse {
    pub meal_type: MealType,
    pub date: NaiveDate,
    pub recommendations: Vec<RecommendationResult>,
    pub total_found: usize,
    /// Summary of how the list was built
    pub reason: String,
}

impl RecommendationsResponse {
    pub fn new(
        meal_type: MealType,
        date: NaiveDate,
        recommendations: Vec<RecommendationResult>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            meal_type,
            date,
            total_found: recommendations.len(),
            recommendations,
            reason: reason.into(),
        }
    }
}

/// Success envelope shared by all JSON endpoints
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
