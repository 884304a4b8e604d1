use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use super::SpiceLevel;

/// Dietary preference that earns the vegetarian alignment bonus
pub const VEGETARIAN: &str = "vegetarian";

/// A user's stored food preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferenceProfile {
    /// The user these preferences belong to
    pub user_id: Uuid,
    /// Dietary tags such as "vegan" or "gluten-free"
    #[serde(default)]
    pub dietary_preferences: HashSet<String>,
    /// Cuisines the user likes, e.g. "South Indian"
    #[serde(default)]
    pub favorite_regions: HashSet<String>,
    /// Highest spice level the user tolerates
    #[serde(default)]
    pub spice_level: Option<SpiceLevel>,
    /// Dishes the user marked as favorite
    #[serde(default)]
    pub favorite_dish_ids: HashSet<Uuid>,
}

impl UserPreferenceProfile {
    /// Creates an empty profile for a user
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            dietary_preferences: HashSet::new(),
            favorite_regions: HashSet::new(),
            spice_level: None,
            favorite_dish_ids: HashSet::new(),
        }
    }

    pub fn is_favorite(&self, dish_id: &Uuid) -> bool {
        self.favorite_dish_ids.contains(dish_id)
    }

    pub fn prefers(&self, tag: &str) -> bool {
        self.dietary_preferences.contains(tag)
    }

    pub fn likes_region(&self, cuisine: &str) -> bool {
        self.favorite_regions.contains(cuisine)
    }

    pub fn is_vegetarian(&self) -> bool {
        self.prefers(VEGETARIAN)
    }
}
