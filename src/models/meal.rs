use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, ops::RangeInclusive, str::FromStr};
use uuid::Uuid;

/// Time-of-day slot a meal is logged or recommended for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    /// Calories a dish should fall within to suit this slot
    pub fn calorie_range(self) -> RangeInclusive<u32> {
        match self {
            MealType::Breakfast => 200..=500,
            MealType::Lunch => 300..=700,
            MealType::Dinner => 400..=800,
            MealType::Snack => 100..=400,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

impl Display for MealType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" => Ok(MealType::Snack),
            other => Err(format!(
                "unknown meal type '{}', expected breakfast, lunch, dinner or snack",
                other
            )),
        }
    }
}

/// A dish a user ate on a given day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealLogEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub dish_id: Uuid,
    pub date: NaiveDate,
    pub meal_type: MealType,
}

impl MealLogEntry {
    pub fn new(user_id: Uuid, dish_id: Uuid, date: NaiveDate, meal_type: MealType) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            dish_id,
            date,
            meal_type,
        }
    }
}
