use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use uuid::Uuid;

/// Spice tolerance scale, ordered from mildest to hottest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpiceLevel {
    Mild,
    Medium,
    Hot,
    ExtraHot,
}

impl SpiceLevel {
    /// Position on the scale, 0 for mild through 3 for extra-hot
    pub fn rank(self) -> u8 {
        match self {
            SpiceLevel::Mild => 0,
            SpiceLevel::Medium => 1,
            SpiceLevel::Hot => 2,
            SpiceLevel::ExtraHot => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SpiceLevel::Mild => "mild",
            SpiceLevel::Medium => "medium",
            SpiceLevel::Hot => "hot",
            SpiceLevel::ExtraHot => "extra-hot",
        }
    }
}

impl Display for SpiceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SpiceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mild" => Ok(SpiceLevel::Mild),
            "medium" => Ok(SpiceLevel::Medium),
            "hot" => Ok(SpiceLevel::Hot),
            "extra-hot" => Ok(SpiceLevel::ExtraHot),
            other => Err(format!("unknown spice level '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DishType {
    Veg,
    #[serde(rename = "Non-Veg")]
    NonVeg,
}

impl DishType {
    pub fn as_str(self) -> &'static str {
        match self {
            DishType::Veg => "Veg",
            DishType::NonVeg => "Non-Veg",
        }
    }
}

impl FromStr for DishType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Veg" => Ok(DishType::Veg),
            "Non-Veg" => Ok(DishType::NonVeg),
            other => Err(format!("unknown dish type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{}'", other)),
        }
    }
}

/// Per-serving nutrition facts. Missing values read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Nutrition {
    /// grams
    pub protein: u32,
    /// grams
    pub carbs: u32,
    /// grams
    pub fat: u32,
    /// grams
    pub fiber: u32,
    /// grams
    pub sugar: u32,
    /// milligrams
    pub sodium: u32,
}

/// A catalog dish
///
/// Optional fields stay `None` when the catalog entry omits them. Scoring treats
/// absent calories as 0 and skips the spice term when no spice level is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub id: Uuid,
    pub name: String,
    pub cuisine: String,
    #[serde(rename = "type")]
    pub dish_type: DishType,
    #[serde(default)]
    pub calories: Option<u32>,
    #[serde(default)]
    pub dietary_tags: Vec<String>,
    #[serde(default)]
    pub spice_level: Option<SpiceLevel>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub prep_time: Option<u32>,
    #[serde(default)]
    pub cook_time: Option<u32>,
    #[serde(default)]
    pub nutrition: Option<Nutrition>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Dish {
    /// Creates a dish with only the required catalog fields set
    pub fn new(name: impl Into<String>, cuisine: impl Into<String>, dish_type: DishType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            cuisine: cuisine.into(),
            dish_type,
            calories: None,
            dietary_tags: Vec::new(),
            spice_level: None,
            difficulty: None,
            prep_time: None,
            cook_time: None,
            nutrition: None,
            image: None,
            description: None,
        }
    }

    pub fn with_calories(mut self, calories: u32) -> Self {
        self.calories = Some(calories);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dietary_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_spice(mut self, spice_level: SpiceLevel) -> Self {
        self.spice_level = Some(spice_level);
        self
    }

    /// Calories used for range checks; absent reads as 0
    pub fn calories_or_zero(&self) -> u32 {
        self.calories.unwrap_or(0)
    }
}
