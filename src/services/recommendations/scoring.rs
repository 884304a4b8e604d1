use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::HashSet;

use crate::models::{Dish, DishType, MealType, UserPreferenceProfile};

/// Points awarded by each scoring term
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub base: f64,
    pub favorite_region: f64,
    /// Awarded once per distinct dish tag the user also prefers
    pub dietary_tag: f64,
    pub vegetarian: f64,
    pub favorite_dish: f64,
    pub calorie_fit: f64,
    pub spice_fit: f64,
    /// Exclusive upper bound of the random jitter
    pub jitter_max: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            base: 1.0,
            favorite_region: 5.0,
            dietary_tag: 3.0,
            vegetarian: 3.0,
            favorite_dish: 10.0,
            calorie_fit: 2.0,
            spice_fit: 2.0,
            jitter_max: 0.5,
        }
    }
}

/// Source of the small random value added to every score
pub trait JitterSource {
    /// Returns a value in `[0, max)`, or 0 when `max` is not positive
    fn next_jitter(&mut self, max: f64) -> f64;
}

/// Uniform jitter drawn from any `rand` generator
pub struct RandomJitter<R> {
    rng: R,
}

impl<R: Rng> RandomJitter<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomJitter<StdRng> {
    /// Jitter seeded from the operating system
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Reproducible jitter for a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> JitterSource for RandomJitter<R> {
    fn next_jitter(&mut self, max: f64) -> f64 {
        if max > 0.0 {
            self.rng.gen_range(0.0..max)
        } else {
            0.0
        }
    }
}

/// Jitter that is always zero
#[derive(Debug, Default, Clone, Copy)]
pub struct NoJitter;

impl JitterSource for NoJitter {
    fn next_jitter(&mut self, _max: f64) -> f64 {
        0.0
    }
}

/// Contribution of each term to a dish's score
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub base: f64,
    pub favorite_region: f64,
    pub dietary_tags: f64,
    pub vegetarian: f64,
    pub favorite_dish: f64,
    pub calorie_fit: f64,
    pub spice_fit: f64,
    pub jitter: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.base
            + self.favorite_region
            + self.dietary_tags
            + self.vegetarian
            + self.favorite_dish
            + self.calorie_fit
            + self.spice_fit
            + self.jitter
    }

    /// Short explanation naming the strongest preference term
    ///
    /// Ties go to the earlier term in the list below.
    pub fn reason(&self, dish: &Dish, meal_type: MealType) -> String {
        let terms = [
            (self.favorite_dish, "One of your favorite dishes".to_string()),
            (
                self.favorite_region,
                format!("Matches your favorite cuisine ({})", dish.cuisine),
            ),
            (self.dietary_tags, "Fits your dietary preferences".to_string()),
            (self.vegetarian, "Fits your vegetarian diet".to_string()),
            (self.calorie_fit, format!("Right portion for {}", meal_type)),
            (self.spice_fit, "Within your spice tolerance".to_string()),
        ];

        terms
            .into_iter()
            .fold(None::<(f64, String)>, |best, (points, text)| match best {
                Some((top, _)) if top >= points => best,
                _ if points > 0.0 => Some((points, text)),
                _ => best,
            })
            .map(|(_, text)| text)
            .unwrap_or_else(|| "Something new to try".to_string())
    }
}

/// Scores one candidate dish against a user's profile for a meal slot
///
/// Every term is independent and non-negative, so the total is never below the
/// base weight.
pub fn score_dish<J: JitterSource + ?Sized>(
    dish: &Dish,
    profile: &UserPreferenceProfile,
    meal_type: MealType,
    weights: &ScoringWeights,
    jitter: &mut J,
) -> ScoreBreakdown {
    let favorite_region = if profile.likes_region(&dish.cuisine) {
        weights.favorite_region
    } else {
        0.0
    };

    // Tags are a set; repeats in stored data count once
    let matching_tags: HashSet<&str> = dish
        .dietary_tags
        .iter()
        .map(String::as_str)
        .filter(|tag| !tag.is_empty() && profile.prefers(tag))
        .collect();

    let vegetarian = if profile.is_vegetarian() && dish.dish_type == DishType::Veg {
        weights.vegetarian
    } else {
        0.0
    };

    let favorite_dish = if profile.is_favorite(&dish.id) {
        weights.favorite_dish
    } else {
        0.0
    };

    let calorie_fit = if meal_type.calorie_range().contains(&dish.calories_or_zero()) {
        weights.calorie_fit
    } else {
        0.0
    };

    let spice_fit = match (profile.spice_level, dish.spice_level) {
        (Some(tolerance), Some(heat)) if heat.rank() <= tolerance.rank() => weights.spice_fit,
        _ => 0.0,
    };

    ScoreBreakdown {
        base: weights.base,
        favorite_region,
        dietary_tags: weights.dietary_tag * matching_tags.len() as f64,
        vegetarian,
        favorite_dish,
        calorie_fit,
        spice_fit,
        jitter: jitter.next_jitter(weights.jitter_max),
    }
}
