use crate::models::{Dish, RecommendationResult, UserPreferenceProfile};

/// A candidate dish paired with its raw score and why it scored that way
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDish {
    pub dish: Dish,
    pub score: f64,
    pub reason: String,
}

/// Orders by score, highest first, keeping catalog order among equal scores,
/// then keeps the first `max_results`
pub fn rank(mut scored: Vec<ScoredDish>, max_results: usize) -> Vec<ScoredDish> {
    // sort_by is stable
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(max_results);
    scored
}

pub fn round_score(score: f64) -> f64 {
    (score * 10.0).round() / 10.0
}

/// Converts ranked dishes into results carrying the rounded score and favorite flag
pub fn annotate(ranked: Vec<ScoredDish>, profile: &UserPreferenceProfile) -> Vec<RecommendationResult> {
    ranked
        .into_iter()
        .map(|ScoredDish { dish, score, reason }| {
            let is_favorite = profile.is_favorite(&dish.id);
            RecommendationResult::from_dish(dish, round_score(score), is_favorite, reason)
        })
        .collect()
}
