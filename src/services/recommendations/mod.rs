use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{MealType, RecommendationsResponse, UserPreferenceProfile},
    services::store::MealPlannerStore,
};

pub mod candidates;
pub mod ranking;
pub mod scoring;

pub use candidates::{lookback_window, select_candidates, CandidatePool};
pub use ranking::{annotate, rank, round_score, ScoredDish};
pub use scoring::{score_dish, JitterSource, NoJitter, RandomJitter, ScoreBreakdown, ScoringWeights};

/// Score given to every dish on the fallback path, where no personalization applies
pub const UNPERSONALIZED_SCORE: f64 = 1.0;

/// Per-dish reason on the fallback path
pub const UNPERSONALIZED_REASON: &str = "Popular dish to try";

/// Response-level summary of how the list was built
fn summary_reason(meal_type: MealType, fallback: bool) -> String {
    if fallback {
        format!("Popular {} recommendations to get you started", meal_type)
    } else {
        format!("Recommendations for {} based on your preferences", meal_type)
    }
}

/// Limits and weights used by the engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendationSettings {
    /// Dishes fetched for scoring after the recent-meal exclusion
    pub candidate_limit: usize,
    /// Dishes fetched when the exclusion leaves nothing
    pub fallback_limit: usize,
    /// Recommendations returned per request
    pub max_results: usize,
    /// Days of history, including the requested date, counted as recent
    pub lookback_days: u32,
    pub weights: ScoringWeights,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            candidate_limit: 100,
            fallback_limit: 20,
            max_results: 12,
            lookback_days: 7,
            weights: ScoringWeights::default(),
        }
    }
}

/// Picks and ranks dishes for a user's meal slot
///
/// The engine is stateless: each call reads the profile, recent meal log and
/// catalog from the store and computes a fresh ranking. It never writes.
#[derive(Clone)]
pub struct RecommendationEngine {
    store: Arc<dyn MealPlannerStore>,
    settings: RecommendationSettings,
}

impl RecommendationEngine {
    pub fn new(store: Arc<dyn MealPlannerStore>, settings: RecommendationSettings) -> Self {
        Self { store, settings }
    }

    pub fn settings(&self) -> &RecommendationSettings {
        &self.settings
    }

    /// Recommends dishes using operating-system seeded jitter
    pub async fn recommend(
        &self,
        user_id: Uuid,
        meal_type: MealType,
        date: NaiveDate,
    ) -> AppResult<RecommendationsResponse> {
        let mut jitter = RandomJitter::from_entropy();
        self.recommend_with_jitter(user_id, meal_type, date, &mut jitter)
            .await
    }

    /// Recommends dishes drawing score jitter from `jitter`
    pub async fn recommend_with_jitter<J>(
        &self,
        user_id: Uuid,
        meal_type: MealType,
        date: NaiveDate,
        jitter: &mut J,
    ) -> AppResult<RecommendationsResponse>
    where
        J: JitterSource + Send + ?Sized,
    {
        let start = Instant::now();

        tracing::info!(
            user_id = %user_id,
            meal_type = %meal_type,
            date = %date,
            store = self.store.name(),
            "Computing recommendations"
        );

        let profile = self
            .store
            .get_user_profile(user_id)
            .await
            .map_err(|e| AppError::upstream("profile read", e))?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        let pool = select_candidates(self.store.as_ref(), user_id, date, &self.settings).await?;
        let fallback = matches!(pool, CandidatePool::Fallback(_));
        let pool_size = pool.len();

        let ranked = self.rank_pool(pool, &profile, meal_type, jitter);
        let recommendations = annotate(ranked, &profile);

        tracing::info!(
            user_id = %user_id,
            meal_type = %meal_type,
            candidates = pool_size,
            returned = recommendations.len(),
            fallback,
            processing_time_ms = start.elapsed().as_millis(),
            "Recommendations computed"
        );

        Ok(RecommendationsResponse::new(
            meal_type,
            date,
            recommendations,
            summary_reason(meal_type, fallback),
        ))
    }

    /// Scores and ranks a personalized pool; fallback pools keep catalog order at a flat score
    fn rank_pool<J>(
        &self,
        pool: CandidatePool,
        profile: &UserPreferenceProfile,
        meal_type: MealType,
        jitter: &mut J,
    ) -> Vec<ScoredDish>
    where
        J: JitterSource + ?Sized,
    {
        match pool {
            CandidatePool::Personalized(dishes) => {
                let scored = dishes
                    .into_iter()
                    .map(|dish| {
                        let breakdown =
                            score_dish(&dish, profile, meal_type, &self.settings.weights, &mut *jitter);
                        tracing::debug!(
                            dish_id = %dish.id,
                            dish = %dish.name,
                            score = breakdown.total(),
                            breakdown = ?breakdown,
                            "Scored candidate"
                        );
                        ScoredDish {
                            score: breakdown.total(),
                            reason: breakdown.reason(&dish, meal_type),
                            dish,
                        }
                    })
                    .collect();
                rank(scored, self.settings.max_results)
            }
            CandidatePool::Fallback(dishes) => dishes
                .into_iter()
                .take(self.settings.max_results)
                .map(|dish| ScoredDish {
                    dish,
                    score: UNPERSONALIZED_SCORE,
                    reason: UNPERSONALIZED_REASON.to_string(),
                })
                .collect(),
        }
    }
}
