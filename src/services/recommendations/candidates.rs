use chrono::{Days, NaiveDate};
use std::collections::HashSet;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::Dish,
    services::store::MealPlannerStore,
};

use super::RecommendationSettings;

/// Dishes eligible for one recommendation request
#[derive(Debug, Clone, PartialEq)]
pub enum CandidatePool {
    /// Catalog minus recently eaten dishes; these get scored
    Personalized(Vec<Dish>),
    /// Unrestricted catalog used when the exclusion left nothing
    Fallback(Vec<Dish>),
}

impl CandidatePool {
    pub fn len(&self) -> usize {
        match self {
            CandidatePool::Personalized(dishes) | CandidatePool::Fallback(dishes) => dishes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// First and last day (both inclusive) of the history window ending on `date`
pub fn lookback_window(date: NaiveDate, days: u32) -> (NaiveDate, NaiveDate) {
    let span = u64::from(days.saturating_sub(1));
    let since = date.checked_sub_days(Days::new(span)).unwrap_or(NaiveDate::MIN);
    (since, date)
}

/// Builds the candidate pool for a user on a given date
pub async fn select_candidates(
    store: &dyn MealPlannerStore,
    user_id: Uuid,
    date: NaiveDate,
    settings: &RecommendationSettings,
) -> AppResult<CandidatePool> {
    let (since, until) = lookback_window(date, settings.lookback_days);

    let recent = store
        .get_recent_meal_log(user_id, since, until)
        .await
        .map_err(|e| AppError::upstream("meal log read", e))?;

    let recently_eaten: HashSet<Uuid> = recent.iter().map(|entry| entry.dish_id).collect();

    tracing::debug!(
        user_id = %user_id,
        since = %since,
        until = %until,
        logged_meals = recent.len(),
        recently_eaten = recently_eaten.len(),
        "Built recently eaten set"
    );

    let dishes = store
        .list_dishes_excluding(&recently_eaten, settings.candidate_limit)
        .await
        .map_err(|e| AppError::upstream("catalog read", e))?;

    if !dishes.is_empty() {
        return Ok(CandidatePool::Personalized(dishes));
    }

    tracing::warn!(
        user_id = %user_id,
        excluded = recently_eaten.len(),
        "No dishes left after excluding recent meals, falling back to full catalog"
    );

    let dishes = store
        .list_dishes(settings.fallback_limit)
        .await
        .map_err(|e| AppError::upstream("catalog read", e))?;

    Ok(CandidatePool::Fallback(dishes))
}
