//! Read-side persistence port used by the recommendation engine
//!
//! The engine never writes through this trait. Implementations live in `crate::db`:
//! a Postgres store for deployments and an in-memory store for development and tests.

use chrono::NaiveDate;
use std::collections::HashSet;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Dish, MealLogEntry, UserPreferenceProfile},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MealPlannerStore: Send + Sync {
    /// Fetch a user's preference profile
    ///
    /// Returns `Ok(None)` when the user does not exist.
    async fn get_user_profile(&self, user_id: Uuid) -> AppResult<Option<UserPreferenceProfile>>;

    /// Fetch the user's meal log between two dates, both inclusive
    async fn get_recent_meal_log(
        &self,
        user_id: Uuid,
        since: NaiveDate,
        until: NaiveDate,
    ) -> AppResult<Vec<MealLogEntry>>;

    /// List up to `limit` catalog dishes in natural order, skipping `exclude`
    async fn list_dishes_excluding(
        &self,
        exclude: &HashSet<Uuid>,
        limit: usize,
    ) -> AppResult<Vec<Dish>>;

    /// List up to `limit` catalog dishes in natural order
    async fn list_dishes(&self, limit: usize) -> AppResult<Vec<Dish>>;

    /// Store name for logging
    fn name(&self) -> &'static str;
}
