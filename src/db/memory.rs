use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Dish, MealLogEntry, UserPreferenceProfile},
    services::store::MealPlannerStore,
};

/// Store kept entirely in process memory
///
/// The catalog keeps insertion order, which is the natural order the engine sees.
#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<InMemoryInner>,
}

#[derive(Default)]
struct InMemoryInner {
    profiles: HashMap<Uuid, UserPreferenceProfile>,
    dishes: Vec<Dish>,
    meals: Vec<MealLogEntry>,
}

/// Catalog, profiles and meal history to preload into an `InMemoryStore`
#[derive(Debug, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub dishes: Vec<Dish>,
    #[serde(default)]
    pub profiles: Vec<UserPreferenceProfile>,
    #[serde(default)]
    pub meals: Vec<MealLogEntry>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: SeedData) -> Self {
        Self {
            inner: RwLock::new(InMemoryInner {
                profiles: seed
                    .profiles
                    .into_iter()
                    .map(|p| (p.user_id, p))
                    .collect(),
                dishes: seed.dishes,
                meals: seed.meals,
            }),
        }
    }

    /// Loads a JSON seed file (see `demos/seed.json`)
    pub fn from_seed_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read seed file {}: {}", path.display(), e))?;
        let seed: SeedData = serde_json::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("Failed to parse seed file {}: {}", path.display(), e))?;

        tracing::info!(
            dishes = seed.dishes.len(),
            profiles = seed.profiles.len(),
            meals = seed.meals.len(),
            "Loaded seed data"
        );

        Ok(Self::from_seed(seed))
    }

    /// Adds a dish to the end of the catalog, replacing any dish with the same id
    pub async fn insert_dish(&self, dish: Dish) {
        let mut inner = self.inner.write().await;
        if let Some(existing) = inner.dishes.iter_mut().find(|d| d.id == dish.id) {
            *existing = dish;
        } else {
            inner.dishes.push(dish);
        }
    }

    pub async fn upsert_profile(&self, profile: UserPreferenceProfile) {
        let mut inner = self.inner.write().await;
        inner.profiles.insert(profile.user_id, profile);
    }

    pub async fn log_meal(&self, entry: MealLogEntry) {
        let mut inner = self.inner.write().await;
        inner.meals.push(entry);
    }
}

#[async_trait]
impl MealPlannerStore for InMemoryStore {
    async fn get_user_profile(&self, user_id: Uuid) -> AppResult<Option<UserPreferenceProfile>> {
        let inner = self.inner.read().await;
        Ok(inner.profiles.get(&user_id).cloned())
    }

    async fn get_recent_meal_log(
        &self,
        user_id: Uuid,
        since: NaiveDate,
        until: NaiveDate,
    ) -> AppResult<Vec<MealLogEntry>> {
        let inner = self.inner.read().await;
        let mut entries: Vec<MealLogEntry> = inner
            .meals
            .iter()
            .filter(|m| m.user_id == user_id && m.date >= since && m.date <= until)
            .cloned()
            .collect();
        entries.sort_by_key(|m| m.date);
        Ok(entries)
    }

    async fn list_dishes_excluding(
        &self,
        exclude: &HashSet<Uuid>,
        limit: usize,
    ) -> AppResult<Vec<Dish>> {
        let inner = self.inner.read().await;
        Ok(inner
            .dishes
            .iter()
            .filter(|d| !exclude.contains(&d.id))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn list_dishes(&self, limit: usize) -> AppResult<Vec<Dish>> {
        let inner = self.inner.read().await;
        Ok(inner.dishes.iter().take(limit).cloned().collect())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DishType, MealType};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[tokio::test]
    async fn test_list_dishes_keeps_insertion_order_and_limit() {
        let store = InMemoryStore::new();
        for name in ["a", "b", "c"] {
            store.insert_dish(Dish::new(name, "Thai", DishType::Veg)).await;
        }

        let dishes = store.list_dishes(2).await.unwrap();
        let names: Vec<&str> = dishes.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_list_dishes_excluding() {
        let store = InMemoryStore::new();
        let skip = Dish::new("skip", "Thai", DishType::Veg);
        let keep = Dish::new("keep", "Thai", DishType::Veg);
        store.insert_dish(skip.clone()).await;
        store.insert_dish(keep.clone()).await;

        let exclude: HashSet<Uuid> = [skip.id].into_iter().collect();
        let dishes = store.list_dishes_excluding(&exclude, 100).await.unwrap();
        assert_eq!(dishes, vec![keep]);
    }

    #[tokio::test]
    async fn test_insert_dish_replaces_same_id() {
        let store = InMemoryStore::new();
        let dish = Dish::new("Dal", "Punjabi", DishType::Veg);
        store.insert_dish(dish.clone()).await;
        store.insert_dish(dish.clone().with_calories(250)).await;

        let dishes = store.list_dishes(10).await.unwrap();
        assert_eq!(dishes.len(), 1);
        assert_eq!(dishes[0].calories, Some(250));
    }

    #[tokio::test]
    async fn test_meal_log_window_is_inclusive_and_per_user() {
        let store = InMemoryStore::new();
        let user = Uuid::new_v4();
        let other = Uuid::new_v4();
        let dish = Uuid::new_v4();
        store.log_meal(MealLogEntry::new(user, dish, date(3), MealType::Lunch)).await;
        store.log_meal(MealLogEntry::new(user, dish, date(4), MealType::Lunch)).await;
        store.log_meal(MealLogEntry::new(user, dish, date(10), MealType::Dinner)).await;
        store.log_meal(MealLogEntry::new(user, dish, date(11), MealType::Dinner)).await;
        store.log_meal(MealLogEntry::new(other, dish, date(5), MealType::Snack)).await;

        let entries = store.get_recent_meal_log(user, date(4), date(10)).await.unwrap();
        let dates: Vec<NaiveDate> = entries.iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![date(4), date(10)]);
    }

    #[tokio::test]
    async fn test_from_seed_json() {
        let seed: SeedData = serde_json::from_str(
            r#"{
                "dishes": [
                    { "id": "11111111-1111-4111-8111-111111111111", "name": "Idli",
                      "cuisine": "South Indian", "type": "Veg", "calories": 250 }
                ],
                "profiles": [
                    { "userId": "22222222-2222-4222-8222-222222222222",
                      "favoriteRegions": ["South Indian"] }
                ],
                "meals": [
                    { "id": "33333333-3333-4333-8333-333333333333",
                      "userId": "22222222-2222-4222-8222-222222222222",
                      "dishId": "11111111-1111-4111-8111-111111111111",
                      "date": "2024-03-09", "mealType": "breakfast" }
                ]
            }"#,
        )
        .unwrap();
        let store = InMemoryStore::from_seed(seed);
        let user = Uuid::parse_str("22222222-2222-4222-8222-222222222222").unwrap();

        let profile = store.get_user_profile(user).await.unwrap().unwrap();
        assert!(profile.likes_region("South Indian"));
        assert_eq!(store.list_dishes(10).await.unwrap().len(), 1);
        assert_eq!(store.get_recent_meal_log(user, date(3), date(10)).await.unwrap().len(), 1);
    }

    #[test]
    fn test_bundled_demo_seed_parses() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/seed.json");
        assert!(InMemoryStore::from_seed_file(path).is_ok());
    }

    #[tokio::test]
    async fn test_unknown_profile_is_none() {
        let store = InMemoryStore::new();
        assert_eq!(store.get_user_profile(Uuid::new_v4()).await.unwrap(), None);
    }
}
