use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{postgres::PgPoolOptions, types::Json, PgPool};
use std::collections::HashSet;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        Difficulty, Dish, DishType, MealLogEntry, MealType, Nutrition, SpiceLevel,
        UserPreferenceProfile,
    },
    services::store::MealPlannerStore,
};

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Applies the bundled schema migrations
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

const DISH_COLUMNS: &str = r#"
    id, name, cuisine, dish_type, calories, dietary_tags, spice_level,
    difficulty, prep_time, cook_time, nutrition, image, description
"#;

#[derive(sqlx::FromRow)]
struct ProfileRow {
    user_id: Uuid,
    dietary_preferences: Option<Vec<String>>,
    favorite_regions: Option<Vec<String>>,
    spice_level: Option<String>,
    favorite_dish_ids: Vec<Uuid>,
}

impl From<ProfileRow> for UserPreferenceProfile {
    fn from(row: ProfileRow) -> Self {
        let spice_level = row.spice_level.as_deref().and_then(|s| match s.parse::<SpiceLevel>() {
            Ok(level) => Some(level),
            Err(e) => {
                tracing::warn!(user_id = %row.user_id, error = %e, "Ignoring stored spice level");
                None
            }
        });

        UserPreferenceProfile {
            user_id: row.user_id,
            dietary_preferences: row.dietary_preferences.unwrap_or_default().into_iter().collect(),
            favorite_regions: row.favorite_regions.unwrap_or_default().into_iter().collect(),
            spice_level,
            favorite_dish_ids: row.favorite_dish_ids.into_iter().collect(),
        }
    }
}

#[derive(sqlx::FromRow)]
struct MealRow {
    id: Uuid,
    user_id: Uuid,
    dish_id: Uuid,
    date: NaiveDate,
    meal_type: String,
}

#[derive(sqlx::FromRow)]
struct DishRow {
    id: Uuid,
    name: String,
    cuisine: String,
    dish_type: String,
    calories: Option<i32>,
    dietary_tags: Option<Vec<String>>,
    spice_level: Option<String>,
    difficulty: Option<String>,
    prep_time: Option<i32>,
    cook_time: Option<i32>,
    nutrition: Option<Json<Nutrition>>,
    image: Option<String>,
    description: Option<String>,
}

/// Converts a stored integer to an unsigned value, dropping negatives
fn non_negative(value: Option<i32>) -> Option<u32> {
    value.and_then(|v| u32::try_from(v).ok())
}

impl DishRow {
    /// Builds a dish, skipping rows whose required fields cannot be read
    ///
    /// Unreadable optional fields are dropped with a warning so one bad row never
    /// fails the whole catalog read.
    fn into_dish(self) -> Option<Dish> {
        let dish_type = match self.dish_type.parse::<DishType>() {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!(dish_id = %self.id, error = %e, "Skipping dish with unreadable type");
                return None;
            }
        };

        let spice_level = self.spice_level.as_deref().and_then(|s| {
            s.parse::<SpiceLevel>()
                .map_err(|e| tracing::warn!(dish_id = %self.id, error = %e, "Ignoring spice level"))
                .ok()
        });
        let difficulty = self.difficulty.as_deref().and_then(|s| {
            s.parse::<Difficulty>()
                .map_err(|e| tracing::warn!(dish_id = %self.id, error = %e, "Ignoring difficulty"))
                .ok()
        });

        Some(Dish {
            id: self.id,
            name: self.name,
            cuisine: self.cuisine,
            dish_type,
            calories: non_negative(self.calories),
            dietary_tags: self.dietary_tags.unwrap_or_default(),
            spice_level,
            difficulty,
            prep_time: non_negative(self.prep_time),
            cook_time: non_negative(self.cook_time),
            nutrition: self.nutrition.map(|Json(n)| n),
            image: self.image,
            description: self.description,
        })
    }
}

/// Catalog query in natural order
///
/// Rows with an unknown dish type are filtered before `LIMIT`, so a bad row
/// never shrinks the page. `into_dish` still skips anything unreadable.
fn catalog_query(excluding: bool) -> String {
    let (exclusion, limit_param) = if excluding {
        ("AND NOT (id = ANY($1))", "$2")
    } else {
        ("", "$1")
    };
    format!(
        "SELECT {} FROM dishes WHERE dish_type IN ('Veg', 'Non-Veg') {} ORDER BY created_at, id LIMIT {}",
        DISH_COLUMNS, exclusion, limit_param
    )
}

fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

/// `MealPlannerStore` backed by PostgreSQL
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MealPlannerStore for PgStore {
    async fn get_user_profile(&self, user_id: Uuid) -> AppResult<Option<UserPreferenceProfile>> {
        let row: Option<ProfileRow> = sqlx::query_as(
            r#"
            SELECT u.id AS user_id,
                   p.dietary_preferences,
                   p.favorite_regions,
                   p.spice_level,
                   ARRAY(
                       SELECT f.dish_id FROM user_favorite_dishes f WHERE f.user_id = u.id
                   ) AS favorite_dish_ids
            FROM users u
            LEFT JOIN user_profiles p ON p.user_id = u.id
            WHERE u.id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserPreferenceProfile::from))
    }

    async fn get_recent_meal_log(
        &self,
        user_id: Uuid,
        since: NaiveDate,
        until: NaiveDate,
    ) -> AppResult<Vec<MealLogEntry>> {
        let rows: Vec<MealRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, dish_id, date, meal_type
            FROM meals
            WHERE user_id = $1 AND date >= $2 AND date <= $3
            ORDER BY date, meal_type
            "#,
        )
        .bind(user_id)
        .bind(since)
        .bind(until)
        .fetch_all(&self.pool)
        .await?;

        let entries = rows
            .into_iter()
            .filter_map(|row| match row.meal_type.parse::<MealType>() {
                Ok(meal_type) => Some(MealLogEntry {
                    id: row.id,
                    user_id: row.user_id,
                    dish_id: row.dish_id,
                    date: row.date,
                    meal_type,
                }),
                Err(e) => {
                    tracing::warn!(meal_id = %row.id, error = %e, "Skipping meal with unreadable type");
                    None
                }
            })
            .collect();

        Ok(entries)
    }

    async fn list_dishes_excluding(
        &self,
        exclude: &HashSet<Uuid>,
        limit: usize,
    ) -> AppResult<Vec<Dish>> {
        let exclude: Vec<Uuid> = exclude.iter().copied().collect();
        let query = catalog_query(true);

        let rows: Vec<DishRow> = sqlx::query_as(&query)
            .bind(exclude)
            .bind(sql_limit(limit))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().filter_map(DishRow::into_dish).collect())
    }

    async fn list_dishes(&self, limit: usize) -> AppResult<Vec<Dish>> {
        let query = catalog_query(false);

        let rows: Vec<DishRow> = sqlx::query_as(&query)
            .bind(sql_limit(limit))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().filter_map(DishRow::into_dish).collect())
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}
