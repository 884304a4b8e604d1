use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{ApiResponse, MealType, RecommendationsResponse},
};

use super::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationQuery {
    pub meal_type: Option<String>,
    pub date: Option<String>,
}

impl RecommendationQuery {
    fn meal_type(&self) -> AppResult<MealType> {
        self.meal_type
            .as_deref()
            .ok_or_else(|| AppError::InvalidInput("mealType parameter is required".to_string()))?
            .parse::<MealType>()
            .map_err(AppError::InvalidInput)
    }

    /// Requested date, defaulting to today in UTC
    fn date(&self) -> AppResult<NaiveDate> {
        match self.date.as_deref() {
            Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
                AppError::InvalidInput("Invalid date format. Use YYYY-MM-DD".to_string())
            }),
            None => Ok(Utc::now().date_naive()),
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Ranked dish recommendations for a user's meal slot
pub async fn get_recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(user_id): Path<String>,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Json<ApiResponse<RecommendationsResponse>>> {
    let user_id = Uuid::parse_str(&user_id)
        .map_err(|_| AppError::InvalidInput(format!("Invalid user ID '{}'", user_id)))?;
    let meal_type = query.meal_type()?;
    let date = query.date()?;

    tracing::info!(
        request_id = %request_id,
        user_id = %user_id,
        meal_type = %meal_type,
        date = %date,
        "Processing recommendation request"
    );

    let response = state.engine.recommend(user_id, meal_type, date).await?;

    tracing::info!(
        request_id = %request_id,
        total_found = response.total_found,
        "Recommendation request completed"
    );

    Ok(Json(ApiResponse::ok(response)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(meal_type: Option<&str>, date: Option<&str>) -> RecommendationQuery {
        RecommendationQuery {
            meal_type: meal_type.map(str::to_string),
            date: date.map(str::to_string),
        }
    }

    #[test]
    fn test_query_parses_meal_type_and_date() {
        let q = query(Some("dinner"), Some("2024-03-10"));
        assert_eq!(q.meal_type().unwrap(), MealType::Dinner);
        assert_eq!(q.date().unwrap(), NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
    }

    #[test]
    fn test_query_requires_meal_type() {
        let q = query(None, None);
        assert!(matches!(q.meal_type(), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_query_rejects_unknown_meal_type() {
        let q = query(Some("brunch"), None);
        assert!(matches!(q.meal_type(), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_query_rejects_bad_date() {
        let q = query(Some("lunch"), Some("10/03/2024"));
        assert!(matches!(q.date(), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_query_defaults_date_to_today() {
        let q = query(Some("lunch"), None);
        assert_eq!(q.date().unwrap(), Utc::now().date_naive());
    }
}
