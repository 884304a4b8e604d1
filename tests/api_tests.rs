use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::NaiveDate;
use serde_json::Value;
use uuid::Uuid;

use meal_recommender::{
    api::{create_router, AppState},
    db::InMemoryStore,
    models::{Dish, DishType, MealLogEntry, MealType, SpiceLevel, UserPreferenceProfile},
    services::RecommendationSettings,
};

fn create_test_server(store: Arc<InMemoryStore>) -> TestServer {
    let state = AppState::with_store(store, RecommendationSettings::default());
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

async fn store_with_user() -> (Arc<InMemoryStore>, Uuid) {
    let store = Arc::new(InMemoryStore::new());
    let user_id = Uuid::new_v4();
    let mut profile = UserPreferenceProfile::new(user_id);
    profile.favorite_regions.insert("South Indian".to_string());
    profile.spice_level = Some(SpiceLevel::Medium);
    store.upsert_profile(profile).await;
    (store, user_id)
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(Arc::new(InMemoryStore::new()));
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_recommendations_ranked_by_preference() {
    let (store, user_id) = store_with_user().await;
    store
        .insert_dish(Dish::new("Chole Bhature", "North Indian", DishType::Veg).with_calories(350))
        .await;
    store
        .insert_dish(Dish::new("Bisi Bele Bath", "South Indian", DishType::Veg).with_calories(350))
        .await;
    let server = create_test_server(store);

    let response = server
        .get(&format!("/api/v1/users/{}/recommendations", user_id))
        .add_query_param("mealType", "lunch")
        .add_query_param("date", "2024-03-10")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["mealType"], "lunch");
    assert_eq!(body["data"]["date"], "2024-03-10");
    assert_eq!(body["data"]["totalFound"], 2);

    let recommendations = body["data"]["recommendations"].as_array().unwrap();
    assert_eq!(recommendations[0]["name"], "Bisi Bele Bath");
    let top = recommendations[0]["recommendationScore"].as_f64().unwrap();
    assert!((8.0..=8.5).contains(&top));
    assert_eq!(recommendations[0]["isFavorite"], false);
    assert_eq!(
        recommendations[0]["reason"],
        "Matches your favorite cuisine (South Indian)"
    );
    assert_eq!(
        body["data"]["reason"],
        "Recommendations for lunch based on your preferences"
    );
}

#[tokio::test]
async fn test_recently_eaten_dishes_are_skipped() {
    let (store, user_id) = store_with_user().await;
    let eaten = Dish::new("Pongal", "South Indian", DishType::Veg).with_calories(300);
    let fresh = Dish::new("Aloo Gobi", "Punjabi", DishType::Veg).with_calories(300);
    store.insert_dish(eaten.clone()).await;
    store.insert_dish(fresh.clone()).await;
    store
        .log_meal(MealLogEntry::new(user_id, eaten.id, day(8), MealType::Breakfast))
        .await;
    let server = create_test_server(store);

    let response = server
        .get(&format!("/api/v1/users/{}/recommendations", user_id))
        .add_query_param("mealType", "breakfast")
        .add_query_param("date", "2024-03-10")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let recommendations = body["data"]["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 1);
    assert_eq!(recommendations[0]["id"], fresh.id.to_string());
}

#[tokio::test]
async fn test_fallback_when_whole_catalog_was_eaten() {
    let (store, user_id) = store_with_user().await;
    let dish = Dish::new("Appam", "South Indian", DishType::Veg).with_calories(300);
    store.insert_dish(dish.clone()).await;
    store
        .log_meal(MealLogEntry::new(user_id, dish.id, day(10), MealType::Dinner))
        .await;
    let server = create_test_server(store);

    let response = server
        .get(&format!("/api/v1/users/{}/recommendations", user_id))
        .add_query_param("mealType", "lunch")
        .add_query_param("date", "2024-03-10")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let recommendations = body["data"]["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 1);
    assert_eq!(recommendations[0]["recommendationScore"], 1.0);
    assert_eq!(recommendations[0]["reason"], "Popular dish to try");
    assert_eq!(
        body["data"]["reason"],
        "Popular lunch recommendations to get you started"
    );
}

#[tokio::test]
async fn test_empty_catalog_returns_empty_list() {
    let (store, user_id) = store_with_user().await;
    let server = create_test_server(store);

    let response = server
        .get(&format!("/api/v1/users/{}/recommendations", user_id))
        .add_query_param("mealType", "snack")
        .add_query_param("date", "2024-03-10")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["recommendations"].as_array().unwrap().len(), 0);
    assert_eq!(body["data"]["totalFound"], 0);
}

#[tokio::test]
async fn test_unknown_user_returns_404() {
    let server = create_test_server(Arc::new(InMemoryStore::new()));

    let response = server
        .get(&format!("/api/v1/users/{}/recommendations", Uuid::new_v4()))
        .add_query_param("mealType", "lunch")
        .add_query_param("date", "2024-03-10")
        .expect_failure()
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_invalid_meal_type_returns_400() {
    let (store, user_id) = store_with_user().await;
    let server = create_test_server(store);

    let response = server
        .get(&format!("/api/v1/users/{}/recommendations", user_id))
        .add_query_param("mealType", "brunch")
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_meal_type_returns_400() {
    let (store, user_id) = store_with_user().await;
    let server = create_test_server(store);

    let response = server
        .get(&format!("/api/v1/users/{}/recommendations", user_id))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "mealType parameter is required");
}

#[tokio::test]
async fn test_invalid_date_returns_400() {
    let (store, user_id) = store_with_user().await;
    let server = create_test_server(store);

    let response = server
        .get(&format!("/api/v1/users/{}/recommendations", user_id))
        .add_query_param("mealType", "dinner")
        .add_query_param("date", "2024-13-40")
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_user_id_returns_400() {
    let server = create_test_server(Arc::new(InMemoryStore::new()));

    let response = server
        .get("/api/v1/users/not-a-uuid/recommendations")
        .add_query_param("mealType", "dinner")
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server(Arc::new(InMemoryStore::new()));
    let request_id = Uuid::new_v4().to_string();

    let response = server
        .get("/health")
        .add_header(
            axum::http::HeaderName::from_static("x-request-id"),
            axum::http::HeaderValue::from_str(&request_id).unwrap(),
        )
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("x-request-id"), request_id.as_str());
}

#[tokio::test]
async fn test_at_most_twelve_recommendations() {
    let (store, user_id) = store_with_user().await;
    for i in 0..25 {
        store
            .insert_dish(Dish::new(format!("Dish {}", i), "Korean", DishType::NonVeg).with_calories(450))
            .await;
    }
    let server = create_test_server(store);

    let response = server
        .get(&format!("/api/v1/users/{}/recommendations", user_id))
        .add_query_param("mealType", "dinner")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["recommendations"].as_array().unwrap().len(), 12);
    assert_eq!(body["data"]["totalFound"], 12);
}
