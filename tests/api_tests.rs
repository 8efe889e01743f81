use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::Value;

use shoplens::models::Product;
use shoplens::routes::{create_router, AppState};
use shoplens::services::{sources::MemoryStore, RecommendationService};

fn product(id: i64, name: &str, category_id: Option<i64>, price: f64) -> Product {
    Product {
        id,
        name: name.to_string(),
        category_id,
        price,
    }
}

async fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    store
        .insert_product(product(1, "Trail Shoes", Some(3), 89.0))
        .await;
    store
        .insert_product(product(2, "Running Socks", Some(3), 12.5))
        .await;
    store.insert_product(product(3, "Water Bottle", None, 15.0)).await;
    store.insert_product(product(4, "Headlamp", Some(5), 34.0)).await;
    store
}

fn create_test_server(store: MemoryStore) -> TestServer {
    let store = Arc::new(store);
    let service = RecommendationService::new(store.clone(), store);
    let app = create_router(AppState::new(service));
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(MemoryStore::new());
    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_cold_start_user_gets_popular_products() {
    let store = seeded_store().await;
    store.record_like(10, 3).await;
    store.record_like(11, 3).await;
    store.record_like(12, 3).await;
    store.record_like(10, 4).await;

    let server = create_test_server(store);
    let response = server.get("/api/v1/users/99/recommendations").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["user_id"], 99);
    assert_eq!(body["algorithm"], "popularity_based");

    let items = body["recommendations"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["product_id"], 3);
    assert_eq!(items[0]["score"], 1.0);
    assert_eq!(items[0]["category_id"], 0);
    assert_eq!(items[0]["reason"], "Popular choice - 3 users liked this");
    assert_eq!(items[1]["product_id"], 4);
}

#[tokio::test]
async fn test_collaborative_recommendations() {
    let store = seeded_store().await;
    store.record_purchase(1, 1, 1, 89.0).await.unwrap();
    store.record_purchase(2, 1, 1, 89.0).await.unwrap();
    store.record_purchase(2, 2, 3, 12.5).await.unwrap();

    let server = create_test_server(store);
    let response = server.get("/api/v1/users/1/recommendations").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["algorithm"], "collaborative_filtering");

    let items = body["recommendations"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["product_id"], 2);
    assert_eq!(items[0]["product_name"], "Running Socks");
    assert_eq!(items[0]["category_id"], 3);
    assert_eq!(items[0]["reason"], "Users with similar interests liked this");

    let score = items[0]["score"].as_f64().unwrap();
    assert!((score - 0.75).abs() < 1e-9);

    let generated_at = body["generated_at"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(generated_at).is_ok());
}

#[tokio::test]
async fn test_deleted_product_is_skipped() {
    let store = seeded_store().await;
    store.record_like(1, 1).await;
    store.record_like(2, 1).await;
    store.record_like(2, 4).await;
    store.record_like(2, 2).await;
    store.remove_product(4).await;

    let server = create_test_server(store);
    let response = server.get("/api/v1/users/1/recommendations").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["algorithm"], "collaborative_filtering");

    let ids: Vec<i64> = body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["product_id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![2]);
}

#[tokio::test]
async fn test_invalid_limit_is_clamped_not_rejected() {
    let store = seeded_store().await;
    for user in 10..15 {
        for product in 1..=4 {
            store.record_like(user, product).await;
        }
    }

    let server = create_test_server(store);

    for limit in ["0", "-2", "500", "abc"] {
        let response = server
            .get("/api/v1/users/99/recommendations")
            .add_query_param("limit", limit)
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["recommendations"].as_array().unwrap().len(), 4);
    }

    let response = server
        .get("/api/v1/users/99/recommendations")
        .add_query_param("limit", "2")
        .await;
    let body: Value = response.json();
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_similar_users() {
    let store = seeded_store().await;
    store.record_purchase(1, 1, 1, 89.0).await.unwrap();
    store.record_purchase(2, 1, 1, 89.0).await.unwrap();
    store.record_like(1, 3).await;
    store.record_like(2, 3).await;
    store.record_view(3, 4).await;

    let server = create_test_server(store);
    let response = server.get("/api/v1/users/1/similar").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["user_id"], 1);
    assert_eq!(body["count"], 1);

    let neighbor = &body["similar_users"][0];
    assert_eq!(neighbor["user_id"], 2);
    assert_eq!(neighbor["common_likes"], 1);
    assert_eq!(neighbor["common_views"], 0);

    let score = neighbor["similarity_score"].as_f64().unwrap();
    assert!((score - 0.85).abs() < 1e-9);
}

#[tokio::test]
async fn test_users_sharing_nothing_are_not_similar() {
    let store = seeded_store().await;
    store.record_view(1, 1).await;
    store.record_like(1, 2).await;
    store.record_view(2, 3).await;
    store.record_like(2, 4).await;

    let server = create_test_server(store);
    for user in [1, 2] {
        let response = server.get(&format!("/api/v1/users/{}/similar", user)).await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["count"], 0);
    }
}

#[tokio::test]
async fn test_non_numeric_user_id_is_rejected() {
    let server = create_test_server(MemoryStore::new());
    let response = server.get("/api/v1/users/abc/recommendations").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server(MemoryStore::new());
    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("trace-me-123"),
        )
        .await;

    let echoed = response.headers().get("x-request-id").unwrap();
    assert_eq!(echoed, "trace-me-123");
}

#[tokio::test]
async fn test_request_id_is_generated_when_missing() {
    let server = create_test_server(MemoryStore::new());
    let response = server.get("/health").await;

    let generated = response.headers().get("x-request-id").unwrap();
    assert!(uuid::Uuid::parse_str(generated.to_str().unwrap()).is_ok());
}
