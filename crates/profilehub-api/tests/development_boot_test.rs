//! Boots the server wiring from the checked-in development configuration.

mod helpers;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use profilehub_api::{AppState, build_app};
use profilehub_core::config::{AppConfig, DatabaseBackend};
use profilehub_core::traits::SystemClock;
use profilehub_database::Stores;

const BASE_CONFIG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/default");

async fn development_app() -> axum::Router {
    let config = AppConfig::load(BASE_CONFIG, "development").unwrap();
    assert_eq!(config.database.backend, DatabaseBackend::Memory);

    let stores = Stores::connect(&config.database).await.unwrap();
    build_app(AppState::new(config, stores, Arc::new(SystemClock)))
}

#[tokio::test]
async fn test_fresh_user_can_register_and_share() {
    let router = development_app().await;
    let user = Uuid::new_v4();

    let registered = helpers::send(
        &router,
        "POST",
        "/api/profile",
        Some(json!({ "email": "first@example.com" })),
        Some(user),
    )
    .await;
    assert_eq!(registered.status, StatusCode::CREATED, "{:?}", registered.body);

    let created = helpers::send(
        &router,
        "POST",
        "/api/links",
        Some(json!({ "name": "Portfolio" })),
        Some(user),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED, "{:?}", created.body);
    let url = created.body["data"]["url"].as_str().unwrap();
    assert!(url.starts_with("http://localhost:5173/profile/share/"));

    let listed = helpers::send(&router, "GET", "/api/links", None, Some(user)).await;
    assert_eq!(listed.body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_links_need_a_registered_profile() {
    let router = development_app().await;

    let response = helpers::send(
        &router,
        "POST",
        "/api/links",
        Some(json!({ "name": "Portfolio" })),
        Some(Uuid::new_v4()),
    )
    .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Profile not found");
}
