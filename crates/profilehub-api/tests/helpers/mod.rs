//! Shared test helpers for API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{TimeZone, Utc};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use profilehub_api::{AppState, build_app};
use profilehub_core::config::AppConfig;
use profilehub_core::traits::ManualClock;
use profilehub_database::Stores;
use profilehub_database::memory::{MemoryProfileStore, MemoryShareLinkStore};
use profilehub_entity::profile::Profile;

/// Test application backed by in-memory stores.
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Share link store, for direct inspection and outage simulation
    pub share_links: MemoryShareLinkStore,
    /// Profile store, for seeding users
    pub profiles: MemoryProfileStore,
    /// Controllable time source
    pub clock: Arc<ManualClock>,
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.links.public_base_url = "https://app.example.com".to_string();

        let share_links = MemoryShareLinkStore::new();
        let profiles = MemoryProfileStore::new();
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
        ));

        let stores = Stores::memory(share_links.clone(), profiles.clone());
        let state = AppState::new(config, stores, clock.clone());

        Self {
            router: build_app(state),
            share_links,
            profiles,
            clock,
        }
    }

    /// Seed a profile and return its id
    pub fn create_user(&self, display_name: &str) -> Uuid {
        let id = Uuid::new_v4();
        let mut profile = Profile::new(id, format!("{id}@example.com"), display_name);
        profile.photo_url = Some("https://cdn.example.com/avatar.png".to_string());
        profile.cover_image = Some("https://cdn.example.com/cover.png".to_string());
        self.profiles.upsert(profile);
        id
    }

    /// Send a request, optionally as `user`
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        user: Option<Uuid>,
    ) -> TestResponse {
        send(&self.router, method, path, body, user).await
    }

    /// Register a profile through the API and return its id
    pub async fn register_user(&self, email: &str) -> Uuid {
        let id = Uuid::new_v4();
        let response = self
            .request(
                "POST",
                "/api/profile",
                Some(serde_json::json!({ "email": email })),
                Some(id),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        id
    }

    /// Create a link as `user` and return the response data
    pub async fn create_link(&self, user: Uuid, name: &str, visibility: Option<Value>) -> Value {
        let mut body = serde_json::json!({ "name": name });
        if let Some(v) = visibility {
            body["visibility"] = v;
        }
        let response = self.request("POST", "/api/links", Some(body), Some(user)).await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["data"].clone()
    }
}

/// Send a request to `router`, optionally as `user`
pub async fn send(
    router: &Router,
    method: &str,
    path: &str,
    body: Option<Value>,
    user: Option<Uuid>,
) -> TestResponse {
    let body_str = body
        .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
        .unwrap_or_default();

    let mut req = Request::builder()
        .method(method)
        .uri(path)
        .header("Content-Type", "application/json");

    if let Some(user) = user {
        req = req.header("X-User-Id", user.to_string());
    }

    let req = req
        .body(Body::from(body_str))
        .expect("Failed to build request");

    let response = router
        .clone()
        .oneshot(req)
        .await
        .expect("Failed to send request");

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("Failed to read body");

    let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    TestResponse { status, body }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body (Null if not JSON)
    pub body: Value,
}
