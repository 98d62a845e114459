//! Route definitions for the ProfileHub HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState` and
//! passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, put},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the API router with request logging.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(profile_routes())
        .merge(link_routes())
        .merge(public_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Owner profile maintenance
fn profile_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(handlers::profile::get_profile)
                .post(handlers::profile::register_profile)
                .put(handlers::profile::update_profile),
        )
        .route("/profile/photo", put(handlers::profile::update_photo))
        .route("/profile/cover", put(handlers::profile::update_cover))
}

/// Owner link management
fn link_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/links",
            get(handlers::share::list_links).post(handlers::share::create_link),
        )
        .route("/links/stats", get(handlers::share::link_stats))
        .route(
            "/links/{id}",
            get(handlers::share::get_link).delete(handlers::share::delete_link),
        )
        .route(
            "/links/{id}/visibility",
            put(handlers::share::update_visibility),
        )
}

/// Token-gated public access
fn public_routes() -> Router<AppState> {
    Router::new().route(
        "/profile/share/{token}",
        get(handlers::share::shared_profile),
    )
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
