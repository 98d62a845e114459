//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use profilehub_core::config::AppConfig;
use profilehub_core::traits::Clock;
use profilehub_database::Stores;
use profilehub_service::{LinkService, LinkStatsService, ProfileService, ShareLinkService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Record stores for the configured backend
    pub stores: Stores,
    /// Process start, for the health endpoint
    pub started_at: Instant,

    // ── Services ─────────────────────────────────────────────
    /// Share link management and resolution
    pub share_link_service: Arc<ShareLinkService>,
    /// Profile maintenance and shared views
    pub profile_service: Arc<ProfileService>,
    /// Dashboard statistics
    pub stats_service: Arc<LinkStatsService>,
}

impl AppState {
    /// Wires the service graph on top of `stores`.
    pub fn new(config: AppConfig, stores: Stores, clock: Arc<dyn Clock>) -> Self {
        let link_service = Arc::new(LinkService::new(config.links.base_url()));

        let share_link_service = Arc::new(ShareLinkService::new(
            Arc::clone(&stores.share_links),
            Arc::clone(&stores.profiles),
            link_service,
            Arc::clone(&clock),
            config.links.max_name_length,
        ));
        let profile_service = Arc::new(ProfileService::new(
            Arc::clone(&stores.profiles),
            Arc::clone(&share_link_service),
            Arc::clone(&clock),
        ));
        let stats_service = Arc::new(LinkStatsService::new(
            Arc::clone(&share_link_service),
            clock,
        ));

        Self {
            config: Arc::new(config),
            stores,
            started_at: Instant::now(),
            share_link_service,
            profile_service,
            stats_service,
        }
    }

    /// Public URL for a link token.
    pub fn share_url(&self, token: &str) -> String {
        self.share_link_service.links().share_url(token)
    }
}
