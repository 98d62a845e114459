//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use profilehub_entity::share::{LinkStats, LinkVisibility, ShareLink};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// A share link as shown to its owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareLinkResponse {
    /// Link ID.
    pub id: Uuid,
    /// Label.
    pub name: String,
    /// Public token.
    pub token: String,
    /// Public URL carrying the token.
    pub url: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last resolution time.
    pub last_used_at: Option<DateTime<Utc>>,
    /// Resolution count.
    pub usage_count: i64,
    /// Exposed sections.
    pub visibility: LinkVisibility,
}

impl ShareLinkResponse {
    /// Pairs a link with its public URL.
    pub fn new(link: ShareLink, url: String) -> Self {
        Self {
            id: link.id,
            name: link.name,
            token: link.token,
            url,
            created_at: link.created_at,
            last_used_at: link.last_used_at,
            usage_count: link.usage_count,
            visibility: link.visibility,
        }
    }
}

/// Dashboard statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkStatsResponse {
    /// Sum of all usage counts.
    pub total_views: i64,
    /// Number of links.
    pub active_links: usize,
    /// Links used in the last week.
    pub recent_views: usize,
    /// Average views per day since the oldest link.
    pub average_views_per_day: f64,
    /// Most used link.
    pub most_viewed_link: Option<ShareLinkResponse>,
}

impl LinkStatsResponse {
    /// Builds the response, attaching a URL to the most viewed link.
    pub fn new(stats: LinkStats, url_for: impl Fn(&str) -> String) -> Self {
        Self {
            total_views: stats.total_views,
            active_links: stats.active_links,
            recent_views: stats.recent_views,
            average_views_per_day: stats.average_views_per_day,
            most_viewed_link: stats.most_viewed_link.map(|link| {
                let url = url_for(&link.token);
                ShareLinkResponse::new(link, url)
            }),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_seconds: u64,
    /// Record store status.
    pub database: String,
}
