//! Aggregate usage figures over one owner's links.

use serde::{Deserialize, Serialize};

use super::model::ShareLink;

/// Dashboard summary of an owner's shareable links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkStats {
    /// Sum of every link's usage count.
    pub total_views: i64,
    /// Number of links the owner currently has.
    pub active_links: usize,
    /// Number of links used within the recent window.
    pub recent_views: usize,
    /// Total views divided by days since the oldest link was created.
    pub average_views_per_day: f64,
    /// The link with the highest usage count, if any has been used.
    pub most_viewed_link: Option<ShareLink>,
}
