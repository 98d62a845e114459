//! Link usage summary service.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use profilehub_core::result::AppResult;
use profilehub_core::traits::Clock;
use profilehub_entity::share::{LinkStats, ShareLink};

use crate::context::RequestContext;
use crate::share::ShareLinkService;

/// Links used within this many days count as recently viewed.
pub const RECENT_WINDOW_DAYS: i64 = 7;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Summarises usage across the calling user's links.
#[derive(Debug, Clone)]
pub struct LinkStatsService {
    /// Source of the owner's links.
    share_links: Arc<ShareLinkService>,
    /// Reference point for the recent window and daily average.
    clock: Arc<dyn Clock>,
}

impl LinkStatsService {
    /// Creates a new stats service.
    pub fn new(share_links: Arc<ShareLinkService>, clock: Arc<dyn Clock>) -> Self {
        Self { share_links, clock }
    }

    /// Computes the dashboard summary for the calling user.
    pub async fn stats(&self, ctx: &RequestContext) -> AppResult<LinkStats> {
        let links = self.share_links.list(ctx).await?;
        Ok(compute_stats(links, self.clock.now()))
    }
}

/// Pure summary of `links` as seen at `now`.
pub fn compute_stats(mut links: Vec<ShareLink>, now: DateTime<Utc>) -> LinkStats {
    links.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

    let total_views: i64 = links.iter().map(|l| l.usage_count).sum();
    let active_links = links.len();

    let window_start = now - Duration::days(RECENT_WINDOW_DAYS);
    let recent_views = links
        .iter()
        .filter(|l| l.last_used_at.is_some_and(|t| t >= window_start))
        .count();

    let days_active = links
        .iter()
        .map(|l| l.created_at)
        .min()
        .map(|oldest| {
            let elapsed = (now - oldest).num_milliseconds().max(0) as f64;
            (elapsed / MILLIS_PER_DAY).ceil().max(1.0)
        })
        .unwrap_or(1.0);
    let average_views_per_day = total_views as f64 / days_active;

    // Strictly greater, so unused links never qualify and ties keep the oldest.
    let mut most_viewed_link: Option<ShareLink> = None;
    for link in links {
        let best = most_viewed_link.as_ref().map_or(0, |l| l.usage_count);
        if link.usage_count > best {
            most_viewed_link = Some(link);
        }
    }

    LinkStats {
        total_views,
        active_links,
        recent_views,
        average_views_per_day,
        most_viewed_link,
    }
}
