//! Dashboard statistics over an owner's share links.

pub mod service;

pub use service::{LinkStatsService, RECENT_WINDOW_DAYS, compute_stats};
