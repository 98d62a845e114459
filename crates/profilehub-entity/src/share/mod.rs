//! Shareable profile link entities.

pub mod model;
pub mod stats;
pub mod visibility;

pub use model::{CreateShareLink, ShareLink, ShareResolution};
pub use stats::LinkStats;
pub use visibility::LinkVisibility;
