//! # profilehub-service
//!
//! Business logic service layer for ProfileHub. Each service orchestrates
//! record stores and the clock to implement application-level use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod profile;
pub mod share;
pub mod stats;

pub use context::RequestContext;
pub use profile::{CoverUpdate, ProfileService, RegisterProfileRequest, UpdateProfileRequest};
pub use share::{CreateShareLinkRequest, LinkService, ShareLinkService};
pub use stats::LinkStatsService;
