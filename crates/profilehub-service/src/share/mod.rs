//! Share link management: create, resolve, and revoke profile links.

pub mod link;
pub mod service;

pub use link::LinkService;
pub use service::{CreateShareLinkRequest, ShareLinkService};
