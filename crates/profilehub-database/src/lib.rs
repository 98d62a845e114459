//! # profilehub-database
//!
//! Record store traits for ProfileHub plus two implementations: PostgreSQL
//! repositories built on sqlx, and process-local stores used by tests and
//! the `memory` backend.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;
pub mod stores;

pub use connection::DatabasePool;
pub use store::{ProfileStore, ShareLinkStore};
pub use stores::Stores;
