//! # profilehub-entity
//!
//! Domain entity models for ProfileHub. Every struct in this crate
//! represents a database table row or a domain value object. Database
//! entities additionally derive `sqlx::FromRow`.

pub mod profile;
pub mod share;
