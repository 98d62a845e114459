//! # profilehub-core
//!
//! Core crate for ProfileHub. Contains configuration schemas, the clock
//! abstraction, and the unified error system.
//!
//! This crate has **no** internal dependencies on other ProfileHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
