//! Profile maintenance and shared profile views.

pub mod service;

pub use service::{CoverUpdate, ProfileService, RegisterProfileRequest, UpdateProfileRequest};
