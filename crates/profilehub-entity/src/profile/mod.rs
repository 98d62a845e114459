//! User profile entities.

pub mod model;
pub mod view;

pub use model::{CoverType, CustomField, FileAttachment, Profile};
pub use view::{ProfileCover, SharedProfileView};
