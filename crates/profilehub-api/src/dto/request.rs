//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use profilehub_entity::profile::{CustomField, FileAttachment};
use profilehub_entity::share::LinkVisibility;

/// Create share link request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateShareLinkRequest {
    /// Label for the link.
    #[validate(length(min = 1, message = "Link name is required"))]
    pub name: String,
    /// Sections to expose. Omitted sections default to visible.
    #[serde(default)]
    pub visibility: Option<LinkVisibility>,
}

/// Replace visibility request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateVisibilityRequest {
    /// Show the avatar.
    pub avatar: bool,
    /// Show the cover.
    pub cover: bool,
    /// Show attachments.
    pub attachments: bool,
}

impl From<UpdateVisibilityRequest> for LinkVisibility {
    fn from(req: UpdateVisibilityRequest) -> Self {
        LinkVisibility::new(req.avatar, req.cover, req.attachments)
    }
}

/// First sign-in request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterProfileRequest {
    /// Login email.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Display name. Derived from the email when omitted.
    #[serde(default)]
    #[validate(length(max = 100, message = "Display name is too long"))]
    pub display_name: Option<String>,
}

/// Profile edit request body. Replaces every editable section.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// Display name.
    #[validate(length(min = 1, max = 100, message = "Display name must be 1-100 characters"))]
    pub display_name: String,
    /// Location.
    #[serde(default)]
    pub location: Option<String>,
    /// Website.
    #[serde(default)]
    #[validate(length(max = 2048))]
    pub website: Option<String>,
    /// Phone number.
    #[serde(default)]
    #[validate(length(max = 32))]
    pub phone: Option<String>,
    /// Occupation.
    #[serde(default)]
    pub occupation: Option<String>,
    /// Interests.
    #[serde(default)]
    pub interests: Option<String>,
    /// Biography.
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub bio: Option<String>,
    /// Owner-defined extra fields.
    #[serde(default)]
    pub custom_fields: Vec<CustomField>,
    /// Attached files.
    #[serde(default)]
    pub attachments: Vec<FileAttachment>,
}

/// Avatar change request body. `null` removes the avatar.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdatePhotoRequest {
    /// New avatar URL.
    #[serde(default)]
    #[validate(url(message = "Photo URL must be a valid URL"))]
    pub photo_url: Option<String>,
}
