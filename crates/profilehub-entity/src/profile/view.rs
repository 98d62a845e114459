//! Public projection of a profile through a link's visibility scope.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::{CoverType, CustomField, FileAttachment, Profile};
use crate::share::LinkVisibility;

/// Cover section of a shared profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileCover {
    /// Rendering mode.
    pub cover_type: CoverType,
    /// Image URL when `cover_type` is `image`.
    pub image: Option<String>,
    /// Gradient preset when `cover_type` is `gradient`.
    pub gradient: Option<String>,
}

/// What an anonymous viewer of a share link receives.
///
/// The owner's email is never included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedProfileView {
    /// Profile owner.
    pub user_id: Uuid,
    /// Display name.
    pub display_name: String,
    /// Avatar URL, when the link exposes it.
    pub photo_url: Option<String>,
    /// Cover, when the link exposes it.
    pub cover: Option<ProfileCover>,
    /// Location.
    pub location: Option<String>,
    /// Website.
    pub website: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Occupation.
    pub occupation: Option<String>,
    /// Interests.
    pub interests: Option<String>,
    /// Biography.
    pub bio: Option<String>,
    /// Owner-defined extra fields.
    pub custom_fields: Vec<CustomField>,
    /// Attachments, empty unless the link exposes them.
    pub attachments: Vec<FileAttachment>,
    /// The scope this view was built with.
    pub visibility: LinkVisibility,
}

impl SharedProfileView {
    /// Projects `profile` through `visibility`.
    pub fn project(profile: &Profile, visibility: LinkVisibility) -> Self {
        let cover = visibility.cover.then(|| ProfileCover {
            cover_type: profile.cover_type,
            image: profile.cover_image.clone(),
            gradient: profile.cover_gradient.clone(),
        });

        let attachments = if visibility.attachments {
            profile.attachments.0.clone()
        } else {
            Vec::new()
        };

        Self {
            user_id: profile.id,
            display_name: profile.display_name.clone(),
            photo_url: profile.photo_url.clone().filter(|_| visibility.avatar),
            cover,
            location: profile.location.clone(),
            website: profile.website.clone(),
            phone: profile.phone.clone(),
            occupation: profile.occupation.clone(),
            interests: profile.interests.clone(),
            bio: profile.bio.clone(),
            custom_fields: profile.custom_fields.0.clone(),
            attachments,
            visibility,
        }
    }
}
