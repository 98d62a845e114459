//! Profile entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

/// How the profile cover is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "cover_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CoverType {
    /// An uploaded image.
    Image,
    /// A CSS gradient preset.
    #[default]
    Gradient,
}

/// A file attached to a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAttachment {
    /// Display name.
    pub name: String,
    /// Download URL in object storage.
    pub url: String,
    /// MIME type.
    #[serde(rename = "type")]
    pub content_type: String,
}

/// A labelled free-form entry the owner adds to their profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomField {
    /// Client-assigned identifier, stable across edits.
    pub id: String,
    /// Label shown next to the value.
    pub label: String,
    /// Value text.
    pub value: String,
}

/// A user's profile page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Profile {
    /// User identifier.
    pub id: Uuid,
    /// Login email.
    pub email: String,
    /// Display name.
    pub display_name: String,
    /// Avatar URL.
    pub photo_url: Option<String>,
    /// Cover rendering mode.
    pub cover_type: CoverType,
    /// Cover image URL.
    pub cover_image: Option<String>,
    /// Cover gradient preset.
    pub cover_gradient: Option<String>,
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
    /// Free-form biography.
    pub bio: Option<String>,
    /// Owner-defined extra fields.
    pub custom_fields: Json<Vec<CustomField>>,
    /// Attached files.
    pub attachments: Json<Vec<FileAttachment>>,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// Creates a minimal profile with only the required fields set.
    pub fn new(id: Uuid, email: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            display_name: display_name.into(),
            photo_url: None,
            cover_type: CoverType::default(),
            cover_image: None,
            cover_gradient: None,
            location: None,
            website: None,
            phone: None,
            occupation: None,
            interests: None,
            bio: None,
            custom_fields: Json(Vec::new()),
            attachments: Json(Vec::new()),
            created_at: Utc::now(),
        }
    }
}
