//! Share link entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::visibility::LinkVisibility;

/// A tokenized link granting read access to a subset of one profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ShareLink {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// Profile owner.
    pub owner_id: Uuid,
    /// Public capability credential.
    pub token: String,
    /// Owner-supplied label.
    pub name: String,
    /// When the link was created.
    pub created_at: DateTime<Utc>,
    /// Last successful resolution.
    pub last_used_at: Option<DateTime<Utc>>,
    /// Number of successful resolutions.
    pub usage_count: i64,
    /// Sections exposed by the link.
    #[sqlx(flatten)]
    pub visibility: LinkVisibility,
}

impl ShareLink {
    /// Returns `true` if `user_id` owns this link.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }

    /// Applies one resolution at `at`.
    ///
    /// `last_used_at` is clamped so it never precedes `created_at`.
    pub fn record_use(&mut self, at: DateTime<Utc>) {
        self.usage_count += 1;
        self.last_used_at = Some(at.max(self.created_at));
    }
}

/// Data required to persist a new share link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShareLink {
    /// Profile owner.
    pub owner_id: Uuid,
    /// Generated token.
    pub token: String,
    /// Trimmed label.
    pub name: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Sections exposed by the link.
    pub visibility: LinkVisibility,
}

impl CreateShareLink {
    /// Builds the stored record with a fresh id and zeroed usage.
    pub fn into_link(self, id: Uuid) -> ShareLink {
        ShareLink {
            id,
            owner_id: self.owner_id,
            token: self.token,
            name: self.name,
            created_at: self.created_at,
            last_used_at: None,
            usage_count: 0,
            visibility: self.visibility,
        }
    }
}

/// The authorization a token grants once resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareResolution {
    /// Owner of the profile being viewed.
    pub owner_id: Uuid,
    /// Sections the viewer may see.
    pub visibility: LinkVisibility,
}

impl From<&ShareLink> for ShareResolution {
    fn from(link: &ShareLink) -> Self {
        Self {
            owner_id: link.owner_id,
            visibility: link.visibility,
        }
    }
}
