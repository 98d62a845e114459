//! Visibility scope of a shareable link.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Which profile sections a link exposes.
///
/// Every flag defaults to `true`, both when constructed with
/// [`Default`] and when a field is missing from a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, FromRow)]
#[serde(default)]
pub struct LinkVisibility {
    /// Show the profile photo.
    #[sqlx(rename = "show_avatar")]
    pub avatar: bool,
    /// Show the cover image or gradient.
    #[sqlx(rename = "show_cover")]
    pub cover: bool,
    /// Show file attachments.
    #[sqlx(rename = "show_attachments")]
    pub attachments: bool,
}

impl LinkVisibility {
    /// Every section visible.
    pub const ALL: Self = Self {
        avatar: true,
        cover: true,
        attachments: true,
    };

    /// Creates a visibility scope from explicit flags.
    pub fn new(avatar: bool, cover: bool, attachments: bool) -> Self {
        Self {
            avatar,
            cover,
            attachments,
        }
    }
}

impl Default for LinkVisibility {
    fn default() -> Self {
        Self::ALL
    }
}
