//! Store traits the service layer depends on.

use std::fmt::Debug;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use profilehub_core::result::AppResult;
use profilehub_entity::profile::Profile;
use profilehub_entity::share::{CreateShareLink, LinkVisibility, ShareLink};

/// Persistence for shareable links.
///
/// Implementations must keep tokens unique and must apply
/// [`record_usage`](Self::record_usage) as a single atomic update.
#[async_trait]
pub trait ShareLinkStore: Debug + Send + Sync + 'static {
    /// Persist a new link and return it with its assigned id.
    ///
    /// Fails with `ErrorKind::Conflict` if the token is already taken.
    async fn create(&self, data: &CreateShareLink) -> AppResult<ShareLink>;

    /// Find a link by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ShareLink>>;

    /// All links owned by `owner_id`, in store order.
    async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<ShareLink>>;

    /// Increment the usage count of the link holding `token` and stamp
    /// `last_used_at`, returning the updated link.
    async fn record_usage(&self, token: &str, at: DateTime<Utc>) -> AppResult<Option<ShareLink>>;

    /// Replace the visibility of one link.
    async fn update_visibility(
        &self,
        id: Uuid,
        visibility: LinkVisibility,
    ) -> AppResult<Option<ShareLink>>;

    /// Delete a link. Returns `true` if a row was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Persistence for user profiles.
#[async_trait]
pub trait ProfileStore: Debug + Send + Sync + 'static {
    /// Find a profile by user id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Profile>>;

    /// Persist a new profile.
    ///
    /// Fails with `ErrorKind::Conflict` if the id or email is already taken.
    async fn insert(&self, profile: &Profile) -> AppResult<Profile>;

    /// Overwrite the editable fields of an existing profile.
    ///
    /// `id`, `email` and `created_at` are never changed. Returns `None` if
    /// no profile has this id.
    async fn update(&self, profile: &Profile) -> AppResult<Option<Profile>>;

    /// Whether a profile with this id exists.
    async fn exists(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}
