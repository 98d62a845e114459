//! Profile maintenance for owners and the projection share link visitors see.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use tracing::{info, warn};
use uuid::Uuid;

use profilehub_core::error::AppError;
use profilehub_core::result::AppResult;
use profilehub_core::traits::Clock;
use profilehub_database::store::ProfileStore;
use profilehub_entity::profile::{
    CoverType, CustomField, FileAttachment, Profile, SharedProfileView,
};

use crate::context::RequestContext;
use crate::share::ShareLinkService;

/// First sign-in data for the caller's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterProfileRequest {
    /// Login email.
    pub email: String,
    /// Display name; derived from the email when absent.
    pub display_name: Option<String>,
}

/// Full replacement of the editable profile sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    /// Display name.
    pub display_name: String,
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
    /// Attached files.
    pub attachments: Vec<FileAttachment>,
}

/// New cover for a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CoverUpdate {
    /// An uploaded image.
    Image {
        /// Image URL in object storage.
        url: String,
    },
    /// A gradient preset.
    Gradient {
        /// Preset identifier.
        preset: String,
    },
}

/// Serves profiles to their owners and to share link visitors.
#[derive(Debug, Clone)]
pub struct ProfileService {
    /// Profile persistence.
    profiles: Arc<dyn ProfileStore>,
    /// Token resolution.
    share_links: Arc<ShareLinkService>,
    /// Creation timestamps.
    clock: Arc<dyn Clock>,
}

impl ProfileService {
    /// Creates a new profile service.
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        share_links: Arc<ShareLinkService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            profiles,
            share_links,
            clock,
        }
    }

    /// Loads a profile by user id.
    pub async fn get_profile(&self, user_id: Uuid) -> AppResult<Profile> {
        self.profiles
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Profile not found"))
    }

    /// Creates the caller's profile on first sign-in.
    ///
    /// Returns the stored profile and whether it was created by this call.
    /// An existing profile is returned unchanged.
    pub async fn register(
        &self,
        ctx: &RequestContext,
        req: RegisterProfileRequest,
    ) -> AppResult<(Profile, bool)> {
        if let Some(existing) = self.profiles.find_by_id(ctx.user_id).await? {
            return Ok((existing, false));
        }

        let email = req.email.trim().to_string();
        let Some((local, domain)) = email.split_once('@') else {
            return Err(AppError::validation("A valid email is required"));
        };
        if local.is_empty() || domain.is_empty() {
            return Err(AppError::validation("A valid email is required"));
        }

        let display_name = req
            .display_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(local)
            .to_string();

        let mut profile = Profile::new(ctx.user_id, email, display_name);
        profile.created_at = self.clock.now();

        let stored = self.profiles.insert(&profile).await?;
        info!(user_id = %ctx.user_id, "Profile registered");
        Ok((stored, true))
    }

    /// Replaces the editable sections of the caller's profile.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        req: UpdateProfileRequest,
    ) -> AppResult<Profile> {
        let display_name = req.display_name.trim();
        if display_name.is_empty() {
            return Err(AppError::validation("Display name must not be empty"));
        }

        let profile = self
            .modify(ctx, |p| {
                p.display_name = display_name.to_string();
                p.location = blank_to_none(req.location);
                p.website = blank_to_none(req.website);
                p.phone = blank_to_none(req.phone);
                p.occupation = blank_to_none(req.occupation);
                p.interests = blank_to_none(req.interests);
                p.bio = blank_to_none(req.bio);
                p.custom_fields = Json(req.custom_fields);
                p.attachments = Json(req.attachments);
            })
            .await?;

        info!(user_id = %ctx.user_id, "Profile updated");
        Ok(profile)
    }

    /// Sets or clears the caller's avatar.
    pub async fn set_photo(
        &self,
        ctx: &RequestContext,
        photo_url: Option<String>,
    ) -> AppResult<Profile> {
        let profile = self
            .modify(ctx, |p| p.photo_url = blank_to_none(photo_url))
            .await?;
        info!(user_id = %ctx.user_id, has_photo = profile.photo_url.is_some(), "Profile photo updated");
        Ok(profile)
    }

    /// Switches the caller's cover to an image or a gradient preset.
    ///
    /// The other cover source is kept so switching back restores it.
    pub async fn set_cover(&self, ctx: &RequestContext, cover: CoverUpdate) -> AppResult<Profile> {
        let (cover_type, value) = match cover {
            CoverUpdate::Image { url } => (CoverType::Image, url),
            CoverUpdate::Gradient { preset } => (CoverType::Gradient, preset),
        };
        let value = value.trim().to_string();
        if value.is_empty() {
            return Err(AppError::validation("Cover source must not be empty"));
        }

        let profile = self
            .modify(ctx, |p| {
                p.cover_type = cover_type;
                match cover_type {
                    CoverType::Image => p.cover_image = Some(value),
                    CoverType::Gradient => p.cover_gradient = Some(value),
                }
            })
            .await?;

        info!(user_id = %ctx.user_id, cover_type = ?cover_type, "Profile cover updated");
        Ok(profile)
    }

    /// Resolves `token` and returns the owner's profile restricted to the
    /// link's visibility. Counts one use of the link.
    pub async fn shared_view(&self, token: &str) -> AppResult<SharedProfileView> {
        let resolution = self.share_links.resolve(token).await?;

        let profile = self
            .profiles
            .find_by_id(resolution.owner_id)
            .await?
            .ok_or_else(|| {
                warn!(owner_id = %resolution.owner_id, "Share link points at a missing profile");
                AppError::not_found("Profile not found")
            })?;

        Ok(SharedProfileView::project(&profile, resolution.visibility))
    }

    async fn modify(
        &self,
        ctx: &RequestContext,
        apply: impl FnOnce(&mut Profile),
    ) -> AppResult<Profile> {
        let mut profile = self.get_profile(ctx.user_id).await?;
        apply(&mut profile);
        self.profiles
            .update(&profile)
            .await?
            .ok_or_else(|| AppError::not_found("Profile not found"))
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use profilehub_core::error::ErrorKind;
    use profilehub_core::traits::SystemClock;
    use profilehub_database::memory::{MemoryProfileStore, MemoryShareLinkStore};
    use profilehub_entity::share::LinkVisibility;

    use crate::share::{CreateShareLinkRequest, LinkService};

    fn setup() -> (ProfileService, Arc<ShareLinkService>, Uuid) {
        let profiles = MemoryProfileStore::new();
        let owner_id = Uuid::new_v4();
        let mut profile = Profile::new(owner_id, "owner@example.com", "Owner");
        profile.photo_url = Some("https://cdn.example.com/a.jpg".to_string());
        profiles.upsert(profile);

        let share_links = Arc::new(ShareLinkService::new(
            Arc::new(MemoryShareLinkStore::new()),
            Arc::new(profiles.clone()),
            Arc::new(LinkService::new("https://app.example.com")),
            Arc::new(SystemClock),
            100,
        ));
        let service = ProfileService::new(
            Arc::new(profiles),
            Arc::clone(&share_links),
            Arc::new(SystemClock),
        );
        (service, share_links, owner_id)
    }

    #[tokio::test]
    async fn test_shared_view_applies_visibility() {
        let (service, share_links, owner_id) = setup();
        let ctx = RequestContext::new(owner_id);
        let link = share_links
            .create(
                &ctx,
                CreateShareLinkRequest {
                    name: "No avatar".to_string(),
                    visibility: Some(LinkVisibility::new(false, true, true)),
                },
            )
            .await
            .unwrap();

        let view = service.shared_view(&link.token).await.unwrap();
        assert_eq!(view.user_id, owner_id);
        assert!(view.photo_url.is_none());
        assert!(view.cover.is_some());

        let stored = share_links.get(&ctx, link.id).await.unwrap();
        assert_eq!(stored.usage_count, 1);
    }

    #[tokio::test]
    async fn test_shared_view_unknown_token() {
        let (service, _, _) = setup();
        let err = service.shared_view("nope").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_get_profile_missing() {
        let (service, _, _) = setup();
        let err = service.get_profile(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_register_is_idempotent_and_derives_name() {
        let (service, _, _) = setup();
        let ctx = RequestContext::new(Uuid::new_v4());

        let (created, fresh) = service
            .register(
                &ctx,
                RegisterProfileRequest {
                    email: " new.user@example.com ".to_string(),
                    display_name: None,
                },
            )
            .await
            .unwrap();
        assert!(fresh);
        assert_eq!(created.display_name, "new.user");
        assert_eq!(created.email, "new.user@example.com");

        let (again, fresh) = service
            .register(
                &ctx,
                RegisterProfileRequest {
                    email: "other@example.com".to_string(),
                    display_name: Some("Renamed".to_string()),
                },
            )
            .await
            .unwrap();
        assert!(!fresh);
        assert_eq!(again, created);
    }

    #[tokio::test]
    async fn test_register_rejects_malformed_email() {
        let (service, _, _) = setup();
        let err = service
            .register(
                &RequestContext::new(Uuid::new_v4()),
                RegisterProfileRequest {
                    email: "no-at-sign".to_string(),
                    display_name: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_update_profile_replaces_sections_and_blanks_clear() {
        let (service, _, owner_id) = setup();
        let ctx = RequestContext::new(owner_id);

        let updated = service
            .update_profile(
                &ctx,
                UpdateProfileRequest {
                    display_name: "  Owner Prime ".to_string(),
                    location: Some("Lisbon".to_string()),
                    bio: Some("   ".to_string()),
                    custom_fields: vec![CustomField {
                        id: "f1".to_string(),
                        label: "Languages".to_string(),
                        value: "PT, EN".to_string(),
                    }],
                    ..UpdateProfileRequest::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.display_name, "Owner Prime");
        assert_eq!(updated.location.as_deref(), Some("Lisbon"));
        assert!(updated.bio.is_none());
        assert_eq!(updated.custom_fields.0.len(), 1);
        assert_eq!(updated.email, "owner@example.com");
        assert_eq!(
            updated.photo_url.as_deref(),
            Some("https://cdn.example.com/a.jpg")
        );
    }

    #[tokio::test]
    async fn test_update_profile_requires_display_name() {
        let (service, _, owner_id) = setup();
        let err = service
            .update_profile(&RequestContext::new(owner_id), UpdateProfileRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_cover_switch_keeps_other_source() {
        let (service, _, owner_id) = setup();
        let ctx = RequestContext::new(owner_id);

        service
            .set_cover(
                &ctx,
                CoverUpdate::Image {
                    url: "https://cdn.example.com/cover.jpg".to_string(),
                },
            )
            .await
            .unwrap();
        let profile = service
            .set_cover(
                &ctx,
                CoverUpdate::Gradient {
                    preset: "teal-cyan".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(profile.cover_type, CoverType::Gradient);
        assert_eq!(profile.cover_gradient.as_deref(), Some("teal-cyan"));
        assert_eq!(
            profile.cover_image.as_deref(),
            Some("https://cdn.example.com/cover.jpg")
        );
    }

    #[tokio::test]
    async fn test_photo_can_be_cleared() {
        let (service, _, owner_id) = setup();
        let profile = service
            .set_photo(&RequestContext::new(owner_id), None)
            .await
            .unwrap();
        assert!(profile.photo_url.is_none());
    }

    #[tokio::test]
    async fn test_edits_to_missing_profile_are_not_found() {
        let (service, _, _) = setup();
        let err = service
            .set_photo(&RequestContext::new(Uuid::new_v4()), None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
