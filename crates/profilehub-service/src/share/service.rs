//! Share link CRUD and token resolution.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use profilehub_core::error::{AppError, ErrorKind};
use profilehub_core::result::AppResult;
use profilehub_core::traits::Clock;
use profilehub_database::store::{ProfileStore, ShareLinkStore};
use profilehub_entity::share::{CreateShareLink, LinkVisibility, ShareLink, ShareResolution};

use super::link::LinkService;
use crate::context::RequestContext;

/// Attempts at finding an unused token before giving up.
const MAX_TOKEN_ATTEMPTS: usize = 3;

/// Message for every failed resolution; unknown and deleted tokens look the same.
const INVALID_LINK: &str = "Invalid or expired link";

/// Request to create a new share link.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateShareLinkRequest {
    /// Label shown to the owner.
    pub name: String,
    /// Sections to expose; all visible when absent.
    pub visibility: Option<LinkVisibility>,
}

/// Manages the shareable links of each owner and resolves public tokens.
#[derive(Debug, Clone)]
pub struct ShareLinkService {
    /// Share link persistence.
    store: Arc<dyn ShareLinkStore>,
    /// Profile lookups for owner validation.
    profiles: Arc<dyn ProfileStore>,
    /// Token generation.
    link_service: Arc<LinkService>,
    /// Time source for creation and usage stamps.
    clock: Arc<dyn Clock>,
    /// Longest accepted name after trimming.
    max_name_length: usize,
}

impl ShareLinkService {
    /// Creates a new share link service.
    pub fn new(
        store: Arc<dyn ShareLinkStore>,
        profiles: Arc<dyn ProfileStore>,
        link_service: Arc<LinkService>,
        clock: Arc<dyn Clock>,
        max_name_length: usize,
    ) -> Self {
        Self {
            store,
            profiles,
            link_service,
            clock,
            max_name_length,
        }
    }

    /// The link service used for tokens and URLs.
    pub fn links(&self) -> &LinkService {
        &self.link_service
    }

    /// Creates a new link for the calling user.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateShareLinkRequest,
    ) -> AppResult<ShareLink> {
        let name = self.validate_name(&req.name)?;

        if !self.profiles.exists(ctx.user_id).await? {
            return Err(AppError::not_found("Profile not found"));
        }

        let visibility = req.visibility.unwrap_or_default();

        for attempt in 1..=MAX_TOKEN_ATTEMPTS {
            let data = CreateShareLink {
                owner_id: ctx.user_id,
                token: self.link_service.generate_token(),
                name: name.clone(),
                created_at: self.clock.now(),
                visibility,
            };

            match self.store.create(&data).await {
                Ok(link) => {
                    info!(
                        user_id = %ctx.user_id,
                        link_id = %link.id,
                        "Share link created"
                    );
                    return Ok(link);
                }
                Err(e) if e.is(ErrorKind::Conflict) => {
                    warn!(attempt, "Share token collided, regenerating");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal("Could not allocate a unique share token"))
    }

    /// Lists the calling user's links in store order.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<ShareLink>> {
        self.store.find_by_owner(ctx.user_id).await
    }

    /// Gets one of the calling user's links.
    pub async fn get(&self, ctx: &RequestContext, link_id: Uuid) -> AppResult<ShareLink> {
        self.owned_link(ctx, link_id).await
    }

    /// Replaces the visibility of one of the calling user's links.
    ///
    /// Other links, including ones created with the same settings, are
    /// left untouched.
    pub async fn update_visibility(
        &self,
        ctx: &RequestContext,
        link_id: Uuid,
        visibility: LinkVisibility,
    ) -> AppResult<ShareLink> {
        self.owned_link(ctx, link_id).await?;

        let link = self
            .store
            .update_visibility(link_id, visibility)
            .await?
            .ok_or_else(|| AppError::not_found("Share link not found"))?;

        info!(
            user_id = %ctx.user_id,
            link_id = %link_id,
            avatar = visibility.avatar,
            cover = visibility.cover,
            attachments = visibility.attachments,
            "Share link visibility updated"
        );

        Ok(link)
    }

    /// Deletes one of the calling user's links.
    pub async fn delete(&self, ctx: &RequestContext, link_id: Uuid) -> AppResult<()> {
        self.owned_link(ctx, link_id).await?;

        if !self.store.delete(link_id).await? {
            return Err(AppError::not_found("Share link not found"));
        }

        info!(
            user_id = %ctx.user_id,
            link_id = %link_id,
            "Share link deleted"
        );

        Ok(())
    }

    /// Exchanges a public token for the owner and scope it grants.
    ///
    /// Each successful call counts one use of the link. No caller identity
    /// is checked; holding the token is the credential.
    pub async fn resolve(&self, token: &str) -> AppResult<ShareResolution> {
        if !LinkService::is_plausible_token(token) {
            return Err(AppError::not_found(INVALID_LINK));
        }

        let link = self
            .store
            .record_usage(token, self.clock.now())
            .await?
            .ok_or_else(|| AppError::not_found(INVALID_LINK))?;

        debug!(
            link_id = %link.id,
            usage_count = link.usage_count,
            "Share link resolved"
        );

        Ok(ShareResolution::from(&link))
    }

    /// Loads a link and checks the caller owns it.
    async fn owned_link(&self, ctx: &RequestContext, link_id: Uuid) -> AppResult<ShareLink> {
        let link = self
            .store
            .find_by_id(link_id)
            .await?
            .ok_or_else(|| AppError::not_found("Share link not found"))?;

        if !link.is_owned_by(ctx.user_id) {
            warn!(
                user_id = %ctx.user_id,
                link_id = %link_id,
                ip_address = ctx.ip_address.as_deref().unwrap_or("-"),
                user_agent = ctx.user_agent.as_deref().unwrap_or("-"),
                "Rejected access to another user's share link"
            );
            return Err(AppError::forbidden(
                "You can only manage your own share links",
            ));
        }

        Ok(link)
    }

    fn validate_name(&self, name: &str) -> AppResult<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Link name must not be empty"));
        }
        if name.chars().count() > self.max_name_length {
            return Err(AppError::validation(format!(
                "Link name must be at most {} characters",
                self.max_name_length
            )));
        }
        Ok(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use profilehub_core::traits::ManualClock;
    use profilehub_database::memory::{MemoryProfileStore, MemoryShareLinkStore};
    use profilehub_entity::profile::Profile;

    struct Fixture {
        service: ShareLinkService,
        store: MemoryShareLinkStore,
        clock: Arc<ManualClock>,
        owner: RequestContext,
    }

    fn fixture() -> Fixture {
        let store = MemoryShareLinkStore::new();
        let profiles = MemoryProfileStore::new();
        let owner_id = Uuid::new_v4();
        profiles.upsert(Profile::new(owner_id, "u1@example.com", "U One"));

        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap(),
        ));
        let service = ShareLinkService::new(
            Arc::new(store.clone()),
            Arc::new(profiles),
            Arc::new(LinkService::new("https://app.example.com")),
            clock.clone(),
            100,
        );

        Fixture {
            service,
            store,
            clock,
            owner: RequestContext::new(owner_id),
        }
    }

    fn request(name: &str, visibility: Option<LinkVisibility>) -> CreateShareLinkRequest {
        CreateShareLinkRequest {
            name: name.to_string(),
            visibility,
        }
    }

    #[tokio::test]
    async fn test_create_then_list_contains_fresh_link() {
        let f = fixture();
        let visibility = LinkVisibility::new(true, false, true);
        let created = f
            .service
            .create(&f.owner, request("  Portfolio  ", Some(visibility)))
            .await
            .unwrap();

        let links = f.service.list(&f.owner).await.unwrap();
        assert_eq!(links.len(), 1);
        let link = &links[0];
        assert_eq!(link, &created);
        assert_eq!(link.owner_id, f.owner.user_id);
        assert_eq!(link.name, "Portfolio");
        assert_eq!(link.visibility, visibility);
        assert_eq!(link.usage_count, 0);
        assert!(link.last_used_at.is_none());
        assert_eq!(link.created_at, f.clock.now());
    }

    #[tokio::test]
    async fn test_create_defaults_to_full_visibility() {
        let f = fixture();
        let link = f
            .service
            .create(&f.owner, request("Everything", None))
            .await
            .unwrap();
        assert_eq!(link.visibility, LinkVisibility::ALL);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let f = fixture();
        let err = f
            .service
            .create(&f.owner, request("   \t", None))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(f.store.is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_overlong_name() {
        let f = fixture();
        let err = f
            .service
            .create(&f.owner, request(&"n".repeat(101), None))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_create_requires_existing_profile() {
        let f = fixture();
        let stranger = RequestContext::new(Uuid::new_v4());
        let err = f
            .service
            .create(&stranger, request("Portfolio", None))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_list_empty_for_new_owner() {
        let f = fixture();
        assert!(f.service.list(&f.owner).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_resolve_returns_owner_and_scope() {
        let f = fixture();
        let visibility = LinkVisibility::new(true, false, true);
        let link = f
            .service
            .create(&f.owner, request("Portfolio", Some(visibility)))
            .await
            .unwrap();

        let resolution = f.service.resolve(&link.token).await.unwrap();
        assert_eq!(resolution.owner_id, f.owner.user_id);
        assert_eq!(resolution.visibility, visibility);

        let stored = f.service.get(&f.owner, link.id).await.unwrap();
        assert_eq!(stored.usage_count, 1);
    }

    #[tokio::test]
    async fn test_sequential_resolves_count_and_stamp_last_use() {
        let f = fixture();
        let link = f
            .service
            .create(&f.owner, request("Portfolio", None))
            .await
            .unwrap();

        for _ in 0..5 {
            f.clock.advance(Duration::minutes(3));
            f.service.resolve(&link.token).await.unwrap();
        }

        let stored = f.service.get(&f.owner, link.id).await.unwrap();
        assert_eq!(stored.usage_count, 5);
        assert_eq!(stored.last_used_at, Some(f.clock.now()));
        assert!(stored.last_used_at.unwrap() >= stored.created_at);
    }

    #[tokio::test]
    async fn test_unknown_and_deleted_tokens_look_the_same() {
        let f = fixture();
        let link = f
            .service
            .create(&f.owner, request("Portfolio", None))
            .await
            .unwrap();
        f.service.delete(&f.owner, link.id).await.unwrap();

        let deleted = f.service.resolve(&link.token).await.unwrap_err();
        let unknown = f.service.resolve("never-issued").await.unwrap_err();
        assert_eq!(deleted.kind, ErrorKind::NotFound);
        assert_eq!(unknown.kind, ErrorKind::NotFound);
        assert_eq!(deleted.message, unknown.message);
    }

    #[tokio::test]
    async fn test_resolve_rejects_empty_token() {
        let f = fixture();
        let err = f.service.resolve("").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let err = f.service.resolve("   ").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.message, INVALID_LINK);
    }

    #[tokio::test]
    async fn test_delete_by_other_user_is_forbidden() {
        let f = fixture();
        let link = f
            .service
            .create(&f.owner, request("Portfolio", None))
            .await
            .unwrap();

        let intruder = RequestContext::new(Uuid::new_v4());
        let err = f.service.delete(&intruder, link.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);

        assert!(f.service.resolve(&link.token).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_twice_reports_not_found() {
        let f = fixture();
        let link = f
            .service
            .create(&f.owner, request("Portfolio", None))
            .await
            .unwrap();

        f.service.delete(&f.owner, link.id).await.unwrap();
        let err = f.service.delete(&f.owner, link.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_update_visibility_only_touches_target() {
        let f = fixture();
        let a = f
            .service
            .create(&f.owner, request("A", None))
            .await
            .unwrap();
        let b = f
            .service
            .create(&f.owner, request("B", None))
            .await
            .unwrap();

        let hidden = LinkVisibility::new(false, false, false);
        let updated = f
            .service
            .update_visibility(&f.owner, a.id, hidden)
            .await
            .unwrap();
        assert_eq!(updated.visibility, hidden);
        assert_eq!(updated.token, a.token);

        let untouched = f.service.get(&f.owner, b.id).await.unwrap();
        assert_eq!(untouched.visibility, LinkVisibility::ALL);
    }

    #[tokio::test]
    async fn test_get_other_users_link_is_forbidden() {
        let f = fixture();
        let link = f
            .service
            .create(&f.owner, request("Portfolio", None))
            .await
            .unwrap();
        let err = f
            .service
            .get(&RequestContext::new(Uuid::new_v4()), link.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_resolves_are_all_counted() {
        let f = fixture();
        let link = f
            .service
            .create(&f.owner, request("Portfolio", None))
            .await
            .unwrap();

        let service = Arc::new(f.service.clone());
        let mut handles = Vec::new();
        for _ in 0..25 {
            let service = Arc::clone(&service);
            let token = link.token.clone();
            handles.push(tokio::spawn(
                async move { service.resolve(&token).await },
            ));
        }
        for h in handles {
            h.await.unwrap().unwrap();
        }

        let stored = f.service.get(&f.owner, link.id).await.unwrap();
        assert_eq!(stored.usage_count, 25);
    }

    #[tokio::test]
    async fn test_store_outage_surfaces_as_unavailable() {
        let f = fixture();
        f.store.set_unavailable(true);
        let err = f.service.resolve("anything").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::StoreUnavailable);
    }
}
