//! In-memory share link store using dashmap.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;
use uuid::Uuid;

use profilehub_core::error::AppError;
use profilehub_core::result::AppResult;
use profilehub_entity::share::{CreateShareLink, LinkVisibility, ShareLink};

use crate::store::ShareLinkStore;

/// Share links held in two concurrent maps: records by id and a token index.
///
/// Usage updates run under the record's shard write lock, so concurrent
/// resolutions of one token never lose an increment.
#[derive(Debug, Clone, Default)]
pub struct MemoryShareLinkStore {
    links: Arc<DashMap<Uuid, ShareLink>>,
    tokens: Arc<DashMap<String, Uuid>>,
    unavailable: Arc<AtomicBool>,
}

impl MemoryShareLinkStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail as if the backend were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether the store holds no links.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    fn check_available(&self) -> AppResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::store_unavailable("In-memory store is offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl ShareLinkStore for MemoryShareLinkStore {
    async fn create(&self, data: &CreateShareLink) -> AppResult<ShareLink> {
        self.check_available()?;

        match self.tokens.entry(data.token.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict("Share link token already exists")),
            Entry::Vacant(slot) => {
                let link = data.clone().into_link(Uuid::now_v7());
                self.links.insert(link.id, link.clone());
                slot.insert(link.id);
                debug!(link_id = %link.id, "Stored share link");
                Ok(link)
            }
        }
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ShareLink>> {
        self.check_available()?;
        Ok(self.links.get(&id).map(|l| l.value().clone()))
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<ShareLink>> {
        self.check_available()?;
        Ok(self
            .links
            .iter()
            .filter(|l| l.owner_id == owner_id)
            .map(|l| l.value().clone())
            .collect())
    }

    async fn record_usage(&self, token: &str, at: DateTime<Utc>) -> AppResult<Option<ShareLink>> {
        self.check_available()?;

        let Some(id) = self.tokens.get(token).map(|e| *e.value()) else {
            return Ok(None);
        };

        Ok(self.links.get_mut(&id).map(|mut entry| {
            entry.record_use(at);
            entry.value().clone()
        }))
    }

    async fn update_visibility(
        &self,
        id: Uuid,
        visibility: LinkVisibility,
    ) -> AppResult<Option<ShareLink>> {
        self.check_available()?;
        Ok(self.links.get_mut(&id).map(|mut entry| {
            entry.visibility = visibility;
            entry.value().clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        self.check_available()?;
        match self.links.remove(&id) {
            Some((_, link)) => {
                self.tokens.remove(&link.token);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
