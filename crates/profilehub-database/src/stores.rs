//! Backend selection: builds the store set named by configuration.

use std::sync::Arc;

use tracing::{info, warn};

use profilehub_core::config::{DatabaseBackend, DatabaseConfig};
use profilehub_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::{MemoryProfileStore, MemoryShareLinkStore};
use crate::migration::run_migrations;
use crate::repositories::{ProfileRepository, ShareLinkRepository};
use crate::store::{ProfileStore, ShareLinkStore};

/// The record stores a running application depends on.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Share link persistence.
    pub share_links: Arc<dyn ShareLinkStore>,
    /// Profile lookups.
    pub profiles: Arc<dyn ProfileStore>,
    /// The PostgreSQL pool, when that backend is active.
    pub pool: Option<DatabasePool>,
}

impl Stores {
    /// Connect to the configured backend.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.backend {
            DatabaseBackend::Postgres => {
                let pool = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    run_migrations(pool.pool()).await?;
                }
                Ok(Self {
                    share_links: Arc::new(ShareLinkRepository::new(pool.pool().clone())),
                    profiles: Arc::new(ProfileRepository::new(pool.pool().clone())),
                    pool: Some(pool),
                })
            }
            DatabaseBackend::Memory => {
                warn!("Using in-memory store; data will not survive a restart");
                Ok(Self::memory(
                    MemoryShareLinkStore::new(),
                    MemoryProfileStore::new(),
                ))
            }
        }
    }

    /// Wrap existing in-memory stores.
    pub fn memory(share_links: MemoryShareLinkStore, profiles: MemoryProfileStore) -> Self {
        info!("In-memory stores ready");
        Self {
            share_links: Arc::new(share_links),
            profiles: Arc::new(profiles),
            pool: None,
        }
    }

    /// Release backend resources.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
