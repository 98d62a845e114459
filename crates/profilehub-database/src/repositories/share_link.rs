//! Share link repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use profilehub_core::result::AppResult;
use profilehub_entity::share::{CreateShareLink, LinkVisibility, ShareLink};

use super::map_sqlx_error;
use crate::store::ShareLinkStore;

/// Repository for share link CRUD and token resolution.
#[derive(Debug, Clone)]
pub struct ShareLinkRepository {
    pool: PgPool,
}

impl ShareLinkRepository {
    /// Create a new share link repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShareLinkStore for ShareLinkRepository {
    async fn create(&self, data: &CreateShareLink) -> AppResult<ShareLink> {
        sqlx::query_as::<_, ShareLink>(
            "INSERT INTO share_links (owner_id, token, name, created_at, \
             show_avatar, show_cover, show_attachments) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(data.owner_id)
        .bind(&data.token)
        .bind(&data.name)
        .bind(data.created_at)
        .bind(data.visibility.avatar)
        .bind(data.visibility.cover)
        .bind(data.visibility.attachments)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to create share link", e))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ShareLink>> {
        sqlx::query_as::<_, ShareLink>("SELECT * FROM share_links WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to find share link", e))
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<ShareLink>> {
        sqlx::query_as::<_, ShareLink>("SELECT * FROM share_links WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to list share links", e))
    }

    async fn record_usage(&self, token: &str, at: DateTime<Utc>) -> AppResult<Option<ShareLink>> {
        // Single statement: concurrent resolutions serialize on the row lock.
        sqlx::query_as::<_, ShareLink>(
            "UPDATE share_links SET usage_count = usage_count + 1, \
             last_used_at = GREATEST($2, created_at) \
             WHERE token = $1 RETURNING *",
        )
        .bind(token)
        .bind(at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to record share link usage", e))
    }

    async fn update_visibility(
        &self,
        id: Uuid,
        visibility: LinkVisibility,
    ) -> AppResult<Option<ShareLink>> {
        sqlx::query_as::<_, ShareLink>(
            "UPDATE share_links SET show_avatar = $2, show_cover = $3, show_attachments = $4 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(visibility.avatar)
        .bind(visibility.cover)
        .bind(visibility.attachments)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to update share link visibility", e))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM share_links WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to delete share link", e))?;
        Ok(result.rows_affected() > 0)
    }
}
