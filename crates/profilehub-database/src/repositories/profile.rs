//! Profile repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use profilehub_core::result::AppResult;
use profilehub_entity::profile::Profile;

use super::map_sqlx_error;
use crate::store::ProfileStore;

const PROFILE_COLUMNS: &str = "id, email, display_name, photo_url, cover_type, cover_image, \
     cover_gradient, location, website, phone, occupation, interests, bio, custom_fields, \
     attachments, created_at";

/// Repository for the `users` table.
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    /// Create a new profile repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for ProfileRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Profile>> {
        sqlx::query_as::<_, Profile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to find profile", e))
    }

    async fn exists(&self, id: Uuid) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to check profile", e))
    }

    async fn insert(&self, profile: &Profile) -> AppResult<Profile> {
        sqlx::query_as::<_, Profile>(&format!(
            "INSERT INTO users ({PROFILE_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
             RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(profile.id)
        .bind(&profile.email)
        .bind(&profile.display_name)
        .bind(&profile.photo_url)
        .bind(profile.cover_type)
        .bind(&profile.cover_image)
        .bind(&profile.cover_gradient)
        .bind(&profile.location)
        .bind(&profile.website)
        .bind(&profile.phone)
        .bind(&profile.occupation)
        .bind(&profile.interests)
        .bind(&profile.bio)
        .bind(&profile.custom_fields)
        .bind(&profile.attachments)
        .bind(profile.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to create profile", e))
    }

    async fn update(&self, profile: &Profile) -> AppResult<Option<Profile>> {
        sqlx::query_as::<_, Profile>(&format!(
            "UPDATE users SET display_name = $2, photo_url = $3, cover_type = $4, \
             cover_image = $5, cover_gradient = $6, location = $7, website = $8, phone = $9, \
             occupation = $10, interests = $11, bio = $12, custom_fields = $13, \
             attachments = $14 \
             WHERE id = $1 RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(profile.id)
        .bind(&profile.display_name)
        .bind(&profile.photo_url)
        .bind(profile.cover_type)
        .bind(&profile.cover_image)
        .bind(&profile.cover_gradient)
        .bind(&profile.location)
        .bind(&profile.website)
        .bind(&profile.phone)
        .bind(&profile.occupation)
        .bind(&profile.interests)
        .bind(&profile.bio)
        .bind(&profile.custom_fields)
        .bind(&profile.attachments)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to update profile", e))
    }
}
