//! In-memory profile store.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use profilehub_core::error::AppError;
use profilehub_core::result::AppResult;
use profilehub_entity::profile::Profile;

use crate::store::ProfileStore;

/// Profiles keyed by user id.
#[derive(Debug, Clone, Default)]
pub struct MemoryProfileStore {
    profiles: Arc<DashMap<Uuid, Profile>>,
}

impl MemoryProfileStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a profile.
    pub fn upsert(&self, profile: Profile) {
        self.profiles.insert(profile.id, profile);
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Profile>> {
        Ok(self.profiles.get(&id).map(|p| p.value().clone()))
    }

    async fn insert(&self, profile: &Profile) -> AppResult<Profile> {
        if self
            .profiles
            .iter()
            .any(|p| p.id != profile.id && p.email.eq_ignore_ascii_case(&profile.email))
        {
            return Err(AppError::conflict("Email is already registered"));
        }

        match self.profiles.entry(profile.id) {
            Entry::Occupied(_) => Err(AppError::conflict("Profile already exists")),
            Entry::Vacant(slot) => {
                slot.insert(profile.clone());
                Ok(profile.clone())
            }
        }
    }

    async fn update(&self, profile: &Profile) -> AppResult<Option<Profile>> {
        Ok(self.profiles.get_mut(&profile.id).map(|mut entry| {
            let stored = entry.value_mut();
            *stored = Profile {
                id: stored.id,
                email: stored.email.clone(),
                created_at: stored.created_at,
                ..profile.clone()
            };
            stored.clone()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use profilehub_core::error::ErrorKind;

    #[tokio::test]
    async fn test_insert_rejects_duplicate_id_and_email() {
        let store = MemoryProfileStore::new();
        let profile = Profile::new(Uuid::new_v4(), "ana@example.com", "Ana");
        store.insert(&profile).await.unwrap();

        let again = store.insert(&profile).await.unwrap_err();
        assert_eq!(again.kind, ErrorKind::Conflict);

        let same_email = Profile::new(Uuid::new_v4(), "ANA@example.com", "Other");
        let err = store.insert(&same_email).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_update_keeps_identity_fields() {
        let store = MemoryProfileStore::new();
        let original = Profile::new(Uuid::new_v4(), "ana@example.com", "Ana");
        store.insert(&original).await.unwrap();

        let mut edited = original.clone();
        edited.email = "changed@example.com".to_string();
        edited.display_name = "Ana B.".to_string();
        edited.bio = Some("Designer".to_string());

        let stored = store.update(&edited).await.unwrap().unwrap();
        assert_eq!(stored.email, "ana@example.com");
        assert_eq!(stored.display_name, "Ana B.");
        assert_eq!(stored.bio.as_deref(), Some("Designer"));
        assert_eq!(stored.created_at, original.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_profile_is_none() {
        let store = MemoryProfileStore::new();
        let ghost = Profile::new(Uuid::new_v4(), "ghost@example.com", "Ghost");
        assert!(store.update(&ghost).await.unwrap().is_none());
    }
}
