//! In-memory ProfileRepository implementation.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use adlift_core::error::{AdliftError, Result};
use adlift_core::profile::{ProfileRepository, UserProfile};

/// In-memory profile repository backed by a `HashMap`.
///
/// The default entity store for tests and single-process deployments.
#[derive(Default)]
pub struct MemoryProfileRepository {
    profiles: RwLock<HashMap<String, UserProfile>>,
}

impl MemoryProfileRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for MemoryProfileRepository {
    async fn insert(&self, profile: &UserProfile) -> Result<()> {
        let mut profiles = self.profiles.write().await;
        if profiles.contains_key(&profile.id) {
            return Err(AdliftError::data_access(format!(
                "profile '{}' already exists",
                profile.id
            )));
        }
        profiles.insert(profile.id.clone(), profile.clone());
        Ok(())
    }

    async fn find_by_id(&self, profile_id: &str) -> Result<Option<UserProfile>> {
        let profiles = self.profiles.read().await;
        Ok(profiles.get(profile_id).cloned())
    }

    async fn update(&self, profile: &UserProfile) -> Result<()> {
        let mut profiles = self.profiles.write().await;
        match profiles.get_mut(&profile.id) {
            Some(stored) => {
                *stored = profile.clone();
                Ok(())
            }
            None => Err(AdliftError::not_found("profile", &profile.id)),
        }
    }

    async fn delete(&self, profile_id: &str) -> Result<()> {
        let mut profiles = self.profiles.write().await;
        profiles.remove(profile_id);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<UserProfile>> {
        let profiles = self.profiles.read().await;
        Ok(profiles.values().cloned().collect())
    }
}
