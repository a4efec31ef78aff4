//! Profile service implementation.
//!
//! Standalone persona management for the profile editor: create, PATCH-style
//! update, and read operations. Campaign creation goes through
//! `CampaignUseCase` instead, which persists its persona as part of the
//! three-entity unit.

use std::sync::Arc;

use adlift_core::error::{AdliftError, Result};
use adlift_core::profile::{
    CreateProfileRequest, ProfileRepository, UpdateProfileRequest, UserProfile,
};

/// Service for managing user profiles outside the campaign-creation flow.
pub struct ProfileService {
    profile_repository: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    /// Creates a new `ProfileService` instance.
    pub fn new(profile_repository: Arc<dyn ProfileRepository>) -> Self {
        Self { profile_repository }
    }

    /// Creates a standalone profile.
    pub async fn create(&self, request: CreateProfileRequest) -> Result<UserProfile> {
        request.validate()?;
        let profile = request.into_profile();
        self.profile_repository.insert(&profile).await?;
        tracing::info!(target: "profile", "Created profile '{}'", profile.id);
        Ok(profile)
    }

    /// Applies a PATCH-style update: only fields present in the request
    /// change; absent sub-documents are left as stored.
    pub async fn update(
        &self,
        profile_id: &str,
        request: UpdateProfileRequest,
    ) -> Result<UserProfile> {
        let mut profile = self.get(profile_id).await?;
        request.apply(&mut profile)?;
        self.profile_repository.update(&profile).await?;
        Ok(profile)
    }

    /// Returns one profile.
    pub async fn get(&self, profile_id: &str) -> Result<UserProfile> {
        self.profile_repository
            .find_by_id(profile_id)
            .await?
            .ok_or_else(|| AdliftError::not_found("profile", profile_id))
    }

    /// Lists all profiles.
    pub async fn list(&self) -> Result<Vec<UserProfile>> {
        self.profile_repository.list_all().await
    }
}
