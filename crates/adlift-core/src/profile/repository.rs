//! Profile repository trait.
//!
//! Defines the interface for profile persistence operations.

use super::model::UserProfile;
use crate::error::Result;

/// An abstract repository for managing user-profile persistence.
///
/// This trait defines the contract for persisting and retrieving profiles,
/// decoupling the orchestrator from the specific storage mechanism
/// (in-memory, database, remote API).
///
/// # Implementation Notes
///
/// `delete` exists solely for the orchestrator's creation-compensation path;
/// no other code path removes a profile.
#[async_trait::async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Persists a new profile.
    async fn insert(&self, profile: &UserProfile) -> Result<()>;

    /// Finds a profile by its ID.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UserProfile))`: Profile found
    /// - `Ok(None)`: Profile not found
    async fn find_by_id(&self, profile_id: &str) -> Result<Option<UserProfile>>;

    /// Replaces a stored profile (profile edits).
    ///
    /// # Returns
    ///
    /// - `Err(AdliftError::NotFound)`: No profile with this id exists
    async fn update(&self, profile: &UserProfile) -> Result<()>;

    /// Deletes a profile. Compensation only.
    ///
    /// Deleting an unknown id is not an error.
    async fn delete(&self, profile_id: &str) -> Result<()>;

    /// Lists all stored profiles.
    async fn list_all(&self) -> Result<Vec<UserProfile>>;
}
