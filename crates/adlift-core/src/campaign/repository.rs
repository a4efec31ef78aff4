//! Campaign repository trait.
//!
//! Campaign mutation goes through a per-record compare-and-set: `update`
//! carries the version the caller read, and the store applies the new value
//! only if the stored version still matches. Two concurrent transitions on
//! the same campaign therefore cannot both apply; the loser observes a
//! `Conflict` and re-reads.

use super::model::Campaign;
use crate::error::Result;

/// An abstract repository for managing campaign persistence.
///
/// # Implementation Notes
///
/// Implementations must provide:
/// - A first-class single-item lookup (`find_by_id`) — readers never
///   reconstruct a single campaign from a list scan
/// - Per-record atomic conditional update on `version`
#[async_trait::async_trait]
pub trait CampaignRepository: Send + Sync {
    /// Persists a new campaign at version 0.
    async fn insert(&self, campaign: &Campaign) -> Result<()>;

    /// Finds a campaign by its ID.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Campaign))`: Campaign found
    /// - `Ok(None)`: Campaign not found
    async fn find_by_id(&self, campaign_id: &str) -> Result<Option<Campaign>>;

    /// Conditionally replaces a stored campaign.
    ///
    /// Applies `campaign` only if the stored version equals
    /// `expected_version`, and bumps the version on success.
    ///
    /// # Returns
    ///
    /// - `Ok(Campaign)`: The stored value after the update (version bumped)
    /// - `Err(AdliftError::Conflict)`: Another writer got there first
    /// - `Err(AdliftError::NotFound)`: No campaign with this id exists
    async fn update(&self, campaign: &Campaign, expected_version: u64) -> Result<Campaign>;

    /// Lists all stored campaigns.
    async fn list_all(&self) -> Result<Vec<Campaign>>;
}
