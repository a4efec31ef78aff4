//! In-memory CampaignRepository implementation.
//!
//! Updates are compare-and-set on the campaign's version under the write
//! lock, giving the per-record serialization the orchestrator relies on: of
//! two concurrent transitions on the same campaign, exactly one applies and
//! the other observes a `Conflict`.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use adlift_core::campaign::{Campaign, CampaignRepository};
use adlift_core::error::{AdliftError, Result};

/// In-memory campaign repository with optimistic-version conditional updates.
#[derive(Default)]
pub struct MemoryCampaignRepository {
    campaigns: RwLock<HashMap<String, Campaign>>,
}

impl MemoryCampaignRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CampaignRepository for MemoryCampaignRepository {
    async fn insert(&self, campaign: &Campaign) -> Result<()> {
        let mut campaigns = self.campaigns.write().await;
        if campaigns.contains_key(&campaign.id) {
            return Err(AdliftError::data_access(format!(
                "campaign '{}' already exists",
                campaign.id
            )));
        }
        let mut stored = campaign.clone();
        stored.version = 0;
        campaigns.insert(stored.id.clone(), stored);
        Ok(())
    }

    async fn find_by_id(&self, campaign_id: &str) -> Result<Option<Campaign>> {
        let campaigns = self.campaigns.read().await;
        Ok(campaigns.get(campaign_id).cloned())
    }

    async fn update(&self, campaign: &Campaign, expected_version: u64) -> Result<Campaign> {
        let mut campaigns = self.campaigns.write().await;
        let stored = campaigns
            .get_mut(&campaign.id)
            .ok_or_else(|| AdliftError::not_found("campaign", &campaign.id))?;
        if stored.version != expected_version {
            return Err(AdliftError::conflict(&campaign.id, expected_version));
        }
        let mut next = campaign.clone();
        next.version = expected_version + 1;
        *stored = next.clone();
        Ok(next)
    }

    async fn list_all(&self) -> Result<Vec<Campaign>> {
        let campaigns = self.campaigns.read().await;
        Ok(campaigns.values().cloned().collect())
    }
}
