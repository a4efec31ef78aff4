//! Campaign creation request models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use super::model::{Campaign, CampaignState};
use crate::error::{AdliftError, Result};
use crate::product::CreateProductRequest;
use crate::profile::CreateProfileRequest;

/// Campaign-specific fields of a creation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignFields {
    /// Campaign objective
    #[serde(default = "default_objective")]
    pub objective: String,

    /// Target platform (required)
    pub platform: String,

    /// Target ad duration in seconds (required, > 0)
    pub duration_seconds: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_tone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_style: Option<String>,

    #[serde(default)]
    pub product_intent: BTreeMap<String, String>,
}

fn default_objective() -> String {
    "awareness".to_string()
}

impl Default for CampaignFields {
    fn default() -> Self {
        Self {
            objective: default_objective(),
            platform: String::new(),
            duration_seconds: 0,
            brand_tone: None,
            cta_style: None,
            product_intent: BTreeMap::new(),
        }
    }
}

/// The creation wizard's full payload: persona, product and campaign fields
/// created as one logical unit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCampaignRequest {
    pub profile: CreateProfileRequest,
    pub product: CreateProductRequest,
    pub campaign: CampaignFields,
}

impl CreateCampaignRequest {
    /// Validate the request, failing with the first missing field in order:
    /// persona name, product name, product description, platform, duration.
    pub fn validate(&self) -> Result<()> {
        self.profile.validate()?;
        self.product.validate()?;
        if self.campaign.platform.trim().is_empty() {
            return Err(AdliftError::validation(
                "campaign.platform",
                "target platform is required and cannot be empty",
            ));
        }
        if self.campaign.duration_seconds == 0 {
            return Err(AdliftError::validation(
                "campaign.duration_seconds",
                "target duration must be greater than zero",
            ));
        }
        Ok(())
    }
}

impl CampaignFields {
    /// Builds a `pending` campaign referencing already-persisted entities.
    pub fn into_campaign(self, profile_id: &str, product_id: &str) -> Campaign {
        Campaign {
            id: Uuid::new_v4().to_string(),
            profile_id: profile_id.to_string(),
            product_id: product_id.to_string(),
            objective: self.objective,
            platform: self.platform,
            duration_seconds: self.duration_seconds,
            brand_tone: self.brand_tone,
            cta_style: self.cta_style,
            product_intent: self.product_intent,
            state: CampaignState::Pending,
            version: 0,
            created_at: chrono::Utc::now(),
        }
    }
}
