//! Campaign domain model.
//!
//! The lifecycle is a closed state machine rather than a loosely-typed status
//! string: each state carries exactly the data that is valid for it, so
//! generation outputs exist if and only if the campaign completed, a failure
//! reason exists if and only if it failed, and a dispatch token exists if and
//! only if a generation attempt is in flight.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::error::{AdliftError, Result};

/// Opaque identifier minted each time a campaign is handed to the creative
/// generator. The generator must echo it back; callbacks carrying any other
/// token are discarded as stale.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct DispatchToken(String);

impl DispatchToken {
    /// Mints a fresh token.
    pub fn mint() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DispatchToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The creative generator's product: an opaque creative-persona document and
/// the rendered prompt string. Content is outside this system's
/// responsibility.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CreativeOutput {
    /// Structured creative-persona document (opaque to the orchestrator)
    pub creative_persona: serde_json::Value,
    /// Rendered prompt / ad copy
    pub prompt: String,
}

/// The campaign lifecycle state.
///
/// Serialized with a `status` tag so stored and wire forms carry the same
/// `pending` / `generating` / `completed` / `failed` strings the dashboard
/// renders.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CampaignState {
    /// Created, not yet dispatched
    Pending,
    /// Dispatched to the creative generator, awaiting its callback
    Generating {
        dispatch_token: DispatchToken,
        dispatched_at: DateTime<Utc>,
    },
    /// Terminal success
    Completed { output: CreativeOutput },
    /// Terminal but retry-eligible via a fresh dispatch
    Failed { reason: String },
}

/// Flat status discriminant for snapshots, logging and error messages.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Pending,
    Generating,
    Completed,
    Failed,
}

impl std::fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Generating => "generating",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// A campaign: static creative brief plus lifecycle state.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Campaign {
    /// Unique identifier (UUID format)
    pub id: String,
    /// Referenced target-user profile id (must resolve for the campaign's
    /// entire lifetime)
    pub profile_id: String,
    /// Referenced product id (must resolve for the campaign's entire lifetime)
    pub product_id: String,
    /// Campaign objective (e.g. "awareness")
    pub objective: String,
    /// Target platform (e.g. "instagram")
    pub platform: String,
    /// Target ad duration in seconds
    pub duration_seconds: u32,
    /// Desired brand tone, if specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_tone: Option<String>,
    /// Desired call-to-action style, if specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_style: Option<String>,
    /// Free-form product-intent hints forwarded to the generator
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub product_intent: BTreeMap<String, String>,
    /// Lifecycle state (flattened into the `status` tag on the wire)
    #[serde(flatten)]
    pub state: CampaignState,
    /// Optimistic-concurrency version, bumped by the store on every update
    #[serde(default)]
    pub version: u64,
    /// Creation timestamp (UTC)
    pub created_at: DateTime<Utc>,
}

impl Campaign {
    /// Flat status discriminant of the current state.
    pub fn status(&self) -> CampaignStatus {
        match &self.state {
            CampaignState::Pending => CampaignStatus::Pending,
            CampaignState::Generating { .. } => CampaignStatus::Generating,
            CampaignState::Completed { .. } => CampaignStatus::Completed,
            CampaignState::Failed { .. } => CampaignStatus::Failed,
        }
    }

    /// The token of the in-flight generation attempt, if any.
    pub fn dispatch_token(&self) -> Option<&DispatchToken> {
        match &self.state {
            CampaignState::Generating { dispatch_token, .. } => Some(dispatch_token),
            _ => None,
        }
    }

    /// Generation outputs, present iff the campaign completed.
    pub fn output(&self) -> Option<&CreativeOutput> {
        match &self.state {
            CampaignState::Completed { output } => Some(output),
            _ => None,
        }
    }

    /// Failure reason, present iff the campaign failed.
    pub fn failure_reason(&self) -> Option<&str> {
        match &self.state {
            CampaignState::Failed { reason } => Some(reason),
            _ => None,
        }
    }

    // ========================================================================
    // Transitions. All are pure: they return the next value of the campaign
    // and leave applying it (under the store's compare-and-set) to the caller.
    // ========================================================================

    /// Enters `generating` with the given freshly-minted token.
    ///
    /// Allowed from `pending` (first dispatch) and `failed` (retry). Returns
    /// `InvalidState` while already `generating` or `completed`; a campaign is
    /// handed to the generator at most once per transition into `generating`.
    pub fn begin_generation(mut self, token: DispatchToken, now: DateTime<Utc>) -> Result<Self> {
        match self.state {
            CampaignState::Pending | CampaignState::Failed { .. } => {
                self.state = CampaignState::Generating {
                    dispatch_token: token,
                    dispatched_at: now,
                };
                Ok(self)
            }
            _ => Err(AdliftError::invalid_state(
                self.id.clone(),
                self.status().to_string(),
                "dispatch",
            )),
        }
    }

    /// Applies a success callback.
    ///
    /// Returns `Some(next)` iff the campaign is `generating` and `token`
    /// matches the in-flight attempt; `None` means the result is stale and
    /// must be discarded without touching the campaign.
    pub fn complete(&self, token: &DispatchToken, output: CreativeOutput) -> Option<Self> {
        match &self.state {
            CampaignState::Generating { dispatch_token, .. } if dispatch_token == token => {
                let mut next = self.clone();
                next.state = CampaignState::Completed { output };
                Some(next)
            }
            _ => None,
        }
    }

    /// Applies a failure callback. Same token discipline as [`complete`].
    ///
    /// [`complete`]: Campaign::complete
    pub fn fail(&self, token: &DispatchToken, reason: impl Into<String>) -> Option<Self> {
        match &self.state {
            CampaignState::Generating { dispatch_token, .. } if dispatch_token == token => {
                let mut next = self.clone();
                next.state = CampaignState::Failed {
                    reason: reason.into(),
                };
                Some(next)
            }
            _ => None,
        }
    }

    /// True iff a generation attempt is in flight and its dispatch happened
    /// more than `timeout` before `now` with no callback received.
    pub fn is_dispatch_stale(&self, now: DateTime<Utc>, timeout: Duration) -> bool {
        match &self.state {
            CampaignState::Generating { dispatched_at, .. } => now - *dispatched_at > timeout,
            _ => false,
        }
    }
}
