//! Creative generator collaborator contract.
//!
//! The generator is an external system: given a campaign's persona and
//! product data it asynchronously produces a creative-persona document and a
//! rendered prompt. It may be slow, crash, or never answer; the orchestrator
//! covers that with timeout reconciliation.

use serde::{Deserialize, Serialize};

use crate::campaign::{CampaignFields, DispatchToken};
use crate::error::Result;
use crate::product::Product;
use crate::profile::UserProfile;

/// Everything the generator needs to produce creative output for one
/// dispatch. Snapshotted at dispatch time so later profile edits do not bleed
/// into an in-flight attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationJob {
    /// The campaign being generated for
    pub campaign_id: String,
    /// Token the generator must echo back in its callback
    pub dispatch_token: DispatchToken,
    /// Target-user persona
    pub profile: UserProfile,
    /// Product under promotion
    pub product: Product,
    /// Objective, platform, duration and tone hints
    pub fields: CampaignFields,
}

/// An abstract creative generator.
///
/// # Contract
///
/// - `submit` only enqueues the job; it must not block until generation
///   finishes.
/// - The generator later reports its result through the orchestrator's
///   `on_generation_success` / `on_generation_failure` operations, echoing
///   the job's `dispatch_token` unchanged.
/// - At most one callback per token; calling back never is permitted and is
///   handled by reconciliation.
#[async_trait::async_trait]
pub trait CreativeGenerator: Send + Sync {
    /// Enqueues a generation job.
    async fn submit(&self, job: GenerationJob) -> Result<()>;
}
