//! AdLift application crate.
//!
//! Use-case services over the core domain: the campaign generation
//! orchestrator, standalone profile management, media uploads and the
//! background reconciliation scheduler.

pub mod campaign_usecase;
pub mod media_service;
pub mod profile_service;
pub mod reconciler;

pub use campaign_usecase::{CampaignUseCase, GENERATION_TIMED_OUT, GenerationPolicy};
pub use media_service::MediaService;
pub use profile_service::ProfileService;
pub use reconciler::Reconciler;
