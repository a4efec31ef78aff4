//! Campaign domain module.
//!
//! The campaign is the unit the orchestrator manages end-to-end: created as
//! `pending`, dispatched to the creative generator as `generating`, and
//! finished as `completed` (with outputs) or `failed` (with a reason,
//! retry-eligible).

pub mod model;
pub mod repository;
pub mod request;

pub use model::{Campaign, CampaignState, CampaignStatus, CreativeOutput, DispatchToken};
pub use repository::CampaignRepository;
pub use request::{CampaignFields, CreateCampaignRequest};
