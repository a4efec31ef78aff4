//! User profile domain module.
//!
//! A profile captures the target-user persona a campaign is aimed at: a name
//! plus four optional attribute-map sub-documents (demographics,
//! psychographics, lifestyle, media preferences).

pub mod model;
pub mod repository;
pub mod request;

pub use model::{AttributeMap, AttributeValue, UserProfile};
pub use repository::ProfileRepository;
pub use request::{CreateProfileRequest, UpdateProfileRequest};
