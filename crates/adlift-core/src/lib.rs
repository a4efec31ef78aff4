//! AdLift core domain crate.
//!
//! Defines the campaign, profile and product models, the repository traits
//! the entity store must implement, the external collaborator contracts
//! (creative generator, blob store) and the shared error type.

pub mod blob;
pub mod campaign;
pub mod error;
pub mod generator;
pub mod product;
pub mod profile;

// Re-export common error type
pub use error::AdliftError;
