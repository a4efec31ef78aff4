//! AdLift infrastructure crate.
//!
//! Concrete implementations of the core repository and collaborator traits:
//! in-memory entity stores (the default for tests and single-process
//! deployments), a local-filesystem blob store, and the TOML-backed
//! configuration service.

pub mod config_service;
pub mod local_blob_store;
pub mod memory_campaign_repository;
pub mod memory_product_repository;
pub mod memory_profile_repository;

pub use crate::config_service::{ConfigService, GenerationConfig, MediaConfig, RootConfig};
pub use crate::local_blob_store::LocalBlobStore;
pub use crate::memory_campaign_repository::MemoryCampaignRepository;
pub use crate::memory_product_repository::MemoryProductRepository;
pub use crate::memory_profile_repository::MemoryProfileRepository;
