//! Blob store collaborator contract.

use crate::error::Result;

/// An abstract store for uploaded binary assets (product images).
///
/// Consumed by the media upload flow, not by the orchestrator itself:
/// the caller uploads first and feeds the returned URL into the product
/// creation request. Failures surface as `AdliftError::Upload`.
#[async_trait::async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores `bytes` and returns a stable reference URL.
    async fn store(&self, bytes: &[u8], filename: &str) -> Result<String>;
}
