//! Media upload service implementation.
//!
//! Thin flow in front of the blob store: the creation wizard uploads a
//! product image here first and feeds the returned URL into the product part
//! of its campaign-creation request. Upload failures pass through to the
//! caller unchanged; the orchestrator never sees them.

use std::sync::Arc;

use adlift_core::blob::BlobStore;
use adlift_core::error::{AdliftError, Result};

/// Service for uploading product images.
pub struct MediaService {
    blob_store: Arc<dyn BlobStore>,
}

impl MediaService {
    /// Creates a new `MediaService` instance.
    pub fn new(blob_store: Arc<dyn BlobStore>) -> Self {
        Self { blob_store }
    }

    /// Stores image bytes and returns their stable URL.
    pub async fn upload_image(&self, bytes: &[u8], filename: &str) -> Result<String> {
        if bytes.is_empty() {
            return Err(AdliftError::upload("empty upload"));
        }
        let url = self.blob_store.store(bytes, filename).await?;
        tracing::info!(target: "media", "Stored upload '{}' at {}", filename, url);
        Ok(url)
    }
}
