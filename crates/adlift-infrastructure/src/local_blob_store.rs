//! Local-filesystem BlobStore implementation.
//!
//! Mirrors the upload flow of the original console: bytes land under an
//! uploads directory and the caller gets back a URL it can embed in a product
//! record.

use async_trait::async_trait;
use std::path::PathBuf;
use uuid::Uuid;

use adlift_core::blob::BlobStore;
use adlift_core::error::{AdliftError, Result};

/// Blob store that writes uploads to a local directory.
///
/// Stored files are prefixed with a UUID so identical filenames never
/// collide. Returned URLs have the shape
/// `{base_url}/static/uploads/{uuid}-{filename}`.
pub struct LocalBlobStore {
    upload_dir: PathBuf,
    base_url: String,
}

impl LocalBlobStore {
    /// Creates a store rooted at `upload_dir`, serving under `base_url`.
    pub fn new(upload_dir: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn store(&self, bytes: &[u8], filename: &str) -> Result<String> {
        // Strip any path components a client may have smuggled in.
        let safe_name = filename
            .rsplit(['/', '\\'])
            .next()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| AdliftError::upload(format!("invalid filename '{filename}'")))?;
        let stored_name = format!("{}-{}", Uuid::new_v4(), safe_name);

        tokio::fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(|e| AdliftError::upload(format!("failed to create upload dir: {e}")))?;

        let path = self.upload_dir.join(&stored_name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AdliftError::upload(format!("failed to write {}: {e}", path.display())))?;

        tracing::debug!(target: "blob", "Stored {} bytes as {}", bytes.len(), stored_name);
        Ok(format!(
            "{}/static/uploads/{}",
            self.base_url.trim_end_matches('/'),
            stored_name
        ))
    }
}
