//! Product domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A product being advertised.
///
/// Immutable after creation from the orchestrator's point of view; campaigns
/// reference products by id.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Product {
    /// Unique identifier (UUID format)
    pub id: String,
    /// Product name
    pub name: String,
    /// Product description
    pub description: String,
    /// Feature bullet points forwarded to the creative generator
    #[serde(default)]
    pub features: Vec<String>,
    /// Blob store URL of an uploaded product image, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Creation timestamp (UTC)
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Creates a new product with a fresh UUID and the current timestamp.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: description.into(),
            features: Vec::new(),
            image_url: None,
            created_at: Utc::now(),
        }
    }
}
