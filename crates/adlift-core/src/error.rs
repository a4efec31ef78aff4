//! Error types for the AdLift orchestrator.
//!
//! `AdliftError` is the shared error type across all crates. The variants map
//! one-to-one onto the caller-facing taxonomy: validation failures, unknown
//! ids, lifecycle violations, optimistic-lock conflicts, upload failures and
//! compensation failures, plus ambient infrastructure variants.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire AdLift application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum AdliftError {
    /// Input validation failure naming the first offending field
    #[error("Validation failed: field '{field}': {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Operation not valid for the campaign's current lifecycle state
    #[error("Invalid state: cannot {operation} campaign '{id}' while {status}")]
    InvalidState {
        id: String,
        status: String,
        operation: &'static str,
    },

    /// Optimistic-lock conflict: another writer applied a transition first
    #[error("Version conflict on campaign '{id}': expected version {expected}")]
    Conflict { id: String, expected: u64 },

    /// Blob store failure, surfaced to the caller unchanged
    #[error("Upload failed: {0}")]
    Upload(String),

    /// Cleanup after a partial multi-entity creation itself failed.
    /// This is the one inconsistency the orchestrator cannot self-heal;
    /// it requires operator intervention.
    #[error("Compensation failed while rolling back {entity_type} '{id}': {message}")]
    Compensation {
        entity_type: &'static str,
        id: String,
        message: String,
    },

    /// Data access error (repository/storage layer)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AdliftError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error for a missing or malformed field
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an InvalidState error
    pub fn invalid_state(
        id: impl Into<String>,
        status: impl Into<String>,
        operation: &'static str,
    ) -> Self {
        Self::InvalidState {
            id: id.into(),
            status: status.into(),
            operation,
        }
    }

    /// Creates a Conflict error
    pub fn conflict(id: impl Into<String>, expected: u64) -> Self {
        Self::Conflict {
            id: id.into(),
            expected,
        }
    }

    /// Creates an Upload error
    pub fn upload(message: impl Into<String>) -> Self {
        Self::Upload(message.into())
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates an Io error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an InvalidState error
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState { .. })
    }

    /// Check if this is a Conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// Check if this is a Compensation error
    pub fn is_compensation(&self) -> bool {
        matches!(self, Self::Compensation { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for AdliftError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for AdliftError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for AdliftError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for AdliftError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error (transitional, should be removed eventually)
impl From<anyhow::Error> for AdliftError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, AdliftError>`.
pub type Result<T> = std::result::Result<T, AdliftError>;
