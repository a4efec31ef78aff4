//! Configuration service implementation.
//!
//! Loads the orchestrator configuration from a TOML file (`adlift.toml`) and
//! caches it. A missing file yields the defaults, so a bare deployment works
//! without any configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use adlift_core::error::Result;

/// Root configuration for the orchestrator.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RootConfig {
    pub generation: GenerationConfig,
    pub media: MediaConfig,
}

/// Generation dispatch and reconciliation settings.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
    /// Minutes a dispatched campaign may wait for a callback before
    /// reconciliation fails it as timed out.
    pub timeout_minutes: u64,
    /// Seconds between reconciliation sweeps.
    pub reconcile_interval_seconds: u64,
}

/// Media upload settings.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MediaConfig {
    /// Public base URL uploads are served under.
    pub base_url: String,
    /// Directory uploaded files are written to.
    pub upload_dir: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            timeout_minutes: 10,
            reconcile_interval_seconds: 60,
        }
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            upload_dir: "static/uploads".to_string(),
        }
    }
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            generation: GenerationConfig::default(),
            media: MediaConfig::default(),
        }
    }
}

/// Configuration service that loads and caches the root configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    config_path: PathBuf,
    /// Cached configuration loaded from file.
    /// Uses RwLock for thread-safe lazy loading.
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    /// Creates a new ConfigService reading from `config_path`.
    ///
    /// The configuration is loaded lazily on first access.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the root configuration, loading from file if not cached.
    ///
    /// A missing or unreadable file falls back to the defaults.
    pub fn get_config(&self) -> RootConfig {
        {
            let read_lock = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = Self::load_config(&self.config_path).unwrap_or_default();

        {
            let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = None;
    }

    fn load_config(path: &Path) -> Result<RootConfig> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}
