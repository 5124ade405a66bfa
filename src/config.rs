//! Board Configuration
//!
//! Storage keys, catalog fetch settings and file locations. Every field has
//! a default, so a config file only needs the values it changes.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_CATALOG_URL: &str = "TIER_BOARD_CATALOG_URL";
pub const ENV_DB_PATH: &str = "TIER_BOARD_DB_PATH";
pub const ENV_LOG_DIR: &str = "TIER_BOARD_LOG_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Keys used in the key-value store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StorageKeys {
    pub assignments: String,
    pub rows: String,
    pub tiers: String,
    pub catalog_data: String,
    pub catalog_metadata: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            assignments: "tierAssignments".to_string(),
            rows: "dynamicRows".to_string(),
            tiers: "tierLabels".to_string(),
            catalog_data: "catalog_data".to_string(),
            catalog_metadata: "catalog_metadata".to_string(),
        }
    }
}

/// Remote catalog fetch behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogSettings {
    /// Empty means: use the packaged catalog
    pub url: String,
    pub request_timeout_ms: u64,
    pub retry_attempts: u32,
    /// Base delay; attempt `n` waits `n * retry_delay_ms`
    pub retry_delay_ms: u64,
    /// How long cached validators are sent with requests
    pub cache_duration_ms: i64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            request_timeout_ms: 10_000,
            retry_attempts: 3,
            retry_delay_ms: 1_000,
            cache_duration_ms: 24 * 60 * 60 * 1000,
        }
    }
}

impl CatalogSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Linear backoff after failed attempt `attempt` (1-based)
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.retry_delay_ms.saturating_mul(u64::from(attempt)))
    }

    pub fn is_remote(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardConfig {
    pub storage: StorageKeys,
    pub catalog: CatalogSettings,
    /// SQLite file; `None` keeps state in memory
    pub db_path: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
}

impl BoardConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// File (when given) or defaults, then environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_json_file(path)?,
            None => Self::default(),
        };
        Ok(config.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Apply overrides looked up by env var name
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_CATALOG_URL) {
            self.catalog.url = url;
        }
        if let Some(path) = lookup(ENV_DB_PATH).filter(|p| !p.is_empty()) {
            self.db_path = Some(PathBuf::from(path));
        }
        if let Some(dir) = lookup(ENV_LOG_DIR).filter(|d| !d.is_empty()) {
            self.log_dir = Some(PathBuf::from(dir));
        }
        self
    }
}
