//! Viewer configuration.
//!
//! A single JSON file describes the world dimensions, backend location,
//! polling cadence and the known-command list used for suggestions. Every
//! field has a default so a missing file starts a local-development viewer.

use std::path::Path;

use serde::{Deserialize, Serialize};
use shardmap_core::phase::PhaseConfig;

use crate::error::{Result, ViewerError};

/// Viewer configuration, loaded from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ViewerConfig {
    /// Base URL of the map backend.
    #[serde(rename = "BaseURL")]
    pub base_url: String,
    /// Shards per axis, x.
    pub shards_x: u16,
    /// Shards per axis, y.
    pub shards_y: u16,
    /// Seconds between backend polls.
    pub poll_interval_secs: u64,
    /// Seconds between scheduler ticks. Must stay at (or below) the
    /// 1-second phase granularity or icons go visibly stale.
    pub tick_interval_secs: u64,
    /// Known commands offered as suggestions.
    pub suggestions: Vec<String>,
    /// Phase durations (war cooldown, combat window).
    pub phases: PhaseConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            shards_x: 10,
            shards_y: 10,
            poll_interval_secs: 5,
            tick_interval_secs: 1,
            suggestions: Vec::new(),
            phases: PhaseConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ViewerError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ViewerError::ConfigParse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load configuration, falling back to defaults when the file does not
    /// exist. A present-but-broken file is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::info!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }
}
