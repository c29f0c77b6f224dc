//! Runtime settings
//!
//! Settings are read once at start-up from an optional YAML file, then
//! overridden by command-line flags and the `PUBG_API_KEY` environment
//! variable. The resulting [`Settings`] value is passed to everything that
//! makes requests; there is no global state.

use crate::error::{Error, Result, ResultExt};
use crate::http::RateLimiterConfig;
use crate::types::Shard;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default API root
pub const DEFAULT_BASE_URL: &str = "https://api.pubg.com";

/// Media type the API serves
pub const API_MEDIA_TYPE: &str = "application/vnd.api+json";

// ============================================================================
// Top-Level Settings
// ============================================================================

/// Complete runtime settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Remote API access
    pub api: ApiConfig,

    /// Which matches yield rows
    pub selection: SelectionPolicy,

    /// Worker pool and batching
    pub pipeline: PipelineConfig,

    /// CSV sink
    pub output: OutputConfig,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml_str(&contents)
            .with_context(|| format!("Invalid settings in {}", path.display()))
    }

    /// Parse settings from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Check values that would otherwise fail later
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api.base_url)?;

        if self.api.timeout_seconds == 0 {
            return Err(Error::invalid_value("api.timeout_seconds", "must be > 0"));
        }
        if self.pipeline.batch_size == 0 {
            return Err(Error::invalid_value("pipeline.batch_size", "must be > 0"));
        }
        if self.pipeline.workers == 0 {
            return Err(Error::invalid_value("pipeline.workers", "must be > 0"));
        }
        Ok(())
    }

    /// The API key, which must be configured before any API request
    pub fn api_key(&self) -> Result<&str> {
        self.api
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::missing_field("api.api_key (or PUBG_API_KEY)"))
    }
}

// ============================================================================
// API Config
// ============================================================================

/// Remote API access
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API root, without the `/shards/...` part
    pub base_url: String,

    /// Developer API key
    pub api_key: Option<String>,

    /// Shard to query
    pub shard: Shard,

    /// Request timeout in seconds
    pub timeout_seconds: u64,

    /// Client-side throttle for API requests
    pub rate_limit: Option<RateLimiterConfig>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            shard: Shard::default(),
            timeout_seconds: 30,
            rate_limit: Some(RateLimiterConfig::default()),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("shard", &self.shard)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("rate_limit", &self.rate_limit)
            .finish()
    }
}

// ============================================================================
// Selection Policy
// ============================================================================

/// Only matches with this mode and map produce rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionPolicy {
    pub game_mode: String,
    pub map_name: String,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            game_mode: "solo".to_string(),
            map_name: "Savage_Main".to_string(),
        }
    }
}

impl SelectionPolicy {
    pub fn new(game_mode: impl Into<String>, map_name: impl Into<String>) -> Self {
        Self {
            game_mode: game_mode.into(),
            map_name: map_name.into(),
        }
    }

    /// Whether a match with this mode and map should be processed
    pub fn accepts(&self, game_mode: &str, map_name: &str) -> bool {
        self.game_mode == game_mode && self.map_name == map_name
    }
}

// ============================================================================
// Pipeline Config
// ============================================================================

/// Worker pool and batching
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Match ids per batch; rows are written after each batch completes
    pub batch_size: usize,

    /// Matches processed concurrently within a batch
    pub workers: usize,

    /// Stop after this many batches (None = all)
    pub max_batches: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            workers: 3,
            max_batches: Some(10),
        }
    }
}

impl PipelineConfig {
    /// Set batch size
    #[must_use]
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    /// Set worker count
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the batch cap
    #[must_use]
    pub fn with_max_batches(mut self, max: Option<usize>) -> Self {
        self.max_batches = max;
        self
    }
}

// ============================================================================
// Output Config
// ============================================================================

/// CSV sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Destination file, appended to
    pub path: PathBuf,

    /// Write an `x,y` header when the file is empty
    pub write_header: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("solo_savage_kills.csv"),
            write_header: false,
        }
    }
}
