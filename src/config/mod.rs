//! Configuration module for streamable-rs
//!
//! Pipelines are built in code, so configuration only covers how concurrent
//! groups are executed:
//! - Worker limit (unbounded by default, one thread per unit)
//! - Worker thread naming and stack size
//!
//! # Files
//!
//! `StreamConfig` can be stored as JSON (`.json`) or TOML (`.toml`); the
//! format is chosen from the file extension.
//!
//! # Example
//!
//! ```ignore
//! use streamable_rs::config::StreamConfig;
//! use streamable_rs::{concurrent_with, Producer};
//!
//! let config = StreamConfig::load_or_default("streamable.toml");
//! let group = concurrent_with([Producer::value(1)], config.concurrency.clone());
//! ```

use crate::error::{Result, ResultExt, StreamError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::thread;

/// Default prefix for concurrent worker thread names
pub const DEFAULT_THREAD_NAME_PREFIX: &str = "streamable";

/// Current config file version
pub const CONFIG_VERSION: u32 = 1;

// ==================== Concurrency ====================

/// How a `ConcurrentGroup` schedules its units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcurrencyConfig {
    /// Maximum number of worker threads per group evaluation.
    /// `None` spawns one thread per unit.
    pub max_threads: Option<usize>,

    /// Worker threads are named `<prefix>-<index>`
    pub thread_name_prefix: String,

    /// Stack size for worker threads in bytes (platform default if unset)
    pub stack_size: Option<usize>,
}

impl Default for ConcurrencyConfig {
    fn default() -> Self {
        Self {
            max_threads: None,
            thread_name_prefix: DEFAULT_THREAD_NAME_PREFIX.to_string(),
            stack_size: None,
        }
    }
}

impl ConcurrencyConfig {
    /// Config with a fixed worker limit.
    pub fn bounded(max_threads: usize) -> Self {
        Self {
            max_threads: Some(max_threads),
            ..Self::default()
        }
    }

    /// Number of threads to start for `units` units of work.
    pub fn worker_count(&self, units: usize) -> usize {
        match self.max_threads {
            Some(limit) => limit.clamp(1, units.max(1)),
            None => units,
        }
    }

    /// Thread builder for worker `index`.
    pub fn thread_builder(&self, index: usize) -> thread::Builder {
        let builder = thread::Builder::new().name(format!("{}-{}", self.thread_name_prefix, index));
        match self.stack_size {
            Some(size) => builder.stack_size(size),
            None => builder,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_threads == Some(0) {
            return Err(StreamError::Config(
                "max_threads must be at least 1".to_string(),
            ));
        }
        if self.thread_name_prefix.is_empty() {
            return Err(StreamError::Config(
                "thread_name_prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

// ==================== Stream Config ====================

/// Top-level configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Version for future migration support
    #[serde(default = "default_config_version")]
    pub version: u32,

    /// Concurrent group execution settings
    #[serde(default)]
    pub concurrency: ConcurrencyConfig,
}

fn default_config_version() -> u32 {
    CONFIG_VERSION
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            concurrency: ConcurrencyConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(ConfigFormat::Json),
            Some("toml") => Ok(ConfigFormat::Toml),
            other => Err(StreamError::Config(format!(
                "Unsupported config file extension {:?} for {:?}",
                other, path
            ))),
        }
    }
}

impl StreamConfig {
    /// Parse a JSON config document
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)
            .map_err(|e| StreamError::Config(format!("Failed to parse JSON config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| StreamError::Config(format!("Failed to parse TOML config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(StreamError::from)
            .with_context(|| format!("Failed to read config file {:?}", path))?;

        match format {
            ConfigFormat::Json => Self::from_json_str(&content),
            ConfigFormat::Toml => Self::from_toml_str(&content),
        }
    }

    /// Load a config file, returning defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load stream config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save config file to disk
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(StreamError::from)
                    .with_context(|| format!("Failed to create config directory {:?}", parent))?;
            }
        }

        let content = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)
                .map_err(|e| StreamError::Config(format!("Failed to serialize config: {}", e)))?,
            ConfigFormat::Toml => toml::to_string_pretty(self)
                .map_err(|e| StreamError::Config(format!("Failed to serialize config: {}", e)))?,
        };

        std::fs::write(path, content)
            .map_err(StreamError::from)
            .with_context(|| format!("Failed to write config file {:?}", path))
    }

    pub fn validate(&self) -> Result<()> {
        self.concurrency.validate()
    }
}
