//! Configuration loading for roulette-engine.
//!
//! Configuration is loaded from a TOML file (default: `roulette.toml`).

use serde::Deserialize;
use std::path::PathBuf;

/// Root configuration for roulette-engine.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Matcher and waiting-pool configuration.
    pub matcher: MatcherConfig,
    /// Feedback ledger configuration.
    pub feedback: FeedbackConfig,
    /// Snapshot persistence configuration.
    pub persistence: PersistenceConfig,
}

/// Matcher and waiting-pool configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MatcherConfig {
    /// Matcher tick interval in seconds (default: 5).
    #[serde(default = "default_tick_interval")]
    pub tick_interval_secs: u64,
    /// Search timeout in seconds (default: 60).
    #[serde(default = "default_search_timeout")]
    pub search_timeout_secs: u64,
}

/// Feedback ledger configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackConfig {
    /// Report count at which a policy warning fires (default: 3).
    #[serde(default = "default_report_threshold")]
    pub report_threshold: u32,
}

/// Snapshot persistence configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PersistenceConfig {
    /// Path to the JSON snapshot file (default: roulette.json).
    #[serde(default = "default_snapshot_path")]
    pub path: PathBuf,
    /// Flush interval in seconds (default: 30).
    #[serde(default = "default_flush_interval")]
    pub flush_interval_secs: u64,
    /// Enable the periodic flush task (default: true).
    #[serde(default = "default_persistence_enabled")]
    pub enabled: bool,
}

// Default value functions
fn default_tick_interval() -> u64 {
    5
}

fn default_search_timeout() -> u64 {
    60
}

fn default_report_threshold() -> u32 {
    3
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("roulette.json")
}

fn default_flush_interval() -> u64 {
    30
}

fn default_persistence_enabled() -> bool {
    true
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: default_tick_interval(),
            search_timeout_secs: default_search_timeout(),
        }
    }
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            report_threshold: default_report_threshold(),
        }
    }
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            path: default_snapshot_path(),
            flush_interval_secs: default_flush_interval(),
            enabled: default_persistence_enabled(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Search timeout in milliseconds (the unit the engine core uses).
    pub fn search_timeout_ms(&self) -> u64 {
        self.matcher.search_timeout_secs * 1_000
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Failed to parse configuration file.
    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: toml::de::Error,
    },
}
