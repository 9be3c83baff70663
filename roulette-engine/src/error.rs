//! Error types for roulette-engine.

use std::path::PathBuf;

/// Main error type for service operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Snapshot file I/O error.
    #[error("snapshot I/O error at {path}: {source}")]
    Persistence {
        /// Path to the snapshot file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Snapshot serialization or parsing error.
    #[error("snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Engine state error.
    #[error("engine error: {0}")]
    Engine(#[from] roulette_types::EngineError),
}

/// Result type alias for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;
