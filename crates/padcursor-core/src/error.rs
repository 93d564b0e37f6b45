//! Controller error types

use std::path::PathBuf;

use thiserror::Error;

/// Controller error type
///
/// Every variant is a setup problem. The per-frame update never fails: a
/// frame with no hit or no scrollable ancestor simply does less work.
#[derive(Debug, Error)]
pub enum CursorError {
    /// Overlay layer absent and auto-create disabled
    #[error("overlay layer not found: {0}")]
    MissingOverlay(String),

    /// Configuration values out of range
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Config file could not be read
    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result alias for controller setup operations
pub type Result<T> = std::result::Result<T, CursorError>;
