//! Error types for querylens

use thiserror::Error;

/// Result type alias for querylens operations
pub type Result<T> = std::result::Result<T, LensError>;

/// Crate error types
#[derive(Error, Debug)]
pub enum LensError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Render failed: {0}")]
    Render(String),

    #[error("{0}")]
    Message(String),
}
