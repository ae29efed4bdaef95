//! Error types for voicegate

use thiserror::Error;

/// Result type alias for voicegate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in voicegate
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Synthesis engine error
    #[error("engine error: {0}")]
    Engine(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}
