//! Error types

use thiserror::Error;

/// Result type alias using ChangelogError
pub type Result<T> = std::result::Result<T, ChangelogError>;

/// Errors raised around the renderer. Rendering itself never fails.
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// Render options could not be parsed
    #[error("invalid render options: {0}")]
    Config(#[from] toml::de::Error),

    /// Release list could not be parsed
    #[error("invalid release list: {0}")]
    InvalidInput(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
