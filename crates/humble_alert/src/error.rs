//! Error types for humble_alert

use humble_platform::PlatformError;
use thiserror::Error;

/// Errors that can occur while presenting an alert or loading its configuration
#[derive(Error, Debug)]
pub enum AlertError {
    /// No container resolved for `show()` (no root screen)
    #[error("No container available to present the alert")]
    NoContainer,

    /// Host rejected a view operation
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    /// Configuration file is not valid TOML for `AlertConfig`
    #[error("Invalid alert configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration file could not be read
    #[error("Failed to read alert configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for humble_alert operations
pub type Result<T> = std::result::Result<T, AlertError>;
