//! Platform error types

use thiserror::Error;

use crate::platform::ViewId;

/// Platform-related errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlatformError {
    /// The view handle does not belong to this host (never created or destroyed)
    #[error("Unknown view: {0:?}")]
    UnknownView(ViewId),

    /// The requested attach would make the view tree cyclic
    #[error("Invalid view hierarchy: {0}")]
    InvalidHierarchy(String),

    /// Platform capability not available
    #[error("Platform not available: {0}")]
    Unavailable(String),

    /// Generic platform error
    #[error("Platform error: {0}")]
    Other(String),
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
