//! Error types for the Diorama engine
//!
//! Construction-time failures (bad configuration, missing assets, wrong
//! flipbook pool size) and renderer failures. The per-frame controller has no
//! numeric error surface: degenerate input renders wrong, it never errors.

use std::fmt;

/// Result type for Diorama engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Diorama engine errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration rejected at construction (fps, particle count, limits...)
    InvalidConfig(String),

    /// The geometry loader could not resolve an asset identifier
    AssetNotFound(String),

    /// The flipbook pool does not have the fixed number of frames
    FrameCountMismatch {
        /// Required pool size
        expected: usize,
        /// Number of frames supplied
        actual: usize,
    },

    /// Scene construction failed for another reason
    InitializationFailed(String),

    /// Renderer-specific error
    BackendError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::AssetNotFound(name) => write!(f, "Asset not found: {}", name),
            Error::FrameCountMismatch { expected, actual } => write!(
                f,
                "Flipbook frame count mismatch: expected {}, got {}",
                expected, actual
            ),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
