//! Error types for the face occlusion overlay library.

use crate::detection::DetectorKind;
use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// Source or display dimensions cannot be mapped
    #[error("Geometry error: {0}")]
    Geometry(String),

    /// Face box clipped to the pixel buffer left nothing to capture
    #[error("Capture skipped: clipped region {width}x{height} is empty")]
    CaptureSkipped {
        /// Clipped width in pixels (may be negative)
        width: i32,
        /// Clipped height in pixels (may be negative)
        height: i32,
    },

    /// An external face or pose provider reported a failure
    #[error("{kind} detection failed: {message}")]
    Detection {
        /// Which provider failed
        kind: DetectorKind,
        /// Provider supplied description
        message: String,
    },

    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image encoding or buffer operation failed
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Replay scenario could not be loaded
    #[error("Scenario error: {0}")]
    Scenario(String),
}

impl Error {
    /// Build a detection failure for the given provider
    pub fn detection(kind: DetectorKind, message: impl Into<String>) -> Self {
        Self::Detection {
            kind,
            message: message.into(),
        }
    }
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
