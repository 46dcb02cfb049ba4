//! Error types for annotation persistence.

use thiserror::Error;

/// Errors that can occur while fetching or saving annotations.
#[derive(Error, Debug)]
pub enum PersistError {
    /// I/O error in a file-backed store
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The annotation service rejected the request
    #[error("Annotation service returned {status}: {message}")]
    Backend {
        /// Status code reported by the service
        status: u16,
        /// Message reported by the service
        message: String,
    },

    /// Save requested with no active image
    #[error("No active image to save annotations for")]
    NoActiveImage,
}

impl PersistError {
    /// Create a backend rejection error.
    pub fn backend(status: u16, message: impl Into<String>) -> Self {
        Self::Backend {
            status,
            message: message.into(),
        }
    }
}
