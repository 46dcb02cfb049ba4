//! Error types for raster preparation.

use thiserror::Error;

/// Errors that can occur while preparing a working raster.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RasterError {
    /// The source image has no pixels.
    #[error("Image is empty ({width}x{height})")]
    EmptyImage {
        /// Source width in pixels
        width: u32,
        /// Source height in pixels
        height: u32,
    },

    /// The requested working resolution cannot hold a 3x3 neighbourhood.
    #[error("Invalid working size {0}: must be at least 3 pixels")]
    InvalidWorkingSize(u32),
}
