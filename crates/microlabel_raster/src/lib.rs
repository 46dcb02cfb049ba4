//! Raster processing for the microlabel magic-wand tool.
//!
//! Converts a single seed click on an image into a small closed polygon:
//! the image is resampled onto a fixed-size working canvas, flood filled from
//! the seed colour, cleaned up with binary morphology and reduced to a
//! simplified convex hull.
//!
//! The crate knows nothing about shapes, undo history or persistence; it only
//! produces normalized `(x, y)` vertices in `[0, 1]`.

mod error;
mod extract;
mod flood;
mod hull;
mod mask;
mod raster;

pub use error::RasterError;
pub use extract::{ExtractorSettings, RegionExtractor};
pub use flood::flood_fill;
pub use hull::{convex_hull, simplify, subsample};
pub use mask::Mask;
pub use raster::WorkingRaster;
