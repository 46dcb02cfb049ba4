//! Seed click to simplified region polygon.

use web_time::Instant;

use crate::flood::flood_fill;
use crate::hull::{convex_hull, simplify, subsample};
use crate::mask::Mask;
use crate::raster::WorkingRaster;

/// Flood fill tolerance per unit of sensitivity.
const TOLERANCE_PER_SENSITIVITY: u32 = 6;

/// Tunables for [`RegionExtractor`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractorSettings {
    /// Side length of the square working raster.
    pub working_size: u32,
    /// Gaussian sigma applied after resampling.
    pub blur_sigma: f32,
    /// Douglas-Peucker epsilon in working-raster pixels.
    pub simplify_epsilon: f32,
    /// Vertex cap; longer outlines are uniformly subsampled.
    pub max_vertices: usize,
    /// Masks with fewer pixels than this produce no region.
    pub min_mask_pixels: usize,
}

impl Default for ExtractorSettings {
    fn default() -> Self {
        Self {
            working_size: 512,
            blur_sigma: 1.2,
            simplify_epsilon: 6.5,
            max_vertices: 18,
            min_mask_pixels: 5,
        }
    }
}

/// Turns a seed point on a [`WorkingRaster`] into a normalized polygon.
#[derive(Debug, Clone, Default)]
pub struct RegionExtractor {
    settings: ExtractorSettings,
}

impl RegionExtractor {
    pub fn new(settings: ExtractorSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ExtractorSettings {
        &self.settings
    }

    /// Extract the region around `seed` (normalized image coordinates).
    ///
    /// Returns `None` when the cleaned-up mask is too small to form a region.
    pub fn extract(
        &self,
        raster: &WorkingRaster,
        seed: (f32, f32),
        sensitivity: u32,
    ) -> Option<Vec<(f32, f32)>> {
        let started = Instant::now();
        let (width, height) = (raster.width(), raster.height());
        if width == 0 || height == 0 {
            return None;
        }

        let sx = ((seed.0.clamp(0.0, 1.0) * width as f32).floor() as u32).min(width - 1);
        let sy = ((seed.1.clamp(0.0, 1.0) * height as f32).floor() as u32).min(height - 1);
        let tolerance = sensitivity.saturating_mul(TOLERANCE_PER_SENSITIVITY);

        let mask = flood_fill(raster, (sx, sy), tolerance);
        let cleaned = mask.dilate().dilate().close();
        let polygon = self.mask_to_polygon(&cleaned);

        match &polygon {
            Some(vertices) => log::debug!(
                "Magic wand at ({}, {}) filled {} px -> {} vertices in {:?}",
                sx,
                sy,
                mask.count(),
                vertices.len(),
                started.elapsed()
            ),
            None => log::debug!(
                "Magic wand at ({}, {}) produced no region ({} px filled)",
                sx,
                sy,
                mask.count()
            ),
        }

        polygon.map(|vertices| {
            vertices
                .into_iter()
                .map(|(x, y)| {
                    (
                        (x / width as f32).clamp(0.0, 1.0),
                        (y / height as f32).clamp(0.0, 1.0),
                    )
                })
                .collect()
        })
    }

    /// Reduce a mask to its simplified hull, in mask pixel coordinates.
    pub fn mask_to_polygon(&self, mask: &Mask) -> Option<Vec<(f32, f32)>> {
        if mask.count() < self.settings.min_mask_pixels {
            return None;
        }
        let hull = convex_hull(&mask.points());
        let simplified = simplify(&hull, self.settings.simplify_epsilon);
        let reduced = subsample(&simplified, self.settings.max_vertices);
        (reduced.len() >= 3).then_some(reduced)
    }
}
