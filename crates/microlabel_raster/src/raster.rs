//! Working raster: the downsampled, slightly blurred copy of an image that
//! the flood fill runs on.

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};

use crate::error::RasterError;

/// Fixed-resolution RGBA canvas used for region extraction.
///
/// Extraction cost depends only on the working resolution, never on the
/// native image size.
#[derive(Debug, Clone)]
pub struct WorkingRaster {
    pixels: RgbaImage,
}

impl WorkingRaster {
    /// Resample `image` onto a `size`x`size` canvas and apply a gaussian
    /// blur with the given sigma (skipped when `blur_sigma <= 0`).
    pub fn prepare(image: &DynamicImage, size: u32, blur_sigma: f32) -> Result<Self, RasterError> {
        if size < 3 {
            return Err(RasterError::InvalidWorkingSize(size));
        }
        if image.width() == 0 || image.height() == 0 {
            return Err(RasterError::EmptyImage {
                width: image.width(),
                height: image.height(),
            });
        }

        let rgba = image.to_rgba8();
        let resized = imageops::resize(&rgba, size, size, FilterType::Triangle);
        let pixels = if blur_sigma > 0.0 {
            imageops::blur(&resized, blur_sigma)
        } else {
            resized
        };

        log::debug!(
            "Prepared working raster {}x{} from {}x{} (blur {:.1})",
            size,
            size,
            image.width(),
            image.height(),
            blur_sigma
        );

        Ok(Self { pixels })
    }

    /// Use an already rasterized canvas as-is.
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// RGB channels of the pixel at `(x, y)`.
    pub fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        let Rgba([r, g, b, _]) = *self.pixels.get_pixel(x, y);
        [r, g, b]
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_resamples_to_working_size() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(40, 20, Rgba([10, 20, 30, 255])));
        let raster = WorkingRaster::prepare(&image, 16, 1.2).unwrap();
        assert_eq!(raster.width(), 16);
        assert_eq!(raster.height(), 16);
        // A uniform image stays (nearly) uniform through resize and blur.
        let [r, g, b] = raster.rgb(8, 8);
        assert!(r.abs_diff(10) <= 1 && g.abs_diff(20) <= 1 && b.abs_diff(30) <= 1);
    }

    #[test]
    fn test_prepare_rejects_tiny_working_size() {
        let image = DynamicImage::ImageRgba8(RgbaImage::new(4, 4));
        assert_eq!(
            WorkingRaster::prepare(&image, 2, 0.0).unwrap_err(),
            RasterError::InvalidWorkingSize(2)
        );
    }

    #[test]
    fn test_prepare_rejects_empty_image() {
        let image = DynamicImage::ImageRgba8(RgbaImage::new(0, 0));
        assert!(matches!(
            WorkingRaster::prepare(&image, 8, 0.0),
            Err(RasterError::EmptyImage { .. })
        ));
    }
}
