//! Binary masks and 3x3 morphology.

use ndarray::{Array2, Zip, s};

/// A binary mask over the working raster, indexed as `[[y, x]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    cells: Array2<bool>,
}

impl Mask {
    /// Create an empty mask.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: Array2::from_elem((height, width), false),
        }
    }

    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Whether `(x, y)` is set. Out-of-range coordinates read as unset.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells.get((y, x)).copied().unwrap_or(false)
    }

    /// Set `(x, y)`. Out-of-range coordinates are ignored.
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if let Some(cell) = self.cells.get_mut((y, x)) {
            *cell = value;
        }
    }

    /// Number of set pixels.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// 3x3 dilation. The one-pixel border of the result is always unset.
    pub fn dilate(&self) -> Self {
        self.neighbourhood(|window| window.iter().any(|&cell| cell))
    }

    /// 3x3 erosion. The one-pixel border of the result is always unset.
    pub fn erode(&self) -> Self {
        self.neighbourhood(|window| window.iter().all(|&cell| cell))
    }

    /// Morphological close used by the magic wand: one dilation followed by
    /// two erosions.
    pub fn close(&self) -> Self {
        self.dilate().erode().erode()
    }

    /// Coordinates of all set pixels in row-major order.
    pub fn points(&self) -> Vec<(f32, f32)> {
        self.cells
            .indexed_iter()
            .filter(|(_, cell)| **cell)
            .map(|((y, x), _)| (x as f32, y as f32))
            .collect()
    }

    fn neighbourhood(&self, rule: impl Fn(ndarray::ArrayView2<'_, bool>) -> bool) -> Self {
        let (height, width) = self.cells.dim();
        let mut out = Self::new(width, height);
        if width < 3 || height < 3 {
            return out;
        }

        Zip::from(out.cells.slice_mut(s![1..height - 1, 1..width - 1]))
            .and(self.cells.windows((3, 3)))
            .for_each(|cell, window| *cell = rule(window));
        out
    }
}
