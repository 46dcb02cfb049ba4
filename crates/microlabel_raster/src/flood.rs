//! Colour-tolerance flood fill.

use std::collections::VecDeque;

use crate::mask::Mask;
use crate::raster::WorkingRaster;

const NEIGHBOURS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

fn colour_distance(a: [u8; 3], b: [u8; 3]) -> u32 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| u32::from(x.abs_diff(y)))
        .sum()
}

/// 8-connected breadth-first fill from `seed`.
///
/// A pixel joins the region when the sum of absolute RGB differences from the
/// seed colour is strictly below `tolerance`. Seeds outside the raster
/// produce an empty mask.
pub fn flood_fill(raster: &WorkingRaster, seed: (u32, u32), tolerance: u32) -> Mask {
    let (width, height) = (raster.width(), raster.height());
    let mut mask = Mask::new(width as usize, height as usize);
    let (sx, sy) = seed;
    if sx >= width || sy >= height {
        return mask;
    }

    let seed_colour = raster.rgb(sx, sy);
    let mut visited = Mask::new(width as usize, height as usize);
    let mut queue = VecDeque::new();
    visited.set(sx as usize, sy as usize, true);
    queue.push_back((sx, sy));

    while let Some((x, y)) = queue.pop_front() {
        if colour_distance(raster.rgb(x, y), seed_colour) >= tolerance {
            continue;
        }
        mask.set(x as usize, y as usize, true);

        for (dx, dy) in NEIGHBOURS {
            let nx = i64::from(x) + dx;
            let ny = i64::from(y) + dy;
            if nx < 0 || ny < 0 || nx >= i64::from(width) || ny >= i64::from(height) {
                continue;
            }
            let (nx, ny) = (nx as u32, ny as u32);
            if visited.get(nx as usize, ny as usize) {
                continue;
            }
            visited.set(nx as usize, ny as usize, true);
            queue.push_back((nx, ny));
        }
    }

    mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn two_tone(size: u32, split: u32) -> WorkingRaster {
        let pixels = RgbaImage::from_fn(size, size, |x, _| {
            if x < split {
                Rgba([200, 40, 40, 255])
            } else {
                Rgba([20, 20, 220, 255])
            }
        });
        WorkingRaster::from_rgba(pixels)
    }

    #[test]
    fn test_fill_stops_at_colour_edge() {
        let raster = two_tone(10, 4);
        let mask = flood_fill(&raster, (1, 1), 30);
        assert_eq!(mask.count(), 40);
        assert!(mask.get(3, 9));
        assert!(!mask.get(4, 0));
    }

    #[test]
    fn test_fill_is_eight_connected() {
        // Diagonal staircase of seed-coloured pixels on a dark background.
        let pixels = RgbaImage::from_fn(5, 5, |x, y| {
            if x == y {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 255])
            }
        });
        let raster = WorkingRaster::from_rgba(pixels);
        let mask = flood_fill(&raster, (0, 0), 10);
        assert_eq!(mask.count(), 5);
        assert!(mask.get(4, 4));
    }

    #[test]
    fn test_zero_tolerance_selects_nothing() {
        let raster = two_tone(6, 3);
        assert_eq!(flood_fill(&raster, (0, 0), 0).count(), 0);
    }

    #[test]
    fn test_seed_outside_raster() {
        let raster = two_tone(6, 3);
        assert_eq!(flood_fill(&raster, (6, 0), 30).count(), 0);
    }
}
