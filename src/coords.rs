//! Viewport <-> normalized image coordinate mapping.
//!
//! Images are rendered "contain"-scaled and centred inside their container,
//! so a letterbox band may surround the drawn image. Pointer events arrive
//! in container pixels; shapes live in `[0, 1]` image space.

use crate::constants::FALLBACK_VIEW_SIZE_PX;
use crate::model::{Point, clamp01};

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// On-screen rectangle occupied by the rendered image, in container pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DrawRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl DrawRect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Convert a pixel distance into normalized units along each axis.
    pub fn px_to_normalized(&self, px: f32) -> (f32, f32) {
        let width = if self.width > 0.0 { self.width } else { FALLBACK_VIEW_SIZE_PX };
        let height = if self.height > 0.0 { self.height } else { FALLBACK_VIEW_SIZE_PX };
        (px / width, px / height)
    }
}

/// Pixel distance to normalized units, falling back to a nominal view size
/// when nothing has been rendered yet.
pub fn px_to_normalized(rect: Option<&DrawRect>, px: f32) -> (f32, f32) {
    match rect {
        Some(rect) => rect.px_to_normalized(px),
        None => (px / FALLBACK_VIEW_SIZE_PX, px / FALLBACK_VIEW_SIZE_PX),
    }
}

/// The rectangle a contain-scaled, centred image occupies in `container`.
///
/// When the intrinsic size is unknown (zero), the whole container is used.
pub fn compute_draw_rect(intrinsic: Size, container: Size) -> DrawRect {
    if intrinsic.is_empty() || container.is_empty() {
        return DrawRect::new(0.0, 0.0, container.width.max(0.0), container.height.max(0.0));
    }

    let scale = (container.width / intrinsic.width).min(container.height / intrinsic.height);
    let width = intrinsic.width * scale;
    let height = intrinsic.height * scale;
    DrawRect::new(
        (container.width - width) / 2.0,
        (container.height - height) / 2.0,
        width,
        height,
    )
}

/// Map a container-pixel point into normalized image space.
///
/// Returns `None` when the point falls outside the drawn image (e.g. on the
/// letterbox band); otherwise the result is clamped into `[0, 1]`.
pub fn to_normalized(point: Point, rect: &DrawRect) -> Option<Point> {
    if !(rect.width > 0.0 && rect.height > 0.0) {
        return None;
    }
    let inside = point.x >= rect.left
        && point.x <= rect.left + rect.width
        && point.y >= rect.top
        && point.y <= rect.top + rect.height;
    if !inside {
        return None;
    }
    Some(Point::new(
        clamp01((point.x - rect.left) / rect.width),
        clamp01((point.y - rect.top) / rect.height),
    ))
}

/// Like [`to_normalized`], but points outside the drawn image are pulled to
/// its nearest edge instead of rejected. Used while a gesture is in progress
/// so the pointer can leave the image without dropping the drag.
pub fn to_normalized_clamped(point: Point, rect: &DrawRect) -> Option<Point> {
    if !(rect.width > 0.0 && rect.height > 0.0) {
        return None;
    }
    Some(Point::new(
        clamp01((point.x - rect.left) / rect.width),
        clamp01((point.y - rect.top) / rect.height),
    ))
}

/// Map a normalized point back to container pixels.
pub fn to_viewport(point: Point, rect: &DrawRect) -> Point {
    Point::new(
        rect.left + point.x * rect.width,
        rect.top + point.y * rect.height,
    )
}
