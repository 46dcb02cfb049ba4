//! Bounding box geometry.

use crate::config::ToolSettings;
use crate::model::{Handle, Point, Rect, Shape, clamp01, resize_rect};
use crate::persistence::WireGeometry;

use super::{AnnotationTool, DrawMode, ShapeKind};

/// A drag-drawn rectangle: the press point and the current pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectDraft {
    pub start: Point,
    pub current: Point,
}

impl RectDraft {
    pub fn new(start: Point) -> Self {
        Self {
            start,
            current: start,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_corners(self.start.clamped(), self.current.clamped())
    }

    /// The rectangle if both sides reach `min_size`.
    pub fn validated(&self, min_size: f32) -> Option<Rect> {
        let rect = self.rect();
        (rect.w >= min_size && rect.h >= min_size).then_some(rect)
    }
}

pub(crate) fn rect_handles(rect: &Rect) -> Vec<(Handle, Point)> {
    Handle::ALL_EDGES
        .iter()
        .filter_map(|&handle| handle.position_on(rect).map(|p| (handle, p)))
        .collect()
}

/// Clamp a decoded rectangle into the unit square, dropping empty ones.
pub(crate) fn clamp_rect(x: f32, y: f32, w: f32, h: f32) -> Option<Rect> {
    if !(x.is_finite() && y.is_finite() && w.is_finite() && h.is_finite()) {
        return None;
    }
    // Already inside the unit square: keep the stored values untouched.
    if w > 0.0 && h > 0.0 && x >= 0.0 && y >= 0.0 && x + w <= 1.0 && y + h <= 1.0 {
        return Some(Rect::new(x, y, w, h));
    }
    let left = clamp01(x.min(x + w));
    let top = clamp01(y.min(y + h));
    let right = clamp01(x.max(x + w));
    let bottom = clamp01(y.max(y + h));
    (right > left && bottom > top).then(|| Rect::new(left, top, right - left, bottom - top))
}

/// Axis-aligned bounding boxes.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxKind;

impl ShapeKind for BoxKind {
    type Geometry = Rect;
    type Draft = RectDraft;

    const TOOL: AnnotationTool = AnnotationTool::BoundingBox;
    const DRAW_MODE: DrawMode = DrawMode::Drag;

    fn begin_draft(start: Point, _shapes: &[Shape<Rect>], _settings: &ToolSettings) -> RectDraft {
        RectDraft::new(start)
    }

    fn extend_draft(draft: &mut RectDraft, point: Point) {
        draft.current = point;
    }

    fn finish_draft(draft: &RectDraft, settings: &ToolSettings) -> Option<Rect> {
        draft.validated(settings.box_min_size)
    }

    fn bounds(geometry: &Rect) -> Rect {
        *geometry
    }

    fn hit_test(geometry: &Rect, point: Point, _tolerance: f32) -> bool {
        geometry.contains(point)
    }

    fn translate(geometry: &Rect, dx: f32, dy: f32) -> Rect {
        geometry.translated(dx, dy)
    }

    fn handles(geometry: &Rect) -> Vec<(Handle, Point)> {
        rect_handles(geometry)
    }

    fn drag_handle(
        original: &Rect,
        handle: Handle,
        dx: f32,
        dy: f32,
        _pointer: Point,
        min_size: (f32, f32),
    ) -> Rect {
        resize_rect(original, handle, dx, dy, min_size.0, min_size.1)
    }

    fn encode(geometry: &Rect) -> WireGeometry {
        WireGeometry::Box {
            x: geometry.x,
            y: geometry.y,
            width: geometry.w,
            height: geometry.h,
        }
    }

    fn decode(geometry: &WireGeometry) -> Option<Rect> {
        match *geometry {
            WireGeometry::Box {
                x,
                y,
                width,
                height,
            } => clamp_rect(x, y, width, height),
            _ => None,
        }
    }
}
