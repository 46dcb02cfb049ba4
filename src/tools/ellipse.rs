//! Ellipse geometry, stored as its axis-aligned bounding rectangle.
//!
//! Centre and radii only appear on the wire.

use crate::config::ToolSettings;
use crate::model::{Handle, Point, Rect, Shape, resize_rect};
use crate::persistence::WireGeometry;

use super::bbox::{RectDraft, clamp_rect, rect_handles};
use super::{AnnotationTool, DrawMode, ShapeKind};

/// Axis-aligned ellipses.
#[derive(Debug, Clone, Copy, Default)]
pub struct EllipseKind;

impl ShapeKind for EllipseKind {
    type Geometry = Rect;
    type Draft = RectDraft;

    const TOOL: AnnotationTool = AnnotationTool::Ellipse;
    const DRAW_MODE: DrawMode = DrawMode::Drag;

    fn begin_draft(start: Point, _shapes: &[Shape<Rect>], _settings: &ToolSettings) -> RectDraft {
        RectDraft::new(start)
    }

    fn extend_draft(draft: &mut RectDraft, point: Point) {
        draft.current = point;
    }

    fn finish_draft(draft: &RectDraft, settings: &ToolSettings) -> Option<Rect> {
        draft.validated(settings.ellipse_min_size)
    }

    fn bounds(geometry: &Rect) -> Rect {
        *geometry
    }

    fn hit_test(geometry: &Rect, point: Point, _tolerance: f32) -> bool {
        let (rx, ry) = (geometry.w / 2.0, geometry.h / 2.0);
        if rx <= 0.0 || ry <= 0.0 {
            return false;
        }
        let c = geometry.center();
        let nx = (point.x - c.x) / rx;
        let ny = (point.y - c.y) / ry;
        nx * nx + ny * ny <= 1.0
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
        let c = geometry.center();
        WireGeometry::Ellipse {
            cx: c.x,
            cy: c.y,
            rx: geometry.w / 2.0,
            ry: geometry.h / 2.0,
        }
    }

    fn decode(geometry: &WireGeometry) -> Option<Rect> {
        match *geometry {
            WireGeometry::Ellipse { cx, cy, rx, ry } => {
                let (rx, ry) = (rx.abs(), ry.abs());
                clamp_rect(cx - rx, cy - ry, rx * 2.0, ry * 2.0)
            }
            _ => None,
        }
    }
}
