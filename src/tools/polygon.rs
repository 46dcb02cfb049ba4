//! Polygon geometry.

use crate::config::ToolSettings;
use crate::constants::MIN_POLYGON_VERTICES;
use crate::model::{Handle, Point, Rect, Shape, bounds_of, polygon_contains};
use crate::persistence::WireGeometry;

use super::{
    AnnotationTool, DrawMode, ShapeKind, drag_vertex, points_from_wire, points_to_wire,
    translate_points, vertex_handles,
};

/// Click-to-add-vertex polygons.
///
/// The draft is the list of vertices placed so far; each placement is an
/// undo step. Clicking near the first vertex (with at least three placed)
/// or finishing explicitly commits it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolygonKind;

impl ShapeKind for PolygonKind {
    type Geometry = Vec<Point>;
    type Draft = Vec<Point>;

    const TOOL: AnnotationTool = AnnotationTool::Polygon;
    const DRAW_MODE: DrawMode = DrawMode::Click;
    const DRAFT_IN_HISTORY: bool = true;

    fn begin_draft(start: Point, _shapes: &[Shape<Vec<Point>>], _settings: &ToolSettings) -> Vec<Point> {
        vec![start.clamped()]
    }

    fn extend_draft(draft: &mut Vec<Point>, point: Point) {
        draft.push(point.clamped());
    }

    fn finish_draft(draft: &Vec<Point>, _settings: &ToolSettings) -> Option<Vec<Point>> {
        (draft.len() >= MIN_POLYGON_VERTICES).then(|| draft.clone())
    }

    fn closes_draft(draft: &Vec<Point>, point: Point, settings: &ToolSettings) -> bool {
        draft.len() >= MIN_POLYGON_VERTICES
            && draft
                .first()
                .is_some_and(|first| first.distance_to(point) < settings.polygon_close_threshold)
    }

    fn bounds(geometry: &Vec<Point>) -> Rect {
        bounds_of(geometry).unwrap_or_default()
    }

    fn hit_test(geometry: &Vec<Point>, point: Point, _tolerance: f32) -> bool {
        polygon_contains(geometry, point)
    }

    fn translate(geometry: &Vec<Point>, dx: f32, dy: f32) -> Vec<Point> {
        translate_points(geometry, dx, dy)
    }

    fn handles(geometry: &Vec<Point>) -> Vec<(Handle, Point)> {
        vertex_handles(geometry)
    }

    fn drag_handle(
        original: &Vec<Point>,
        handle: Handle,
        _dx: f32,
        _dy: f32,
        pointer: Point,
        _min_size: (f32, f32),
    ) -> Vec<Point> {
        drag_vertex(original, handle, pointer)
    }

    fn encode(geometry: &Vec<Point>) -> WireGeometry {
        WireGeometry::Polygon {
            points: points_to_wire(geometry),
        }
    }

    fn decode(geometry: &WireGeometry) -> Option<Vec<Point>> {
        match geometry {
            WireGeometry::Polygon { points } if points.len() >= MIN_POLYGON_VERTICES => {
                Some(points_from_wire(points))
            }
            _ => None,
        }
    }
}
