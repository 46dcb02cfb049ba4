//! Magic-wand regions: simplified hull polygons created by a single click.

use crate::config::ToolSettings;
use crate::constants::MIN_POLYGON_VERTICES;
use crate::model::{Handle, Point, Rect, Shape, bounds_of, polygon_contains};
use crate::persistence::WireGeometry;

use super::{
    AnnotationTool, DrawMode, ShapeKind, drag_vertex, points_from_wire, points_to_wire,
    translate_points, vertex_handles,
};

/// Region polygons. There is no draft: the extractor produces finished
/// geometry.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionKind;

impl ShapeKind for RegionKind {
    type Geometry = Vec<Point>;
    type Draft = ();

    const TOOL: AnnotationTool = AnnotationTool::MagicWand;
    const DRAW_MODE: DrawMode = DrawMode::Instant;

    fn begin_draft(_start: Point, _shapes: &[Shape<Vec<Point>>], _settings: &ToolSettings) {}

    fn extend_draft(_draft: &mut (), _point: Point) {}

    fn finish_draft(_draft: &(), _settings: &ToolSettings) -> Option<Vec<Point>> {
        None
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
        WireGeometry::Mask {
            mask_path: points_to_wire(geometry),
        }
    }

    fn decode(geometry: &WireGeometry) -> Option<Vec<Point>> {
        match geometry {
            WireGeometry::Mask { mask_path } if mask_path.len() >= MIN_POLYGON_VERTICES => {
                Some(points_from_wire(mask_path))
            }
            _ => None,
        }
    }
}
