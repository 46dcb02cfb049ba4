//! Pencil strokes.

use crate::config::ToolSettings;
use crate::constants::MIN_STROKE_POINTS;
use crate::model::{
    Handle, Point, Rect, Shape, ShapeId, bounds_of, distance_to_segment, polygon_contains,
};
use crate::persistence::WireGeometry;

use super::{AnnotationTool, DrawMode, ShapeKind, points_from_wire, points_to_wire, translate_points};

/// A pencil stroke. Closed strokes are treated as outlines.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub points: Vec<Point>,
    pub closed: bool,
}

impl Stroke {
    fn near_path(&self, point: Point, tolerance: f32) -> bool {
        match self.points.as_slice() {
            [] => false,
            [only] => only.distance_to(point) <= tolerance,
            points => points
                .windows(2)
                .any(|pair| distance_to_segment(point, pair[0], pair[1]) <= tolerance),
        }
    }
}

/// The stroke being drawn. When `continues` is set, committing replaces
/// that stroke instead of adding a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDraft {
    pub points: Vec<Point>,
    pub continues: Option<ShapeId>,
}

fn continuable<'a>(
    shapes: &'a [Shape<Stroke>],
    point: Point,
    settings: &ToolSettings,
) -> Option<&'a Shape<Stroke>> {
    let latest = shapes.last().filter(|shape| !shape.geometry.closed)?;
    let last = latest.geometry.points.last()?;
    (last.distance_to(point) < settings.freehand_continue_threshold).then_some(latest)
}

/// Freehand pencil strokes.
#[derive(Debug, Clone, Copy, Default)]
pub struct FreehandKind;

impl ShapeKind for FreehandKind {
    type Geometry = Stroke;
    type Draft = StrokeDraft;

    const TOOL: AnnotationTool = AnnotationTool::Freehand;
    const DRAW_MODE: DrawMode = DrawMode::Drag;

    fn begin_draft(start: Point, shapes: &[Shape<Stroke>], settings: &ToolSettings) -> StrokeDraft {
        match continuable(shapes, start, settings) {
            Some(shape) => {
                log::debug!("Freehand: continuing stroke {}", shape.id);
                let mut points = shape.geometry.points.clone();
                points.push(start.clamped());
                StrokeDraft {
                    points,
                    continues: Some(shape.id.clone()),
                }
            }
            None => StrokeDraft {
                points: vec![start.clamped()],
                continues: None,
            },
        }
    }

    fn extend_draft(draft: &mut StrokeDraft, point: Point) {
        let point = point.clamped();
        if draft.points.last() != Some(&point) {
            draft.points.push(point);
        }
    }

    fn finish_draft(draft: &StrokeDraft, settings: &ToolSettings) -> Option<Stroke> {
        if draft.points.len() < MIN_STROKE_POINTS {
            return None;
        }
        let closed = match (draft.points.first(), draft.points.last()) {
            (Some(first), Some(last)) if draft.points.len() > 2 => {
                first.distance_to(*last) < settings.freehand_close_threshold
            }
            _ => false,
        };
        Some(Stroke {
            points: draft.points.clone(),
            closed,
        })
    }

    fn continues_at(shapes: &[Shape<Stroke>], point: Point, settings: &ToolSettings) -> bool {
        continuable(shapes, point, settings).is_some()
    }

    fn continued_shape(draft: &StrokeDraft) -> Option<&ShapeId> {
        draft.continues.as_ref()
    }

    fn bounds(geometry: &Stroke) -> Rect {
        bounds_of(&geometry.points).unwrap_or_default()
    }

    fn hit_test(geometry: &Stroke, point: Point, tolerance: f32) -> bool {
        geometry.near_path(point, tolerance)
            || (geometry.closed && polygon_contains(&geometry.points, point))
    }

    fn translate(geometry: &Stroke, dx: f32, dy: f32) -> Stroke {
        Stroke {
            points: translate_points(&geometry.points, dx, dy),
            closed: geometry.closed,
        }
    }

    fn handles(_geometry: &Stroke) -> Vec<(Handle, Point)> {
        Vec::new()
    }

    fn drag_handle(
        original: &Stroke,
        _handle: Handle,
        _dx: f32,
        _dy: f32,
        _pointer: Point,
        _min_size: (f32, f32),
    ) -> Stroke {
        original.clone()
    }

    fn encode(geometry: &Stroke) -> WireGeometry {
        WireGeometry::Freehand {
            path: points_to_wire(&geometry.points),
        }
    }

    /// Reloaded strokes are always treated as closed outlines; the wire
    /// format carries no open/closed flag.
    fn decode(geometry: &WireGeometry) -> Option<Stroke> {
        match geometry {
            WireGeometry::Freehand { path } if path.len() >= MIN_STROKE_POINTS => Some(Stroke {
                points: points_from_wire(path),
                closed: true,
            }),
            _ => None,
        }
    }
}
