//! Shape editing tools.
//!
//! One generic engine, [`ShapeTool`], implements drawing, selection, moving,
//! resizing, deletion and undo/redo. Each annotation tool plugs its geometry
//! into the engine through a [`ShapeKind`]:
//!
//! | Tool        | Kind             | Geometry            | Drawing                 |
//! |-------------|------------------|---------------------|-------------------------|
//! | Box         | [`BoxKind`]      | [`Rect`]            | drag                    |
//! | Ellipse     | [`EllipseKind`]  | [`Rect`] (bounds)   | drag                    |
//! | Polygon     | [`PolygonKind`]  | vertices            | click per vertex        |
//! | Pencil      | [`FreehandKind`] | [`Stroke`]          | drag                    |
//! | Magic wand  | [`RegionKind`]   | hull vertices       | single click (extract)  |

mod bbox;
mod editor;
mod ellipse;
mod engine;
mod freehand;
mod magic_wand;
mod polygon;
mod region;
mod toolbox;

use std::fmt;

use crate::config::ToolSettings;
use crate::model::{Handle, Point, Rect, Shape, ShapeId};
use crate::persistence::WireGeometry;

pub use crate::model::AnnotationTool;
pub use bbox::{BoxKind, RectDraft};
pub use editor::EditorTool;
pub use ellipse::EllipseKind;
pub use engine::ShapeTool;
pub use freehand::{FreehandKind, Stroke, StrokeDraft};
pub use magic_wand::MagicWandTool;
pub use polygon::PolygonKind;
pub use region::RegionKind;
pub use toolbox::Toolbox;

/// Bounding box editor.
pub type BoxTool = ShapeTool<BoxKind>;
/// Polygon editor.
pub type PolygonTool = ShapeTool<PolygonKind>;
/// Ellipse editor.
pub type EllipseTool = ShapeTool<EllipseKind>;
/// Pencil editor.
pub type FreehandTool = ShapeTool<FreehandKind>;

/// How a tool creates new shapes from pointer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    /// Press, drag, release.
    Drag,
    /// One click per vertex; closes near the first vertex or on finish.
    Click,
    /// A single click hands the point to the caller (magic wand).
    Instant,
}

/// Everything the history tracks for one tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolState<G, D> {
    pub shapes: Vec<Shape<G>>,
    pub draft: Option<D>,
}

impl<G, D> Default for ToolState<G, D> {
    fn default() -> Self {
        Self {
            shapes: Vec::new(),
            draft: None,
        }
    }
}

impl<G, D> ToolState<G, D> {
    pub fn with_shapes(shapes: Vec<Shape<G>>) -> Self {
        Self {
            shapes,
            draft: None,
        }
    }

    pub fn find(&self, id: &ShapeId) -> Option<&Shape<G>> {
        self.shapes.iter().find(|shape| &shape.id == id)
    }

    pub fn find_mut(&mut self, id: &ShapeId) -> Option<&mut Shape<G>> {
        self.shapes.iter_mut().find(|shape| &shape.id == id)
    }
}

/// What part of a shape a drag session moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    Body,
    Handle(Handle),
}

/// An in-progress move or resize.
///
/// Created on pointer-down over the selected shape; becomes active (and
/// takes its single history snapshot) once the pointer has travelled far
/// enough; released on pointer-up, pointer-cancel, undo/redo or teardown.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession<G> {
    pub shape_id: ShapeId,
    pub target: DragTarget,
    /// Pointer position at press time
    pub origin: Point,
    /// Geometry at press time
    pub original: G,
    /// Whether the drag has moved past the start threshold
    pub started: bool,
}

/// Result of a pointer-down, for the host UI.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerOutcome {
    /// Nothing happened.
    Ignored,
    /// A shape body was hit and selected.
    Selected(ShapeId),
    /// A resize handle of the selected shape was grabbed.
    HandleGrabbed(Handle),
    /// A drag-drawn draft was started.
    DraftStarted,
    /// A polygon vertex was placed.
    VertexAdded,
    /// A draft was promoted to a shape.
    Committed(ShapeId),
    /// A draft was finished but failed validation.
    Discarded,
    /// Instant tools: the point at which to run the tool's action.
    Seed(Point),
}

/// Geometry behaviour plugged into [`ShapeTool`].
pub trait ShapeKind {
    type Geometry: Clone + fmt::Debug + PartialEq;
    type Draft: Clone + fmt::Debug + PartialEq;

    const TOOL: AnnotationTool;
    const DRAW_MODE: DrawMode;
    /// Whether the draft is part of undo snapshots (polygon vertices are
    /// individually undoable; drag drafts are not).
    const DRAFT_IN_HISTORY: bool = false;

    fn begin_draft(
        start: Point,
        shapes: &[Shape<Self::Geometry>],
        settings: &ToolSettings,
    ) -> Self::Draft;

    fn extend_draft(draft: &mut Self::Draft, point: Point);

    /// Validate a draft. `None` means it is too small or too short.
    fn finish_draft(draft: &Self::Draft, settings: &ToolSettings) -> Option<Self::Geometry>;

    /// Whether a press at `point` continues an existing shape rather than
    /// selecting one.
    fn continues_at(
        _shapes: &[Shape<Self::Geometry>],
        _point: Point,
        _settings: &ToolSettings,
    ) -> bool {
        false
    }

    /// The shape a draft will replace when committed, if any.
    fn continued_shape(_draft: &Self::Draft) -> Option<&ShapeId> {
        None
    }

    /// Whether a click at `point` finishes a click-mode draft.
    fn closes_draft(_draft: &Self::Draft, _point: Point, _settings: &ToolSettings) -> bool {
        false
    }

    fn bounds(geometry: &Self::Geometry) -> Rect;

    /// Body hit test. `tolerance` is in normalized units and applies to
    /// thin geometry such as open strokes.
    fn hit_test(geometry: &Self::Geometry, point: Point, tolerance: f32) -> bool;

    fn translate(geometry: &Self::Geometry, dx: f32, dy: f32) -> Self::Geometry;

    fn handles(geometry: &Self::Geometry) -> Vec<(Handle, Point)>;

    /// Geometry after dragging `handle` of `original` by `(dx, dy)` to
    /// `pointer`, respecting the `(width, height)` minimum.
    fn drag_handle(
        original: &Self::Geometry,
        handle: Handle,
        dx: f32,
        dy: f32,
        pointer: Point,
        min_size: (f32, f32),
    ) -> Self::Geometry;

    fn encode(geometry: &Self::Geometry) -> WireGeometry;

    /// Rebuild geometry from the wire. Coordinates are clamped into
    /// `[0, 1]`; unusable geometry yields `None`.
    fn decode(geometry: &WireGeometry) -> Option<Self::Geometry>;
}

/// Vertex handles for point-list geometry.
pub(crate) fn vertex_handles(points: &[Point]) -> Vec<(Handle, Point)> {
    points
        .iter()
        .enumerate()
        .map(|(i, &p)| (Handle::Vertex(i), p))
        .collect()
}

/// Set the dragged vertex to the clamped pointer position.
pub(crate) fn drag_vertex(original: &[Point], handle: Handle, pointer: Point) -> Vec<Point> {
    let mut points = original.to_vec();
    if let Handle::Vertex(index) = handle {
        if let Some(vertex) = points.get_mut(index) {
            *vertex = pointer.clamped();
        }
    }
    points
}

pub(crate) fn translate_points(points: &[Point], dx: f32, dy: f32) -> Vec<Point> {
    points.iter().map(|p| p.offset(dx, dy).clamped()).collect()
}

pub(crate) fn points_to_wire(points: &[Point]) -> Vec<[f32; 2]> {
    points.iter().map(|&p| p.into()).collect()
}

pub(crate) fn points_from_wire(points: &[[f32; 2]]) -> Vec<Point> {
    points
        .iter()
        .map(|&p| Point::from(p).clamped())
        .collect()
}

#[cfg(test)]
mod tests;
