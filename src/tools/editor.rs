//! Object-safe view of a tool, used by the toolbox to dispatch to whichever
//! tool is active.

use crate::coords::DrawRect;
use crate::model::{AnnotationTool, Point, ShapeId};
use crate::persistence::{WireAnnotation, bridge};

use super::{PointerOutcome, ShapeKind, ShapeTool};

/// The operations the session needs from any tool.
pub trait EditorTool {
    fn tool(&self) -> AnnotationTool;

    fn pointer_down(&mut self, point: Point) -> PointerOutcome;
    fn pointer_move(&mut self, point: Point) -> bool;
    fn pointer_up(&mut self, point: Option<Point>) -> Option<ShapeId>;
    fn pointer_cancel(&mut self);

    fn undo(&mut self) -> bool;
    fn redo(&mut self) -> bool;
    fn can_undo(&self) -> bool;
    fn can_redo(&self) -> bool;

    fn delete_selected(&mut self) -> bool;
    fn cancel_draft(&mut self) -> bool;
    fn finish_draft(&mut self) -> Option<ShapeId>;
    fn discard_transient(&mut self);
    fn clear_all(&mut self) -> bool;

    fn selected_id(&self) -> Option<&ShapeId>;
    fn clear_selection(&mut self);
    fn shape_count(&self) -> usize;
    fn is_dragging(&self) -> bool;
    fn is_drawing(&self) -> bool;

    fn set_view(&mut self, view: Option<DrawRect>);
    fn set_category(&mut self, category: &str);

    /// Wire entries for every shape of this tool.
    fn encode(&self) -> Vec<WireAnnotation>;
    /// Replace all shapes with the entries of this tool's kind, resetting
    /// history and selection.
    fn load(&mut self, entries: &[WireAnnotation]);
}

impl<K: ShapeKind> EditorTool for ShapeTool<K> {
    fn tool(&self) -> AnnotationTool {
        K::TOOL
    }

    fn pointer_down(&mut self, point: Point) -> PointerOutcome {
        ShapeTool::pointer_down(self, point)
    }

    fn pointer_move(&mut self, point: Point) -> bool {
        ShapeTool::pointer_move(self, point)
    }

    fn pointer_up(&mut self, point: Option<Point>) -> Option<ShapeId> {
        ShapeTool::pointer_up(self, point)
    }

    fn pointer_cancel(&mut self) {
        ShapeTool::pointer_cancel(self)
    }

    fn undo(&mut self) -> bool {
        ShapeTool::undo(self)
    }

    fn redo(&mut self) -> bool {
        ShapeTool::redo(self)
    }

    fn can_undo(&self) -> bool {
        ShapeTool::can_undo(self)
    }

    fn can_redo(&self) -> bool {
        ShapeTool::can_redo(self)
    }

    fn delete_selected(&mut self) -> bool {
        ShapeTool::delete_selected(self)
    }

    fn cancel_draft(&mut self) -> bool {
        ShapeTool::cancel_draft(self)
    }

    fn finish_draft(&mut self) -> Option<ShapeId> {
        ShapeTool::finish_draft(self)
    }

    fn discard_transient(&mut self) {
        ShapeTool::discard_transient(self)
    }

    fn clear_all(&mut self) -> bool {
        ShapeTool::clear_all(self)
    }

    fn selected_id(&self) -> Option<&ShapeId> {
        self.selected()
    }

    fn clear_selection(&mut self) {
        ShapeTool::clear_selection(self)
    }

    fn shape_count(&self) -> usize {
        self.shapes().len()
    }

    fn is_dragging(&self) -> bool {
        ShapeTool::is_dragging(self)
    }

    fn is_drawing(&self) -> bool {
        ShapeTool::is_drawing(self)
    }

    fn set_view(&mut self, view: Option<DrawRect>) {
        ShapeTool::set_view(self, view)
    }

    fn set_category(&mut self, category: &str) {
        ShapeTool::set_category(self, category)
    }

    fn encode(&self) -> Vec<WireAnnotation> {
        bridge::encode_shapes::<K>(self.shapes())
    }

    fn load(&mut self, entries: &[WireAnnotation]) {
        self.reset(bridge::decode_shapes::<K>(entries));
    }
}
