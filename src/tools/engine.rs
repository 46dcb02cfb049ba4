//! The generic shape editing engine.

use crate::config::ToolSettings;
use crate::constants::FALLBACK_VIEW_SIZE_PX;
use crate::coords::{DrawRect, px_to_normalized};
use crate::history::History;
use crate::model::{Handle, Point, Shape, ShapeId, clamp_delta};

use super::{DragSession, DragTarget, DrawMode, PointerOutcome, ShapeKind, ToolState};

type KindState<K> = ToolState<<K as ShapeKind>::Geometry, <K as ShapeKind>::Draft>;

/// Shape collection, draft, selection and undo history for one tool.
///
/// Pointer positions are normalized image coordinates; map viewport pixels
/// with [`crate::coords`] first.
#[derive(Debug, Clone)]
pub struct ShapeTool<K: ShapeKind> {
    history: History<KindState<K>>,
    selected: Option<ShapeId>,
    drag: Option<DragSession<K::Geometry>>,
    /// Pointer is held down on a drag-mode draft
    drawing: bool,
    settings: ToolSettings,
    view: Option<DrawRect>,
    category: String,
}

impl<K: ShapeKind> Default for ShapeTool<K> {
    fn default() -> Self {
        Self::new(ToolSettings::default())
    }
}

impl<K: ShapeKind> ShapeTool<K> {
    pub fn new(settings: ToolSettings) -> Self {
        Self {
            history: History::with_max_history(KindState::<K>::default(), settings.max_history),
            selected: None,
            drag: None,
            drawing: false,
            settings,
            view: None,
            category: String::new(),
        }
    }

    // ------------------------------------------------------------------
    // Read access for renderers
    // ------------------------------------------------------------------

    pub fn shapes(&self) -> &[Shape<K::Geometry>] {
        &self.history.present().shapes
    }

    pub fn draft(&self) -> Option<&K::Draft> {
        self.history.present().draft.as_ref()
    }

    pub fn selected(&self) -> Option<&ShapeId> {
        self.selected.as_ref()
    }

    pub fn selected_shape(&self) -> Option<&Shape<K::Geometry>> {
        let id = self.selected.as_ref()?;
        self.history.present().find(id)
    }

    /// Handles of the selected shape, for drawing grab points.
    pub fn selected_handles(&self) -> Vec<(Handle, Point)> {
        self.selected_shape()
            .map(|shape| K::handles(&shape.geometry))
            .unwrap_or_default()
    }

    pub fn drag_session(&self) -> Option<&DragSession<K::Geometry>> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn history(&self) -> &History<KindState<K>> {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    // ------------------------------------------------------------------
    // Host context
    // ------------------------------------------------------------------

    /// Label stamped onto shapes created from now on.
    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    /// Current rendered image rectangle, used for pixel tolerances.
    pub fn set_view(&mut self, view: Option<DrawRect>) {
        self.view = view;
    }

    fn view_scale(&self) -> (f32, f32) {
        match self.view {
            Some(rect) if rect.width > 0.0 && rect.height > 0.0 => (rect.width, rect.height),
            _ => (FALLBACK_VIEW_SIZE_PX, FALLBACK_VIEW_SIZE_PX),
        }
    }

    fn px_distance(&self, a: Point, b: Point) -> f32 {
        let (w, h) = self.view_scale();
        ((a.x - b.x) * w).hypot((a.y - b.y) * h)
    }

    fn hit_tolerance(&self) -> f32 {
        let (w, h) = self.view_scale();
        self.settings.stroke_hit_tolerance_px / ((w + h) / 2.0)
    }

    fn min_resize_size(&self) -> (f32, f32) {
        px_to_normalized(self.view.as_ref(), self.settings.min_resize_px)
    }

    // ------------------------------------------------------------------
    // Hit testing
    // ------------------------------------------------------------------

    /// Handle of the selected shape under `point`, nearest first.
    pub fn handle_at(&self, point: Point) -> Option<Handle> {
        let radius = self.settings.handle_hit_radius_px;
        self.selected_handles()
            .into_iter()
            .map(|(handle, position)| (handle, self.px_distance(point, position)))
            .filter(|&(_, distance)| distance <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(handle, _)| handle)
    }

    /// Top-most shape under `point`.
    pub fn shape_at(&self, point: Point) -> Option<&ShapeId> {
        let tolerance = self.hit_tolerance();
        self.shapes()
            .iter()
            .rev()
            .find(|shape| K::hit_test(&shape.geometry, point, tolerance))
            .map(|shape| &shape.id)
    }

    // ------------------------------------------------------------------
    // Pointer protocol
    // ------------------------------------------------------------------

    pub fn pointer_down(&mut self, point: Point) -> PointerOutcome {
        log::trace!("{:?}: pointer down at ({:.4}, {:.4})", K::TOOL, point.x, point.y);
        self.drag = None;

        // A polygon in progress swallows every click until it is finished.
        if K::DRAW_MODE == DrawMode::Click && self.draft().is_some() {
            return self.click_draft(point);
        }

        if let Some(handle) = self.handle_at(point) {
            if let Some(id) = self.selected.clone() {
                self.begin_drag(id, DragTarget::Handle(handle), point);
                return PointerOutcome::HandleGrabbed(handle);
            }
        }

        let continues = K::continues_at(self.shapes(), point, &self.settings);
        if !continues {
            if let Some(id) = self.shape_at(point).cloned() {
                self.selected = Some(id.clone());
                self.begin_drag(id.clone(), DragTarget::Body, point);
                log::debug!("{:?}: selected {}", K::TOOL, id);
                return PointerOutcome::Selected(id);
            }
        }

        self.selected = None;
        match K::DRAW_MODE {
            DrawMode::Drag => {
                let draft = K::begin_draft(point, self.shapes(), &self.settings);
                self.history.present_mut().draft = Some(draft);
                self.drawing = true;
                PointerOutcome::DraftStarted
            }
            DrawMode::Click => self.click_draft(point),
            DrawMode::Instant => PointerOutcome::Seed(point),
        }
    }

    fn click_draft(&mut self, point: Point) -> PointerOutcome {
        let closes = self
            .draft()
            .is_some_and(|draft| K::closes_draft(draft, point, &self.settings));
        if closes {
            return match self.commit_draft() {
                Some(id) => PointerOutcome::Committed(id),
                None => PointerOutcome::Discarded,
            };
        }

        if K::DRAFT_IN_HISTORY {
            self.checkpoint("add vertex");
        }
        let state = self.history.present_mut();
        match state.draft.as_mut() {
            Some(draft) => K::extend_draft(draft, point),
            None => {
                let draft = K::begin_draft(point, &state.shapes, &self.settings);
                state.draft = Some(draft);
            }
        }
        PointerOutcome::VertexAdded
    }

    /// Returns `true` when anything visible changed.
    pub fn pointer_move(&mut self, point: Point) -> bool {
        if let Some(session) = self.drag.as_ref() {
            if !session.started {
                if self.px_distance(session.origin, point) < self.settings.drag_start_px {
                    return false;
                }
                self.checkpoint("drag start");
                if let Some(session) = self.drag.as_mut() {
                    session.started = true;
                    log::debug!(
                        "{:?}: started {:?} drag on {}",
                        K::TOOL,
                        session.target,
                        session.shape_id
                    );
                }
            }
            return self.apply_drag(point);
        }

        if self.drawing {
            if let Some(draft) = self.history.present_mut().draft.as_mut() {
                K::extend_draft(draft, point);
                return true;
            }
        }
        false
    }

    /// Release the pointer. `point` is `None` when it was released outside
    /// the image.
    pub fn pointer_up(&mut self, point: Option<Point>) -> Option<ShapeId> {
        if let Some(session) = self.drag.take() {
            if session.started {
                log::debug!("{:?}: finished drag on {}", K::TOOL, session.shape_id);
            }
            return None;
        }

        if !self.drawing {
            return None;
        }
        self.drawing = false;
        if let Some(point) = point {
            if let Some(draft) = self.history.present_mut().draft.as_mut() {
                K::extend_draft(draft, point);
            }
        }
        self.commit_draft()
    }

    /// Abort the gesture in progress. Geometry already moved by a drag stays
    /// where it is; an in-progress drag draft is dropped.
    pub fn pointer_cancel(&mut self) {
        self.drag = None;
        if self.drawing {
            self.drawing = false;
            if !K::DRAFT_IN_HISTORY {
                self.history.present_mut().draft = None;
            }
        }
    }

    /// Start a move or resize session on `id` at `origin`.
    pub fn begin_drag(&mut self, id: ShapeId, target: DragTarget, origin: Point) -> bool {
        let Some(original) = self.history.present().find(&id).map(|s| s.geometry.clone()) else {
            return false;
        };
        self.drag = Some(DragSession {
            shape_id: id,
            target,
            origin,
            original,
            started: false,
        });
        true
    }

    fn apply_drag(&mut self, point: Point) -> bool {
        let min_size = self.min_resize_size();
        let Some(session) = self.drag.as_ref() else {
            return false;
        };
        let (dx, dy) = (point.x - session.origin.x, point.y - session.origin.y);
        let geometry = match session.target {
            DragTarget::Body => {
                let (dx, dy) = clamp_delta(K::bounds(&session.original), dx, dy);
                K::translate(&session.original, dx, dy)
            }
            DragTarget::Handle(handle) => {
                K::drag_handle(&session.original, handle, dx, dy, point, min_size)
            }
        };
        let id = session.shape_id.clone();
        match self.history.present_mut().find_mut(&id) {
            Some(shape) => {
                shape.geometry = geometry;
                true
            }
            None => {
                self.drag = None;
                false
            }
        }
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    fn checkpoint(&mut self, reason: &str) {
        self.history.checkpoint();
        log::debug!(
            "📸 {:?}: snapshot before {} (undo={}, redo={})",
            K::TOOL,
            reason,
            self.history.undo_count(),
            self.history.redo_count()
        );
    }

    /// Validate the draft and promote it to a shape.
    ///
    /// An invalid draft is discarded. The new (or continued) shape becomes
    /// the selection.
    pub fn commit_draft(&mut self) -> Option<ShapeId> {
        self.drawing = false;
        let draft = self.history.present().draft.clone()?;
        let geometry = K::finish_draft(&draft, &self.settings);

        if K::DRAFT_IN_HISTORY {
            self.checkpoint("finish draft");
        }
        self.history.present_mut().draft = None;

        let Some(geometry) = geometry else {
            log::debug!("{:?}: discarded draft {:?}", K::TOOL, draft);
            return None;
        };
        if !K::DRAFT_IN_HISTORY {
            self.checkpoint("commit");
        }

        let continued = K::continued_shape(&draft);
        let state = self.history.present_mut();
        let index = continued.and_then(|id| state.shapes.iter().position(|s| &s.id == id));
        let id = match index {
            Some(index) => {
                let shape = &mut state.shapes[index];
                shape.geometry = geometry;
                shape.id.clone()
            }
            None => {
                let shape = Shape::new(self.category.clone(), geometry);
                let id = shape.id.clone();
                state.shapes.push(shape);
                id
            }
        };

        log::info!(
            "{:?}: committed {} ({}), {} shapes",
            K::TOOL,
            id,
            self.category,
            self.shapes().len()
        );
        self.selected = Some(id.clone());
        Some(id)
    }

    /// Add finished geometry directly, bypassing the draft.
    pub fn commit_geometry(&mut self, geometry: K::Geometry) -> ShapeId {
        self.checkpoint("commit");
        let shape = Shape::new(self.category.clone(), geometry);
        let id = shape.id.clone();
        self.history.present_mut().shapes.push(shape);
        log::info!("{:?}: committed {} ({})", K::TOOL, id, self.category);
        self.selected = Some(id.clone());
        id
    }

    /// Select a shape by id. Selection is not a history event.
    pub fn select(&mut self, id: &ShapeId) -> bool {
        if self.history.present().find(id).is_some() {
            self.selected = Some(id.clone());
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.selected.clone() else {
            return false;
        };
        if self.history.present().find(&id).is_none() {
            self.selected = None;
            return false;
        }

        self.drag = None;
        self.checkpoint("delete");
        self.history.present_mut().shapes.retain(|shape| shape.id != id);
        self.selected = None;
        log::info!("{:?}: deleted {}", K::TOOL, id);
        true
    }

    /// Drop the draft. Undoable when drafts are part of history.
    pub fn cancel_draft(&mut self) -> bool {
        if self.draft().is_none() {
            return false;
        }
        self.drawing = false;
        if K::DRAFT_IN_HISTORY {
            self.checkpoint("cancel draft");
        }
        self.history.present_mut().draft = None;
        log::debug!("{:?}: draft cancelled", K::TOOL);
        true
    }

    /// Finish a click-mode draft explicitly.
    pub fn finish_draft(&mut self) -> Option<ShapeId> {
        if K::DRAW_MODE != DrawMode::Click {
            return None;
        }
        self.commit_draft()
    }

    /// Forget the gesture in progress and the draft, without history.
    /// Used when the tool or the image changes.
    pub fn discard_transient(&mut self) {
        self.drag = None;
        self.drawing = false;
        self.history.present_mut().draft = None;
    }

    fn end_gesture(&mut self) {
        self.drag = None;
        if self.drawing || !K::DRAFT_IN_HISTORY {
            self.drawing = false;
            self.history.present_mut().draft = None;
        }
    }

    fn revalidate_selection(&mut self) {
        let still_there = self
            .selected
            .as_ref()
            .is_some_and(|id| self.history.present().find(id).is_some());
        if !still_there {
            self.selected = None;
        }
    }

    pub fn undo(&mut self) -> bool {
        self.end_gesture();
        let changed = self.history.undo();
        if changed {
            log::debug!(
                "⏪ {:?}: undo (undo={}, redo={})",
                K::TOOL,
                self.history.undo_count(),
                self.history.redo_count()
            );
        }
        self.revalidate_selection();
        changed
    }

    pub fn redo(&mut self) -> bool {
        self.end_gesture();
        let changed = self.history.redo();
        if changed {
            log::debug!(
                "⏩ {:?}: redo (undo={}, redo={})",
                K::TOOL,
                self.history.undo_count(),
                self.history.redo_count()
            );
        }
        self.revalidate_selection();
        changed
    }

    /// Replace every shape, clearing history, selection and draft.
    pub fn reset(&mut self, shapes: Vec<Shape<K::Geometry>>) {
        self.history.reset(ToolState::with_shapes(shapes));
        self.selected = None;
        self.drag = None;
        self.drawing = false;
    }

    /// Remove every shape (undoable).
    pub fn clear_all(&mut self) -> bool {
        self.discard_transient();
        if self.shapes().is_empty() {
            return false;
        }
        self.checkpoint("clear all");
        self.history.present_mut().shapes.clear();
        self.selected = None;
        log::info!("{:?}: cleared all shapes", K::TOOL);
        true
    }
}
