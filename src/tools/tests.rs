//! Pointer-protocol tests for the shape engine across tool kinds.

use proptest::prelude::*;

use super::*;
use crate::model::{Handle, Point, Rect, ShapeId};

const EPSILON: f32 = 0.0001;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn assert_rect(actual: &Rect, x: f32, y: f32, w: f32, h: f32) {
    assert!(
        approx_eq(actual.x, x) && approx_eq(actual.y, y) && approx_eq(actual.w, w) && approx_eq(actual.h, h),
        "expected ({}, {}, {}, {}), got {:?}",
        x,
        y,
        w,
        h,
        actual
    );
}

fn drag_draw<K: ShapeKind>(tool: &mut ShapeTool<K>, from: (f32, f32), to: (f32, f32)) -> Option<ShapeId> {
    let mid = Point::new((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0);
    assert_eq!(tool.pointer_down(Point::new(from.0, from.1)), PointerOutcome::DraftStarted);
    tool.pointer_move(mid);
    tool.pointer_up(Some(Point::new(to.0, to.1)))
}

// ============================================================================
// Bounding boxes
// ============================================================================

#[test]
fn test_box_draw_move_undo_redo() {
    let mut tool = BoxTool::default();
    tool.set_category("nucleus");

    let id = drag_draw(&mut tool, (0.1, 0.1), (0.3, 0.4)).unwrap();
    assert_eq!(tool.shapes().len(), 1);
    assert_rect(&tool.shapes()[0].geometry, 0.1, 0.1, 0.2, 0.3);
    assert_eq!(tool.shapes()[0].category, "nucleus");
    assert_eq!(tool.selected(), Some(&id));
    assert!(tool.draft().is_none());

    // Move by (0.1, 0.1)
    assert_eq!(tool.pointer_down(Point::new(0.2, 0.25)), PointerOutcome::Selected(id.clone()));
    assert!(tool.pointer_move(Point::new(0.3, 0.35)));
    assert_eq!(tool.pointer_up(None), None);
    assert_rect(&tool.shapes()[0].geometry, 0.2, 0.2, 0.2, 0.3);
    assert_eq!(tool.history().undo_count(), 2);

    assert!(tool.undo());
    assert_rect(&tool.shapes()[0].geometry, 0.1, 0.1, 0.2, 0.3);
    assert!(tool.undo());
    assert!(tool.shapes().is_empty());
    assert_eq!(tool.selected(), None);
    assert!(!tool.undo());

    assert!(tool.redo());
    assert!(tool.redo());
    assert_rect(&tool.shapes()[0].geometry, 0.2, 0.2, 0.2, 0.3);
    assert!(!tool.can_redo());
}

#[test]
fn test_tiny_box_is_discarded_without_history() {
    let mut tool = BoxTool::default();
    assert_eq!(drag_draw(&mut tool, (0.5, 0.5), (0.501, 0.6)), None);
    assert!(tool.shapes().is_empty());
    assert!(tool.draft().is_none());
    assert!(!tool.can_undo());
}

#[test]
fn test_box_drawn_backwards_is_normalized() {
    let mut tool = BoxTool::default();
    drag_draw(&mut tool, (0.6, 0.7), (0.2, 0.3)).unwrap();
    assert_rect(&tool.shapes()[0].geometry, 0.2, 0.3, 0.4, 0.4);
}

#[test]
fn test_release_outside_image_commits_last_position() {
    let mut tool = BoxTool::default();
    tool.pointer_down(Point::new(0.1, 0.1));
    tool.pointer_move(Point::new(0.4, 0.4));
    assert!(tool.pointer_up(None).is_some());
    assert_rect(&tool.shapes()[0].geometry, 0.1, 0.1, 0.3, 0.3);
}

#[test]
fn test_selection_is_not_a_history_event() {
    let mut tool = BoxTool::default();
    let id = drag_draw(&mut tool, (0.1, 0.1), (0.3, 0.3)).unwrap();
    tool.clear_selection();

    assert_eq!(tool.pointer_down(Point::new(0.2, 0.2)), PointerOutcome::Selected(id.clone()));
    tool.pointer_up(Some(Point::new(0.2, 0.2)));
    assert_eq!(tool.selected(), Some(&id));
    assert_eq!(tool.history().undo_count(), 1);
    assert!(!tool.is_dragging());
}

#[test]
fn test_drag_starts_past_threshold() {
    let mut tool = BoxTool::default();
    drag_draw(&mut tool, (0.1, 0.1), (0.3, 0.3)).unwrap();

    tool.pointer_down(Point::new(0.2, 0.2));
    // One pixel at the fallback view size
    assert!(!tool.pointer_move(Point::new(0.201, 0.2)));
    assert_rect(&tool.shapes()[0].geometry, 0.1, 0.1, 0.2, 0.2);
    assert_eq!(tool.history().undo_count(), 1);

    assert!(tool.pointer_move(Point::new(0.25, 0.2)));
    assert!(tool.pointer_move(Point::new(0.3, 0.2)));
    tool.pointer_up(None);
    assert_rect(&tool.shapes()[0].geometry, 0.2, 0.1, 0.2, 0.2);
    // One snapshot for the whole drag
    assert_eq!(tool.history().undo_count(), 2);
}

#[test]
fn test_move_is_clamped_to_image() {
    let mut tool = BoxTool::default();
    drag_draw(&mut tool, (0.7, 0.7), (0.9, 0.9)).unwrap();
    tool.pointer_down(Point::new(0.8, 0.8));
    tool.pointer_move(Point::new(1.4, 0.2));
    tool.pointer_up(None);
    assert_rect(&tool.shapes()[0].geometry, 0.8, 0.1, 0.2, 0.2);
}

#[test]
fn test_resize_respects_minimum_size() {
    let mut tool = BoxTool::default();
    drag_draw(&mut tool, (0.1, 0.1), (0.3, 0.3)).unwrap();

    assert_eq!(
        tool.pointer_down(Point::new(0.3, 0.3)),
        PointerOutcome::HandleGrabbed(Handle::SouthEast)
    );
    tool.pointer_move(Point::new(0.0, 0.0));
    tool.pointer_up(None);

    // 12 px at the fallback view size
    assert_rect(&tool.shapes()[0].geometry, 0.1, 0.1, 0.012, 0.012);
}

#[test]
fn test_edge_handle_moves_one_side() {
    let mut tool = BoxTool::default();
    drag_draw(&mut tool, (0.1, 0.1), (0.3, 0.3)).unwrap();

    assert_eq!(
        tool.pointer_down(Point::new(0.3, 0.2)),
        PointerOutcome::HandleGrabbed(Handle::East)
    );
    tool.pointer_move(Point::new(0.5, 0.9));
    tool.pointer_up(Some(Point::new(0.5, 0.9)));
    assert_rect(&tool.shapes()[0].geometry, 0.1, 0.1, 0.4, 0.2);
}

#[test]
fn test_delete_and_undo_delete() {
    let mut tool = BoxTool::default();
    let id = drag_draw(&mut tool, (0.1, 0.1), (0.3, 0.3)).unwrap();

    assert!(tool.delete_selected());
    assert!(tool.shapes().is_empty());
    assert_eq!(tool.selected(), None);
    assert!(!tool.delete_selected());

    assert!(tool.undo());
    assert_eq!(tool.shapes()[0].id, id);
}

#[test]
fn test_new_action_clears_redo() {
    let mut tool = BoxTool::default();
    drag_draw(&mut tool, (0.1, 0.1), (0.3, 0.3)).unwrap();
    tool.undo();
    assert!(tool.can_redo());

    drag_draw(&mut tool, (0.5, 0.5), (0.7, 0.7)).unwrap();
    assert!(!tool.can_redo());
    assert_eq!(tool.shapes().len(), 1);
}

#[test]
fn test_undo_during_drag_ends_the_drag() {
    let mut tool = BoxTool::default();
    drag_draw(&mut tool, (0.1, 0.1), (0.3, 0.3)).unwrap();
    tool.pointer_down(Point::new(0.2, 0.2));
    tool.pointer_move(Point::new(0.4, 0.4));
    assert!(tool.is_dragging());

    assert!(tool.undo());
    assert!(!tool.is_dragging());
    assert_rect(&tool.shapes()[0].geometry, 0.1, 0.1, 0.2, 0.2);

    // Further movement no longer edits anything
    assert!(!tool.pointer_move(Point::new(0.6, 0.6)));
}

#[test]
fn test_pointer_cancel_drops_drag_draft() {
    let mut tool = BoxTool::default();
    tool.pointer_down(Point::new(0.1, 0.1));
    tool.pointer_move(Point::new(0.4, 0.4));
    tool.pointer_cancel();
    assert!(tool.draft().is_none());
    assert_eq!(tool.pointer_up(Some(Point::new(0.4, 0.4))), None);
    assert!(tool.shapes().is_empty());
}

#[test]
fn test_clear_all_is_undoable() {
    let mut tool = BoxTool::default();
    drag_draw(&mut tool, (0.1, 0.1), (0.3, 0.3)).unwrap();
    drag_draw(&mut tool, (0.5, 0.5), (0.7, 0.7)).unwrap();
    assert!(tool.clear_all());
    assert!(tool.shapes().is_empty());
    assert!(!tool.clear_all());
    assert!(tool.undo());
    assert_eq!(tool.shapes().len(), 2);
}

#[test]
fn test_default_history_undoes_every_commit() {
    let mut tool = BoxTool::default();
    for i in 0..101 {
        let x = 0.09 * (i % 11) as f32;
        let y = 0.09 * (i / 11) as f32;
        drag_draw(&mut tool, (x, y), (x + 0.04, y + 0.04)).unwrap();
    }
    assert_eq!(tool.shapes().len(), 101);

    for _ in 0..101 {
        assert!(tool.undo());
    }
    assert!(tool.shapes().is_empty());
    assert!(!tool.can_undo());
}

#[test]
fn test_history_cap_is_opt_in() {
    let settings = crate::config::ToolSettings {
        max_history: Some(3),
        ..Default::default()
    };
    let mut tool = BoxTool::new(settings);
    for i in 0..6 {
        let x = 0.1 * i as f32;
        drag_draw(&mut tool, (x, 0.1), (x + 0.05, 0.2)).unwrap();
    }
    assert_eq!(tool.history().undo_count(), 3);
    while tool.undo() {}
    assert_eq!(tool.shapes().len(), 3);
}

// ============================================================================
// Ellipses
// ============================================================================

#[test]
fn test_ellipse_below_minimum_is_discarded() {
    let mut tool = EllipseTool::default();
    assert_eq!(drag_draw(&mut tool, (0.5, 0.5), (0.505, 0.7)), None);
    assert!(drag_draw(&mut tool, (0.5, 0.5), (0.52, 0.7)).is_some());
    assert_eq!(tool.shapes().len(), 1);
}

#[test]
fn test_ellipse_selection_uses_ellipse_body() {
    let mut tool = EllipseTool::default();
    drag_draw(&mut tool, (0.2, 0.2), (0.6, 0.6)).unwrap();
    tool.clear_selection();

    // Inside the bounds but outside the ellipse: starts a new draft
    assert_eq!(tool.pointer_down(Point::new(0.22, 0.22)), PointerOutcome::DraftStarted);
    tool.pointer_cancel();
    assert!(matches!(tool.pointer_down(Point::new(0.4, 0.4)), PointerOutcome::Selected(_)));
}

// ============================================================================
// Polygons
// ============================================================================

#[test]
fn test_polygon_closes_near_first_vertex() {
    let mut tool = PolygonTool::default();
    assert_eq!(tool.pointer_down(Point::new(0.1, 0.1)), PointerOutcome::VertexAdded);
    assert_eq!(tool.pointer_down(Point::new(0.5, 0.1)), PointerOutcome::VertexAdded);
    assert_eq!(tool.pointer_down(Point::new(0.3, 0.5)), PointerOutcome::VertexAdded);
    assert_eq!(tool.draft().map(Vec::len), Some(3));

    let PointerOutcome::Committed(id) = tool.pointer_down(Point::new(0.105, 0.1)) else {
        panic!("polygon should close");
    };
    assert_eq!(tool.shapes().len(), 1);
    assert_eq!(tool.shapes()[0].geometry.len(), 3);
    assert_eq!(tool.selected(), Some(&id));
    assert!(tool.draft().is_none());
}

#[test]
fn test_polygon_close_threshold_is_exclusive() {
    let settings = crate::config::ToolSettings {
        polygon_close_threshold: 0.25,
        ..Default::default()
    };
    let mut tool = PolygonTool::new(settings);
    for (x, y) in [(0.25, 0.25), (0.75, 0.25), (0.75, 0.75)] {
        tool.pointer_down(Point::new(x, y));
    }
    // Exactly on the threshold: another vertex, not a close
    assert_eq!(tool.pointer_down(Point::new(0.5, 0.25)), PointerOutcome::VertexAdded);
    assert!(tool.shapes().is_empty());
    assert_eq!(tool.draft().map(Vec::len), Some(4));
}

#[test]
fn test_polygon_vertices_are_undoable() {
    let mut tool = PolygonTool::default();
    for (x, y) in [(0.1, 0.1), (0.5, 0.1), (0.3, 0.5)] {
        tool.pointer_down(Point::new(x, y));
    }
    tool.pointer_down(Point::new(0.1, 0.1));
    assert_eq!(tool.shapes().len(), 1);

    // Undo the close, then one vertex
    assert!(tool.undo());
    assert!(tool.shapes().is_empty());
    assert_eq!(tool.draft().map(Vec::len), Some(3));
    assert!(tool.undo());
    assert_eq!(tool.draft().map(Vec::len), Some(2));

    // Keep drawing from the restored draft
    assert_eq!(tool.pointer_down(Point::new(0.4, 0.6)), PointerOutcome::VertexAdded);
    assert_eq!(tool.draft().map(Vec::len), Some(3));
}

#[test]
fn test_polygon_needs_three_vertices() {
    let mut tool = PolygonTool::default();
    tool.pointer_down(Point::new(0.1, 0.1));
    tool.pointer_down(Point::new(0.5, 0.1));
    // Too few vertices to close: this adds a third instead
    assert_eq!(tool.pointer_down(Point::new(0.1, 0.105)), PointerOutcome::VertexAdded);
    assert!(tool.cancel_draft());
    assert!(tool.draft().is_none());

    tool.pointer_down(Point::new(0.1, 0.1));
    tool.pointer_down(Point::new(0.5, 0.1));
    assert_eq!(tool.finish_draft(), None);
    assert!(tool.shapes().is_empty());
}

#[test]
fn test_polygon_finish_commits_open_draft() {
    let mut tool = PolygonTool::default();
    for (x, y) in [(0.1, 0.1), (0.5, 0.1), (0.5, 0.5), (0.1, 0.5)] {
        tool.pointer_down(Point::new(x, y));
    }
    assert!(tool.finish_draft().is_some());
    assert_eq!(tool.shapes()[0].geometry.len(), 4);
}

#[test]
fn test_polygon_vertex_drag() {
    let mut tool = PolygonTool::default();
    for (x, y) in [(0.1, 0.1), (0.5, 0.1), (0.3, 0.5), (0.1, 0.1)] {
        tool.pointer_down(Point::new(x, y));
    }

    assert_eq!(
        tool.pointer_down(Point::new(0.3, 0.5)),
        PointerOutcome::HandleGrabbed(Handle::Vertex(2))
    );
    tool.pointer_move(Point::new(0.3, 0.8));
    tool.pointer_up(None);
    assert_eq!(tool.shapes()[0].geometry[2], Point::new(0.3, 0.8));
    assert!(tool.undo());
    assert_eq!(tool.shapes()[0].geometry[2], Point::new(0.3, 0.5));
}

// ============================================================================
// Pencil strokes
// ============================================================================

#[test]
fn test_stroke_continues_from_its_end() {
    let mut tool = FreehandTool::default();
    let id = drag_draw(&mut tool, (0.1, 0.1), (0.3, 0.3)).unwrap();
    assert!(!tool.shapes()[0].geometry.closed);
    assert_eq!(tool.shapes()[0].geometry.points.len(), 3);

    assert_eq!(tool.pointer_down(Point::new(0.305, 0.305)), PointerOutcome::DraftStarted);
    tool.pointer_move(Point::new(0.4, 0.3));
    assert_eq!(tool.pointer_up(Some(Point::new(0.5, 0.3))), Some(id.clone()));

    assert_eq!(tool.shapes().len(), 1);
    assert_eq!(tool.shapes()[0].id, id);
    assert_eq!(tool.shapes()[0].geometry.points.len(), 6);

    assert!(tool.undo());
    assert_eq!(tool.shapes()[0].geometry.points.len(), 3);
}

#[test]
fn test_stroke_body_press_selects() {
    let mut tool = FreehandTool::default();
    let id = drag_draw(&mut tool, (0.1, 0.1), (0.3, 0.3)).unwrap();
    tool.clear_selection();
    assert_eq!(tool.pointer_down(Point::new(0.15, 0.15)), PointerOutcome::Selected(id));
}

#[test]
fn test_stroke_far_from_end_starts_new_stroke() {
    let mut tool = FreehandTool::default();
    drag_draw(&mut tool, (0.1, 0.1), (0.3, 0.3)).unwrap();
    drag_draw(&mut tool, (0.6, 0.6), (0.8, 0.6)).unwrap();
    assert_eq!(tool.shapes().len(), 2);
}

#[test]
fn test_only_the_latest_stroke_continues() {
    let mut tool = FreehandTool::default();
    let open = drag_draw(&mut tool, (0.1, 0.1), (0.3, 0.3)).unwrap();

    tool.pointer_down(Point::new(0.6, 0.6));
    tool.pointer_move(Point::new(0.8, 0.6));
    tool.pointer_move(Point::new(0.8, 0.8));
    let closed = tool.pointer_up(Some(Point::new(0.605, 0.6))).unwrap();
    assert!(tool.shapes()[1].geometry.closed);

    // The open stroke is no longer the latest, so its end does not continue it
    assert_eq!(tool.pointer_down(Point::new(0.305, 0.305)), PointerOutcome::DraftStarted);
    tool.pointer_move(Point::new(0.4, 0.3));
    let committed = tool.pointer_up(Some(Point::new(0.5, 0.3))).unwrap();

    assert_ne!(committed, open);
    assert_ne!(committed, closed);
    assert_eq!(tool.shapes().len(), 3);
    assert_eq!(tool.shapes()[0].id, open);
    assert_eq!(tool.shapes()[0].geometry.points.len(), 3);
}

#[test]
fn test_stroke_continue_threshold_is_exclusive() {
    let settings = crate::config::ToolSettings {
        freehand_continue_threshold: 0.25,
        ..Default::default()
    };
    let mut tool = FreehandTool::new(settings);
    let first = drag_draw(&mut tool, (0.25, 0.5), (0.5, 0.5)).unwrap();

    let second = drag_draw(&mut tool, (0.75, 0.5), (0.75, 0.75)).unwrap();
    assert_ne!(first, second);
    assert_eq!(tool.shapes().len(), 2);
}

#[test]
fn test_single_point_stroke_is_discarded() {
    let mut tool = FreehandTool::default();
    tool.pointer_down(Point::new(0.5, 0.5));
    assert_eq!(tool.pointer_up(Some(Point::new(0.5, 0.5))), None);
    assert!(tool.shapes().is_empty());
    assert!(!tool.can_undo());
}

#[test]
fn test_stroke_returning_to_start_is_closed() {
    let mut tool = FreehandTool::default();
    tool.pointer_down(Point::new(0.2, 0.2));
    tool.pointer_move(Point::new(0.4, 0.2));
    tool.pointer_move(Point::new(0.4, 0.4));
    tool.pointer_up(Some(Point::new(0.205, 0.2)));
    assert!(tool.shapes()[0].geometry.closed);
}

// ============================================================================
// Clamping
// ============================================================================

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (0.0f32..0.8, 0.0f32..0.8, 0.02f32..0.2, 0.02f32..0.2).prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn check_move<K: ShapeKind<Geometry = Rect>>(rect: Rect, dx: f32, dy: f32) -> Rect {
    let mut tool = ShapeTool::<K>::default();
    let id = tool.commit_geometry(rect);
    let origin = rect.center();
    tool.begin_drag(id, DragTarget::Body, origin);
    tool.pointer_move(origin.offset(dx, dy));
    tool.pointer_up(None);
    tool.shapes()[0].geometry
}

fn check_resize<K: ShapeKind<Geometry = Rect>>(rect: Rect, handle: Handle, dx: f32, dy: f32) -> Rect {
    let mut tool = ShapeTool::<K>::default();
    let id = tool.commit_geometry(rect);
    let origin = handle.position_on(&rect).unwrap_or_default();
    tool.begin_drag(id, DragTarget::Handle(handle), origin);
    tool.pointer_move(origin.offset(dx, dy));
    tool.pointer_up(None);
    tool.shapes()[0].geometry
}

proptest! {
    #[test]
    fn test_moved_shapes_stay_in_image(
        rect in rect_strategy(),
        dx in -2.0f32..2.0,
        dy in -2.0f32..2.0,
    ) {
        for moved in [check_move::<BoxKind>(rect, dx, dy), check_move::<EllipseKind>(rect, dx, dy)] {
            prop_assert!(moved.is_normalized(), "{:?}", moved);
            prop_assert!((moved.w - rect.w).abs() < EPSILON);
            prop_assert!((moved.h - rect.h).abs() < EPSILON);
        }
    }

    #[test]
    fn test_resized_shapes_stay_in_image(
        rect in rect_strategy(),
        handle in 0usize..8,
        dx in -2.0f32..2.0,
        dy in -2.0f32..2.0,
    ) {
        let handle = Handle::ALL_EDGES[handle];
        for resized in [
            check_resize::<BoxKind>(rect, handle, dx, dy),
            check_resize::<EllipseKind>(rect, handle, dx, dy),
        ] {
            prop_assert!(resized.is_normalized(), "{:?}", resized);
            prop_assert!(resized.w >= 0.012 - EPSILON);
            prop_assert!(resized.h >= 0.012 - EPSILON);
        }
    }
}
