//! Pointer and keyboard input through the session.

use image::{DynamicImage, Rgb, RgbImage};

use crate::coords::Size;
use crate::keybindings::{EditorAction, KeyCode, KeyEvent, Modifiers};
use crate::model::{AnnotationTool, Point, Rect};
use crate::persistence::MemoryAnnotationService;
use crate::tools::PointerOutcome;

use super::{draw_box, image, px, session};

const EPSILON: f32 = 0.0001;

fn assert_rect(actual: &Rect, x: f32, y: f32, w: f32, h: f32) {
    assert!(
        (actual.x - x).abs() < EPSILON
            && (actual.y - y).abs() < EPSILON
            && (actual.w - w).abs() < EPSILON
            && (actual.h - h).abs() < EPSILON,
        "expected ({}, {}, {}, {}), got {:?}",
        x,
        y,
        w,
        h,
        actual
    );
}

#[test]
fn test_input_before_image_is_ignored() {
    let mut session = session(MemoryAnnotationService::new());
    assert_eq!(session.pointer_down(px(0.1, 0.1)), PointerOutcome::Ignored);
    assert_eq!(session.pointer_up(Some(px(0.3, 0.3))), None);
    assert_eq!(session.toolbox().shape_count(), 0);
}

#[test]
fn test_box_lifecycle_through_viewport() {
    let mut session = session(MemoryAnnotationService::new());
    pollster::block_on(session.switch_image(image("a")));
    session.set_category("nucleus");

    draw_box(&mut session, (0.1, 0.1), (0.3, 0.4));
    let id = session.toolbox().boxes.shapes()[0].id.clone();
    assert_eq!(session.toolbox().boxes.shapes()[0].category, "nucleus");

    assert_eq!(session.pointer_down(px(0.2, 0.25)), PointerOutcome::Selected(id));
    assert!(session.pointer_move(px(0.3, 0.35)));
    session.pointer_up(Some(px(0.3, 0.35)));
    assert_rect(&session.toolbox().boxes.shapes()[0].geometry, 0.2, 0.2, 0.2, 0.3);

    let ctrl_z = KeyEvent::new(KeyCode::Z, Modifiers::CTRL);
    assert_eq!(session.handle_key(&ctrl_z, false), Some(EditorAction::Undo));
    assert_rect(&session.toolbox().boxes.shapes()[0].geometry, 0.1, 0.1, 0.2, 0.3);

    let ctrl_y = KeyEvent::new(KeyCode::Y, Modifiers::CTRL);
    assert_eq!(session.handle_key(&ctrl_y, false), Some(EditorAction::Redo));
    assert_rect(&session.toolbox().boxes.shapes()[0].geometry, 0.2, 0.2, 0.2, 0.3);

    pollster::block_on(session.close()).unwrap();
}

#[test]
fn test_letterbox_press_is_ignored() {
    let mut session = session(MemoryAnnotationService::new());
    pollster::block_on(session.switch_image(image("a")));
    // Wide image in a square container: bands above and below
    session.set_viewport(Size::new(200.0, 100.0), Size::new(400.0, 400.0));

    assert_eq!(session.pointer_down(Point::new(200.0, 50.0)), PointerOutcome::Ignored);
    assert_eq!(session.pointer_down(Point::new(200.0, 200.0)), PointerOutcome::DraftStarted);
    session.pointer_cancel();
    pollster::block_on(session.close()).unwrap();
}

#[test]
fn test_drag_leaving_image_is_pinned_to_edge() {
    let mut session = session(MemoryAnnotationService::new());
    pollster::block_on(session.switch_image(image("a")));
    session.set_viewport(Size::new(200.0, 100.0), Size::new(400.0, 400.0));

    // Draw rect is (0, 100, 400, 200)
    session.pointer_down(Point::new(40.0, 120.0));
    assert!(session.pointer_move(Point::new(600.0, 250.0)));
    assert!(session.pointer_up(Some(Point::new(600.0, 250.0))).is_some());
    assert_rect(&session.toolbox().boxes.shapes()[0].geometry, 0.1, 0.1, 0.9, 0.65);
    pollster::block_on(session.close()).unwrap();
}

#[test]
fn test_hover_without_gesture_does_nothing() {
    let mut session = session(MemoryAnnotationService::new());
    pollster::block_on(session.switch_image(image("a")));
    assert!(!session.pointer_move(px(0.5, 0.5)));
    pollster::block_on(session.close()).unwrap();
}

#[test]
fn test_keys_ignored_while_typing() {
    let mut session = session(MemoryAnnotationService::new());
    pollster::block_on(session.switch_image(image("a")));
    draw_box(&mut session, (0.1, 0.1), (0.3, 0.3));

    let delete = KeyEvent::plain(KeyCode::Delete);
    assert_eq!(session.handle_key(&delete, true), None);
    assert_eq!(session.toolbox().shape_count(), 1);

    assert_eq!(session.handle_key(&delete, false), Some(EditorAction::DeleteSelected));
    assert_eq!(session.toolbox().shape_count(), 0);
    pollster::block_on(session.close()).unwrap();
}

#[test]
fn test_tool_hotkeys_and_polygon_keys() {
    let mut session = session(MemoryAnnotationService::new());
    pollster::block_on(session.switch_image(image("a")));

    assert_eq!(
        session.handle_key(&KeyEvent::plain(KeyCode::P), false),
        Some(EditorAction::SelectTool(AnnotationTool::Polygon))
    );
    assert_eq!(session.active_tool(), AnnotationTool::Polygon);

    for (x, y) in [(0.1, 0.1), (0.5, 0.1), (0.5, 0.5)] {
        assert_eq!(session.pointer_down(px(x, y)), PointerOutcome::VertexAdded);
    }
    session.handle_key(&KeyEvent::plain(KeyCode::Enter), false);
    assert_eq!(session.toolbox().polygons.shapes().len(), 1);

    session.pointer_down(px(0.7, 0.7));
    session.pointer_down(px(0.9, 0.7));
    session.handle_key(&KeyEvent::plain(KeyCode::Escape), false);
    assert!(session.toolbox().polygons.draft().is_none());

    // Switching tools drops the outgoing draft
    session.pointer_down(px(0.7, 0.7));
    session.handle_key(&KeyEvent::plain(KeyCode::E), false);
    assert_eq!(session.active_tool(), AnnotationTool::Ellipse);
    assert!(session.toolbox().polygons.draft().is_none());

    // Tool keys with a modifier are not tool switches
    assert_eq!(
        session.handle_key(&KeyEvent::new(KeyCode::B, Modifiers::CTRL), false),
        None
    );
    pollster::block_on(session.close()).unwrap();
}

#[test]
fn test_magic_wand_click_through_session() {
    let mut session = session(MemoryAnnotationService::new());
    pollster::block_on(session.switch_image(image("a")));
    let slide = DynamicImage::ImageRgb8(RgbImage::from_fn(64, 64, |x, y| {
        if (16..48).contains(&x) && (16..48).contains(&y) {
            Rgb([30, 30, 30])
        } else {
            Rgb([235, 235, 235])
        }
    }));
    session.set_wand_image(&slide).unwrap();
    session.set_active_tool(AnnotationTool::MagicWand);
    session.set_sensitivity(8);
    assert_eq!(session.sensitivity(), 8);

    assert!(matches!(
        session.pointer_down(px(0.5, 0.5)),
        PointerOutcome::Committed(_)
    ));
    session.pointer_up(Some(px(0.5, 0.5)));
    assert_eq!(session.toolbox().wand.regions().shapes().len(), 1);

    let region = &session.toolbox().wand.regions().shapes()[0].geometry;
    assert!(region.len() >= 3 && region.len() <= 18);
    assert!(region.iter().all(|p| (0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y)));

    // The prepared raster belongs to the image it was made from
    pollster::block_on(session.switch_image(image("b")));
    assert!(!session.toolbox().wand.has_raster());
    pollster::block_on(session.close()).unwrap();
}
