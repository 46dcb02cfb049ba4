//! Scenario tests for the editing session.
//!
//! Every test drives a session over a [`MemoryAnnotationService`] with
//! `pollster::block_on`, the way the binary does.

mod editing_tests;

use serde_json::{Value, json};

use crate::config::EditorConfig;
use crate::coords::Size;
use crate::model::{ImageId, Point};
use crate::persistence::MemoryAnnotationService;

use super::AnnotationSession;

/// A session over a 1000x1000 image filling a 1000x1000 container, so
/// viewport pixels are normalized coordinates times 1000.
fn session(service: MemoryAnnotationService) -> AnnotationSession<MemoryAnnotationService> {
    let mut session = AnnotationSession::new(service, &EditorConfig::default());
    session.set_viewport(Size::new(1000.0, 1000.0), Size::new(1000.0, 1000.0));
    session
}

fn px(x: f32, y: f32) -> Point {
    Point::new(x * 1000.0, y * 1000.0)
}

fn image(id: &str) -> ImageId {
    ImageId::new(id)
}

fn one_box_payload() -> Value {
    json!({"annotations": [
        {"id": "stored-box", "label": "nucleus", "type": "bbox",
         "geometry": {"x": 0.5, "y": 0.5, "width": 0.25, "height": 0.25}}
    ]})
}

/// Draw a box through the viewport with a press, a move and a release.
fn draw_box(session: &mut AnnotationSession<MemoryAnnotationService>, from: (f32, f32), to: (f32, f32)) {
    session.pointer_down(px(from.0, from.1));
    session.pointer_move(px(to.0, to.1));
    assert!(session.pointer_up(Some(px(to.0, to.1))).is_some());
}
