//! Data models for the annotation editor.

mod annotation;
mod geometry;
mod shape;

pub use annotation::AnnotationTool;
pub use geometry::{
    Handle, Point, Rect, bounds_of, clamp01, clamp_delta, distance_to_segment, polygon_contains,
    resize_rect,
};
pub use shape::{GeometryKind, ImageId, Shape, ShapeId};
