//! Shape records and identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque shape identifier, generated client-side and stable across edits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(String);

impl ShapeId {
    /// A fresh random (v4) identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ShapeId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for ShapeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ShapeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of an image in the dataset, supplied by the host application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(String);

impl ImageId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A committed shape.
///
/// `category` is the label text copied at creation time. It is never
/// updated when the label is renamed elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape<G> {
    pub id: ShapeId,
    pub category: String,
    pub geometry: G,
}

impl<G> Shape<G> {
    /// Create a shape with a fresh id.
    pub fn new(category: impl Into<String>, geometry: G) -> Self {
        Self {
            id: ShapeId::new(),
            category: category.into(),
            geometry,
        }
    }

    pub fn with_id(id: ShapeId, category: impl Into<String>, geometry: G) -> Self {
        Self {
            id,
            category: category.into(),
            geometry,
        }
    }
}

/// Wire discriminator for the five geometry kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryKind {
    Bbox,
    Polygon,
    Ellipse,
    Freehand,
    Mask,
}

impl GeometryKind {
    pub fn name(&self) -> &'static str {
        match self {
            GeometryKind::Bbox => "bbox",
            GeometryKind::Polygon => "polygon",
            GeometryKind::Ellipse => "ellipse",
            GeometryKind::Freehand => "freehand",
            GeometryKind::Mask => "mask",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_ids_are_unique() {
        let a = Shape::new("nucleus", ());
        let b = Shape::new("nucleus", ());
        assert_ne!(a.id, b.id);
        assert_eq!(a.id.as_str().len(), 36);
    }

    #[test]
    fn test_geometry_kind_wire_names() {
        for kind in [
            GeometryKind::Bbox,
            GeometryKind::Polygon,
            GeometryKind::Ellipse,
            GeometryKind::Freehand,
            GeometryKind::Mask,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.name()));
        }
    }
}
