//! Annotation tool identifiers.

use serde::{Deserialize, Serialize};

use super::shape::GeometryKind;

/// Annotation tools available in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationTool {
    /// Drag-to-draw bounding box tool
    #[default]
    BoundingBox,
    /// Click-to-add-vertex polygon tool
    Polygon,
    /// Drag-to-draw ellipse tool
    Ellipse,
    /// Pencil tool
    Freehand,
    /// Single-click region tool
    MagicWand,
}

impl AnnotationTool {
    /// Get the display name for this tool.
    pub fn name(&self) -> &'static str {
        match self {
            AnnotationTool::BoundingBox => "Bounding Box",
            AnnotationTool::Polygon => "Polygon",
            AnnotationTool::Ellipse => "Ellipse",
            AnnotationTool::Freehand => "Pencil",
            AnnotationTool::MagicWand => "Magic Wand",
        }
    }

    /// Get all available annotation tools.
    pub fn all() -> &'static [AnnotationTool] {
        &[
            AnnotationTool::BoundingBox,
            AnnotationTool::Polygon,
            AnnotationTool::Ellipse,
            AnnotationTool::Freehand,
            AnnotationTool::MagicWand,
        ]
    }

    /// The wire geometry kind this tool produces.
    pub fn geometry_kind(&self) -> GeometryKind {
        match self {
            AnnotationTool::BoundingBox => GeometryKind::Bbox,
            AnnotationTool::Polygon => GeometryKind::Polygon,
            AnnotationTool::Ellipse => GeometryKind::Ellipse,
            AnnotationTool::Freehand => GeometryKind::Freehand,
            AnnotationTool::MagicWand => GeometryKind::Mask,
        }
    }
}
