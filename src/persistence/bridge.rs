//! Conversion between tool shapes and wire entries.

use crate::model::{Shape, ShapeId};
use crate::tools::ShapeKind;

use super::wire::WireAnnotation;

/// Wire entries for one tool's shapes, in collection order.
pub fn encode_shapes<K: ShapeKind>(shapes: &[Shape<K::Geometry>]) -> Vec<WireAnnotation> {
    let kind = K::TOOL.geometry_kind();
    shapes
        .iter()
        .map(|shape| WireAnnotation {
            id: shape.id.to_string(),
            label: Some(shape.category.clone()),
            kind,
            geometry: K::encode(&shape.geometry),
        })
        .collect()
}

/// Shapes for one tool, picked out of a mixed entry list by discriminator.
///
/// Entries whose geometry does not fit the discriminator are skipped.
pub fn decode_shapes<K: ShapeKind>(entries: &[WireAnnotation]) -> Vec<Shape<K::Geometry>> {
    let kind = K::TOOL.geometry_kind();
    entries
        .iter()
        .filter(|entry| entry.kind == kind)
        .filter_map(|entry| match K::decode(&entry.geometry) {
            Some(geometry) => {
                let id = if entry.id.is_empty() {
                    ShapeId::new()
                } else {
                    ShapeId::from(entry.id.as_str())
                };
                Some(Shape::with_id(id, entry.label.clone().unwrap_or_default(), geometry))
            }
            None => {
                log::warn!("Skipping {} entry {} with unusable geometry", kind.name(), entry.id);
                None
            }
        })
        .collect()
}
