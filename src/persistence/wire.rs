//! JSON wire format shared with the annotation service.
//!
//! Every tool's shapes are flattened into one list of entries:
//!
//! ```json
//! { "id": "…", "label": "nucleus", "type": "bbox",
//!   "geometry": { "x": 0.1, "y": 0.2, "width": 0.3, "height": 0.4 } }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{GeometryKind, ImageId};

/// Geometry payload of one entry. The shape of the object depends on the
/// entry's `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireGeometry {
    /// `bbox`
    Box {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    /// `ellipse`, centre and radii
    Ellipse { cx: f32, cy: f32, rx: f32, ry: f32 },
    /// `polygon`
    Polygon { points: Vec<[f32; 2]> },
    /// `freehand`
    Freehand { path: Vec<[f32; 2]> },
    /// `mask` (magic-wand region)
    Mask {
        #[serde(rename = "maskPath")]
        mask_path: Vec<[f32; 2]>,
    },
}

/// One persisted shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireAnnotation {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub kind: GeometryKind,
    pub geometry: WireGeometry,
}

/// Body of a save request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRequest {
    #[serde(rename = "imageId")]
    pub image_id: ImageId,
    pub annotations: Vec<WireAnnotation>,
    /// Whether the annotator asks a reviewer for feedback on this image.
    #[serde(default)]
    pub for_remark: bool,
}

impl SaveRequest {
    /// The payload a fetch for the same image should return.
    pub fn to_payload(&self) -> Value {
        serde_json::json!({ "annotations": self.annotations })
    }
}

/// Decode a fetch response into entries.
///
/// Accepts `{"annotations": [...]}` or a bare array. A missing or malformed
/// payload yields no entries; malformed entries are skipped individually.
pub fn decode_payload(payload: Option<&Value>) -> Vec<WireAnnotation> {
    let entries = match payload {
        Some(Value::Object(map)) => match map.get("annotations") {
            Some(Value::Array(entries)) => entries,
            Some(Value::Null) | None => return Vec::new(),
            Some(other) => {
                log::warn!("Ignoring annotation payload: 'annotations' is {}", type_name(other));
                return Vec::new();
            }
        },
        Some(Value::Array(entries)) => entries,
        Some(Value::Null) | None => return Vec::new(),
        Some(other) => {
            log::warn!("Ignoring annotation payload of type {}", type_name(other));
            return Vec::new();
        }
    };

    entries
        .iter()
        .filter_map(|entry| match WireAnnotation::deserialize(entry) {
            Ok(annotation) => Some(annotation),
            Err(e) => {
                log::warn!("Skipping malformed annotation entry: {}", e);
                None
            }
        })
        .collect()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
