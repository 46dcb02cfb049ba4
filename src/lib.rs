//! microlabel - annotation editing engine for microscopy image datasets.
//!
//! Five shape tools (box, polygon, ellipse, pencil, magic wand) edit
//! normalized geometry with per-tool undo/redo. An [`AnnotationSession`]
//! maps viewport input onto the active tool and keeps the annotations of the
//! active image in sync with an [`AnnotationService`].

pub mod config;
pub mod constants;
pub mod coords;
pub mod history;
pub mod keybindings;
pub mod model;
pub mod persistence;
pub mod session;
pub mod tools;

pub use config::{ConfigError, EditorConfig, LogLevel};
pub use model::{AnnotationTool, ImageId, Point, Rect, Shape, ShapeId};
pub use persistence::{
    AnnotationService, FileAnnotationService, MemoryAnnotationService, PersistError,
};
pub use session::AnnotationSession;
pub use tools::{EditorTool, PointerOutcome, Toolbox};
