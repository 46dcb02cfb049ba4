//! Global constants for the microlabel editing engine.
//!
//! Distances are in normalized image units (fractions of the image side)
//! unless the name ends in `_PX`, in which case they are rendered pixels.

/// Minimum width/height of a committed bounding box.
pub const BOX_MIN_SIZE: f32 = 0.003;

/// Minimum width/height of a committed ellipse.
pub const ELLIPSE_MIN_SIZE: f32 = 0.01;

/// Minimum number of vertices required for a valid polygon.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// Distance to the first vertex that closes a polygon draft.
pub const POLYGON_CLOSE_THRESHOLD: f32 = 0.015;

/// A new pencil stroke continues the latest open stroke when it starts this
/// close to its last point.
pub const FREEHAND_CONTINUE_THRESHOLD: f32 = 0.02;

/// A pencil stroke whose ends are this close is stored as closed.
pub const FREEHAND_CLOSE_THRESHOLD: f32 = 0.01;

/// Minimum number of points for a pencil stroke to be kept.
pub const MIN_STROKE_POINTS: usize = 2;

/// Minimum rendered size of a shape while resizing.
pub const MIN_RESIZE_PX: f32 = 12.0;

/// Pointer distance within which a resize handle is grabbed.
pub const HANDLE_HIT_RADIUS_PX: f32 = 8.0;

/// Pointer distance within which an open pencil stroke counts as hit.
pub const STROKE_HIT_TOLERANCE_PX: f32 = 6.0;

/// Pointer travel before a pending drag becomes a move/resize.
pub const DRAG_START_PX: f32 = 2.0;

/// View size assumed for pixel tolerances before anything is rendered.
pub const FALLBACK_VIEW_SIZE_PX: f32 = 1000.0;

/// Default magic-wand sensitivity.
pub const DEFAULT_WAND_SENSITIVITY: u32 = 5;

/// Allowed magic-wand sensitivity range.
pub const WAND_SENSITIVITY_RANGE: std::ops::RangeInclusive<u32> = 1..=100;

/// How long a fetched annotation payload stays fresh, in seconds.
pub const CACHE_TTL_SECS: u64 = 3600;

/// Number of neighbouring images to prefetch.
pub const PREFETCH_WINDOW: usize = 3;
