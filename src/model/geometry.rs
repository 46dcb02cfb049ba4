//! Geometric primitives in normalized image space.

/// A point. Image-space points are normalized to `[0, 1]`; viewport points
/// are in rendered pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Both coordinates clamped into `[0, 1]`.
    pub fn clamped(self) -> Self {
        Self::new(clamp01(self.x), clamp01(self.y))
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for [f32; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Self {
        Self::new(x, y)
    }
}

/// Clamp into `[0, 1]`. NaN maps to 0.
pub fn clamp01(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Axis-aligned rectangle defined by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Normalized rectangle spanning two arbitrary corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            w: (b.x - a.x).abs(),
            h: (b.y - a.y).abs(),
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Whether the rectangle lies entirely within the unit square.
    pub fn is_normalized(&self) -> bool {
        const EPS: f32 = 1e-5;
        self.x >= -EPS && self.y >= -EPS && self.right() <= 1.0 + EPS && self.bottom() <= 1.0 + EPS
    }
}

/// Bounding rectangle of a point list, `None` when empty.
pub fn bounds_of(points: &[Point]) -> Option<Rect> {
    let first = points.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Some(Rect::new(min_x, min_y, max_x - min_x, max_y - min_y))
}

/// Point-in-polygon test using the ray casting algorithm.
pub fn polygon_contains(vertices: &[Point], p: Point) -> bool {
    if vertices.len() < crate::constants::MIN_POLYGON_VERTICES {
        return false;
    }
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (vi, vj) = (vertices[i], vertices[j]);
        if ((vi.y > p.y) != (vj.y > p.y)) && (p.x < (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x)
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Shortest distance from `p` to the segment `a`-`b`.
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let length_sq = dx * dx + dy * dy;
    if length_sq == 0.0 {
        return p.distance_to(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / length_sq).clamp(0.0, 1.0);
    p.distance_to(Point::new(a.x + t * dx, a.y + t * dy))
}

/// Reduce a translation so that `bounds` moved by it stays in `[0, 1]`.
///
/// Both axes are limited independently, so the shape keeps its form and only
/// travels as far as the nearest edge allows.
pub fn clamp_delta(bounds: Rect, dx: f32, dy: f32) -> (f32, f32) {
    let dx = dx.max(-bounds.x).min(1.0 - bounds.right());
    let dy = dy.max(-bounds.y).min(1.0 - bounds.bottom());
    (dx, dy)
}

/// A grab point on a selected shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    NorthWest,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    /// Vertex index of a polygon or region.
    Vertex(usize),
}

impl Handle {
    /// The four corner handles, clockwise from the top-left.
    pub const CORNERS: [Handle; 4] = [
        Handle::NorthWest,
        Handle::NorthEast,
        Handle::SouthEast,
        Handle::SouthWest,
    ];

    /// Corner and edge handles, clockwise from the top-left.
    pub const ALL_EDGES: [Handle; 8] = [
        Handle::NorthWest,
        Handle::North,
        Handle::NorthEast,
        Handle::East,
        Handle::SouthEast,
        Handle::South,
        Handle::SouthWest,
        Handle::West,
    ];

    pub fn moves_left(&self) -> bool {
        matches!(self, Handle::NorthWest | Handle::West | Handle::SouthWest)
    }

    pub fn moves_right(&self) -> bool {
        matches!(self, Handle::NorthEast | Handle::East | Handle::SouthEast)
    }

    pub fn moves_top(&self) -> bool {
        matches!(self, Handle::NorthWest | Handle::North | Handle::NorthEast)
    }

    pub fn moves_bottom(&self) -> bool {
        matches!(self, Handle::SouthWest | Handle::South | Handle::SouthEast)
    }

    /// Position of this handle on `rect`. Vertex handles have no rect position.
    pub fn position_on(&self, rect: &Rect) -> Option<Point> {
        let x = if self.moves_left() {
            rect.x
        } else if self.moves_right() {
            rect.right()
        } else {
            rect.x + rect.w / 2.0
        };
        let y = if self.moves_top() {
            rect.y
        } else if self.moves_bottom() {
            rect.bottom()
        } else {
            rect.y + rect.h / 2.0
        };
        match self {
            Handle::Vertex(_) => None,
            _ => Some(Point::new(x, y)),
        }
    }
}

/// Move one side of a span `[lo, hi]` by `delta`, keeping it at least
/// `min` long and inside `[0, 1]`. Returns the new `(lo, hi)`.
fn fit_span(lo: f32, hi: f32, delta: f32, min: f32, dragging_low: bool) -> (f32, f32) {
    let min = min.min(1.0);
    if dragging_low {
        let new_lo = (lo + delta).max(0.0).min(hi - min).max(0.0);
        (new_lo, hi.max(new_lo + min).min(1.0))
    } else {
        let new_hi = (hi + delta).min(1.0).max(lo + min).min(1.0);
        (lo.min(new_hi - min).max(0.0), new_hi)
    }
}

/// Resize `original` by dragging `handle` by `(dx, dy)`.
///
/// Corner handles move two edges, edge handles one. The result is at least
/// `min_w` x `min_h` and lies within `[0, 1]`.
pub fn resize_rect(original: &Rect, handle: Handle, dx: f32, dy: f32, min_w: f32, min_h: f32) -> Rect {
    let (mut left, mut right) = (original.x, original.right());
    let (mut top, mut bottom) = (original.y, original.bottom());

    if handle.moves_left() {
        (left, right) = fit_span(left, right, dx, min_w, true);
    } else if handle.moves_right() {
        (left, right) = fit_span(left, right, dx, min_w, false);
    }
    if handle.moves_top() {
        (top, bottom) = fit_span(top, bottom, dy, min_h, true);
    } else if handle.moves_bottom() {
        (top, bottom) = fit_span(top, bottom, dy, min_h, false);
    }

    Rect::new(left, top, right - left, bottom - top)
}
