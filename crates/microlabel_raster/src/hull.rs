//! Polygon reduction: convex hull, Douglas-Peucker and uniform subsampling.

type Vertex = (f32, f32);

fn cross(o: Vertex, a: Vertex, b: Vertex) -> f32 {
    (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0)
}

/// Convex hull by Andrew's monotone chain.
///
/// Collinear points are dropped. Inputs with fewer than three points are
/// returned unchanged.
pub fn convex_hull(points: &[Vertex]) -> Vec<Vertex> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));

    let mut lower: Vec<Vertex> = Vec::with_capacity(sorted.len());
    for &p in &sorted {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0.0 {
            lower.pop();
        }
        lower.push(p);
    }

    let mut upper: Vec<Vertex> = Vec::with_capacity(sorted.len());
    for &p in sorted.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0.0 {
            upper.pop();
        }
        upper.push(p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

fn perpendicular_distance(p: Vertex, start: Vertex, end: Vertex) -> f32 {
    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    let length = (dx * dx + dy * dy).sqrt();
    if length == 0.0 {
        return ((p.0 - start.0).powi(2) + (p.1 - start.1).powi(2)).sqrt();
    }
    (dy * p.0 - dx * p.1 + end.0 * start.1 - end.1 * start.0).abs() / length
}

/// Douglas-Peucker simplification with a fixed `epsilon` (in the same units
/// as the points).
pub fn simplify(points: &[Vertex], epsilon: f32) -> Vec<Vertex> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let first = points[0];
    let last = points[points.len() - 1];
    let (index, max_distance) = points[1..points.len() - 1]
        .iter()
        .enumerate()
        .map(|(i, &p)| (i + 1, perpendicular_distance(p, first, last)))
        .fold((0, 0.0_f32), |best, candidate| {
            if candidate.1 > best.1 { candidate } else { best }
        });

    if max_distance > epsilon {
        let mut left = simplify(&points[..=index], epsilon);
        let right = simplify(&points[index..], epsilon);
        left.pop();
        left.extend(right);
        left
    } else {
        vec![first, last]
    }
}

/// Keep every `ceil(len / max)`-th vertex when there are more than `max`.
pub fn subsample(points: &[Vertex], max: usize) -> Vec<Vertex> {
    if max == 0 || points.len() <= max {
        return points.to_vec();
    }
    let step = points.len().div_ceil(max);
    points.iter().step_by(step).copied().collect()
}
