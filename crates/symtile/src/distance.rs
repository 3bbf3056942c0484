//! Point/segment and polygon/polygon distances.

use nalgebra::Vector2;

/// Minimum distance from `p` to the segment from `a` to `b`.
pub fn point_to_segment(p: Vector2<f64>, a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return (p - a).norm();
    }
    // Project onto the infinite line, clamp to [0, 1].
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm()
}

/// Minimum distance from `p` to the boundary of a closed polygon.
pub fn point_to_polygon_boundary(p: Vector2<f64>, poly: &[Vector2<f64>]) -> f64 {
    let n = poly.len();
    match n {
        0 => f64::INFINITY,
        1 => (p - poly[0]).norm(),
        _ => (0..n)
            .map(|i| point_to_segment(p, poly[i], poly[(i + 1) % n]))
            .fold(f64::INFINITY, f64::min),
    }
}

/// Minimum distance between two polygon outlines.
///
/// Covers every vertex pair plus every vertex of one polygon against every
/// edge of the other, in both directions. Crossing outlines report 0 only if a
/// vertex lies on the other outline; use `collision` for overlap.
pub fn min_distance(a: &[Vector2<f64>], b: &[Vector2<f64>]) -> f64 {
    let mut best = f64::INFINITY;
    for p in a {
        for q in b {
            best = best.min((p - q).norm());
        }
    }
    for p in a {
        best = best.min(point_to_polygon_boundary(*p, b));
    }
    for q in b {
        best = best.min(point_to_polygon_boundary(*q, a));
    }
    best
}
