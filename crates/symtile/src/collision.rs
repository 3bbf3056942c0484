//! Separating-axis collision tests between tile polygons.
//!
//! Severity tiers
//! - contact: penetration <= `significant_overlap` is a gapless seam, accepted.
//! - significant overlap: penetration > `significant_overlap`, rejected.
//!
//! The outline's diagonal tabs make exact edge matching numerically fragile, so
//! a few units of penetration is the expected signature of a clean seam.

use nalgebra::Vector2;

use crate::cfg::Tolerances;

/// Axis of least penetration, oriented from the first polygon towards the second.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mtv {
    pub axis: Vector2<f64>,
    pub depth: f64,
}

/// Unit normals of every non-degenerate edge of `poly`.
fn edge_axes(poly: &[Vector2<f64>]) -> impl Iterator<Item = Vector2<f64>> + '_ {
    let n = poly.len();
    (0..n).filter_map(move |i| {
        let e = poly[(i + 1) % n] - poly[i];
        let len = e.norm();
        (len > 1e-12).then(|| Vector2::new(-e.y / len, e.x / len))
    })
}

/// Candidate axes of a polygon pair (edge normals of both).
fn axes<'a>(
    a: &'a [Vector2<f64>],
    b: &'a [Vector2<f64>],
) -> impl Iterator<Item = Vector2<f64>> + 'a {
    edge_axes(a).chain(edge_axes(b))
}

/// Projection interval `[min, max]` of `poly` onto `axis`.
pub fn project(poly: &[Vector2<f64>], axis: Vector2<f64>) -> (f64, f64) {
    poly.iter()
        .map(|p| p.dot(&axis))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        })
}

/// True unless some axis separates the polygons by more than `separation_gap`.
pub fn overlap(a: &[Vector2<f64>], b: &[Vector2<f64>], tol: &Tolerances) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    for axis in axes(a, b) {
        let (a_lo, a_hi) = project(a, axis);
        let (b_lo, b_hi) = project(b, axis);
        let gap = (b_lo - a_hi).max(a_lo - b_hi);
        if gap > tol.separation_gap {
            return false;
        }
    }
    true
}

/// Least separation distance over all axes; 0 if any axis separates.
pub fn penetration_depth(a: &[Vector2<f64>], b: &[Vector2<f64>]) -> f64 {
    min_translation(a, b).map_or(0.0, |m| m.depth)
}

/// Minimum translation vector: the axis needing the shortest push to separate
/// the pair, and the length of that push.
///
/// Per axis the depth is `min(a_hi - b_lo, b_hi - a_lo)`, which also covers
/// one interval containing the other. `None` when some axis separates (or
/// touches) the polygons. Moving `b` by `axis * s` for `0 < s <= depth`
/// lowers the depth by at least `s`, reaching zero at `s = depth`.
pub fn min_translation(a: &[Vector2<f64>], b: &[Vector2<f64>]) -> Option<Mtv> {
    if a.is_empty() || b.is_empty() {
        return None;
    }
    let mut best: Option<Mtv> = None;
    for axis in axes(a, b) {
        let (a_lo, a_hi) = project(a, axis);
        let (b_lo, b_hi) = project(b, axis);
        let forward = a_hi - b_lo;
        let backward = b_hi - a_lo;
        let depth = forward.min(backward);
        if depth <= 0.0 {
            return None;
        }
        if best.as_ref().is_none_or(|m| depth < m.depth) {
            let axis = if forward <= backward { axis } else { -axis };
            best = Some(Mtv { axis, depth });
        }
    }
    best
}

/// Penetration beyond the contact tier.
#[inline]
pub fn significant_overlap(a: &[Vector2<f64>], b: &[Vector2<f64>], tol: &Tolerances) -> bool {
    penetration_depth(a, b) > tol.significant_overlap
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64, s: f64) -> Vec<Vector2<f64>> {
        vec![
            Vector2::new(x, y),
            Vector2::new(x + s, y),
            Vector2::new(x + s, y + s),
            Vector2::new(x, y + s),
        ]
    }

    #[test]
    fn gap_tolerance_decides_overlap() {
        let tol = Tolerances::default();
        let a = square(0.0, 0.0, 100.0);
        assert!(overlap(&a, &square(50.0, 50.0, 100.0), &tol));
        // 3-unit gap is inside the separation tolerance
        assert!(overlap(&a, &square(103.0, 0.0, 100.0), &tol));
        assert!(!overlap(&a, &square(106.0, 0.0, 100.0), &tol));
        assert!(!overlap(&a, &[], &tol));
    }

    #[test]
    fn penetration_is_least_axis_overlap() {
        let a = square(0.0, 0.0, 100.0);
        let b = square(90.0, 40.0, 100.0);
        assert!((penetration_depth(&a, &b) - 10.0).abs() < 1e-9);
        let m = min_translation(&a, &b).unwrap();
        assert!((m.axis - Vector2::new(1.0, 0.0)).norm() < 1e-12);
        let m_rev = min_translation(&b, &a).unwrap();
        assert!((m_rev.axis - Vector2::new(-1.0, 0.0)).norm() < 1e-12);
        assert_eq!(penetration_depth(&a, &square(200.0, 0.0, 10.0)), 0.0);
    }

    #[test]
    fn contact_and_significant_tiers() {
        let tol = Tolerances::default();
        let a = square(0.0, 0.0, 100.0);
        assert!(!significant_overlap(&a, &square(90.0, 0.0, 100.0), &tol));
        assert!(significant_overlap(&a, &square(80.0, 0.0, 100.0), &tol));
    }

    #[test]
    fn contained_projection_counts_the_full_push() {
        let wide = vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(300.0, 0.0),
            Vector2::new(300.0, 100.0),
            Vector2::new(0.0, 100.0),
        ];
        // thin bar inside the wide one's x span, poking out below
        let bar = vec![
            Vector2::new(100.0, 60.0),
            Vector2::new(120.0, 60.0),
            Vector2::new(120.0, 400.0),
            Vector2::new(100.0, 400.0),
        ];
        let m = min_translation(&wide, &bar).unwrap();
        assert!((m.depth - 40.0).abs() < 1e-9);
        assert!((m.axis - Vector2::new(0.0, 1.0)).norm() < 1e-12);

        // inner square: 120 left, 200 right or 40 up clears it
        let inner = square(100.0, 20.0, 20.0);
        let m = min_translation(&wide, &inner).unwrap();
        assert!((m.depth - 40.0).abs() < 1e-9);
        for step in 1..=4 {
            let shift = m.axis * (10.0 * f64::from(step));
            let moved: Vec<_> = inner.iter().map(|p| p + shift).collect();
            let left = penetration_depth(&wide, &moved);
            assert!(left <= m.depth - 10.0 * f64::from(step) + 1e-9, "step {step}: {left}");
        }
    }
}
