use super::*;
use crate::types::Face;

const TS: f64 = 100.0;

fn tile(kind: TileType, x: f64, y: f64, rotation: f64) -> TilePlacement {
    TilePlacement::new(kind, Face::Front, x, y, rotation)
}

#[test]
fn unrotated_type_a_extends_right_and_down_from_center() {
    let t = tile(TileType::A, 0.0, 0.0, 0.0);
    let b = bounding_box(&t, TS);
    assert!((b.left - 50.0).abs() < 1e-9);
    assert!((b.right - 370.0).abs() < 1e-9);
    assert!((b.top - 50.0).abs() < 1e-9);
    assert!((b.bottom - 242.0).abs() < 1e-9);
    let v = vertices(&t, TS);
    assert_eq!(v.len(), 7);
    // right tab tip
    assert!((v[3] - Vector2::new(50.0 + 320.0, 50.0 + 64.0)).norm() < 1e-9);
}

#[test]
fn type_b_is_horizontal_mirror_of_a() {
    let a = tile(TileType::A, 200.0, 100.0, 0.0);
    let b = tile(TileType::B, 200.0, 100.0, 0.0);
    let ba = bounding_box(&a, TS);
    let bb = bounding_box(&b, TS);
    let cx = center(&a, TS).x;
    assert!((ba.right - cx - (cx - bb.left)).abs() < 1e-9);
    assert!((ba.top - bb.top).abs() < 1e-12);
    assert!((ba.bottom - bb.bottom).abs() < 1e-12);
    // every B vertex is an A vertex reflected through the center column
    let va = vertices(&a, TS);
    let vb = vertices(&b, TS);
    for p in &vb {
        let mirrored = Vector2::new(2.0 * cx - p.x, p.y);
        assert!(va.iter().any(|q| (q - mirrored).norm() < 1e-9));
    }
}

#[test]
fn face_does_not_change_geometry() {
    let front = tile(TileType::B, 10.0, 20.0, 135.0);
    let back = TilePlacement {
        face: Face::Back,
        ..front
    };
    assert_eq!(vertices(&front, TS), vertices(&back, TS));
    assert_eq!(bounding_box(&front, TS), bounding_box(&back, TS));
}

#[test]
fn bbox_matches_vertex_extremes_bit_for_bit() {
    for kind in [TileType::A, TileType::B] {
        for step in 0..8 {
            let rot = f64::from(step) * 45.0;
            let t = tile(kind, 123.456, 78.9, rot);
            let b = bounding_box(&t, TS);
            let v = vertices(&t, TS);
            let min_x = v.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
            let max_x = v.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
            let min_y = v.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
            let max_y = v.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
            assert_eq!(b.left, min_x, "{kind} @ {rot}");
            assert_eq!(b.right, max_x, "{kind} @ {rot}");
            assert_eq!(b.top, min_y, "{kind} @ {rot}");
            assert_eq!(b.bottom, max_y, "{kind} @ {rot}");
            let e = edges(&t, TS);
            let emax = e
                .iter()
                .map(|e| e.start.x.max(e.end.x))
                .fold(f64::NEG_INFINITY, f64::max);
            assert_eq!(emax, b.right);
        }
    }
}

#[test]
fn edges_close_the_loop_with_unit_directions() {
    let t = tile(TileType::A, 0.0, 0.0, 30.0);
    let e = edges(&t, TS);
    assert_eq!(e.len(), 7);
    let v = vertices(&t, TS);
    assert_eq!(e[6].end, v[0]);
    let perimeter: f64 = e.iter().map(|e| e.length).sum();
    let unit_perimeter: f64 = (0..OUTLINE.len())
        .map(|i| {
            let (ax, ay) = OUTLINE[i];
            let (bx, by) = OUTLINE[(i + 1) % OUTLINE.len()];
            (bx - ax).hypot(by - ay)
        })
        .sum();
    assert!((perimeter - unit_perimeter * unit_length(TS)).abs() < 1e-9);
    for edge in &e {
        assert!((edge.direction.norm() - 1.0).abs() < 1e-12);
    }
}

#[test]
fn rotation_turns_around_frame_center() {
    let t0 = tile(TileType::A, 0.0, 0.0, 0.0);
    let t90 = tile(TileType::A, 0.0, 0.0, 90.0);
    let c = center(&t0, TS);
    let v0 = vertices(&t0, TS);
    let v90 = vertices(&t90, TS);
    for (p, q) in v0.iter().zip(v90.iter()) {
        let d = p - c;
        let expected = c + Vector2::new(-d.y, d.x);
        assert!((q - expected).norm() < 1e-9);
    }
}
