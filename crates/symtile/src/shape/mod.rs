//! Tile shape model: canonical outline and its placement in world space.
//!
//! Model
//! - The outline is a 7-vertex closed polygon in unit coordinates: a central
//!   unit square flanked by a left triangle, a top triangle and a right tab.
//! - World transform: scale by `unit = tile_size * UNIT_SCALE`, mirror local X
//!   for type `B`, rotate by `rotation` degrees around the frame center
//!   `(x + tile_size/2, y + tile_size/2)`, then translate to that center.
//! - `face` never takes part in the transform.
//!
//! Invariant
//! - `bounding_box`, `vertices` and `edges` share one rotated local vertex set,
//!   so their extremal X/Y agree bit-for-bit (rounding of `+ center` is monotone).

use nalgebra::Vector2;

use crate::types::{BoundingBox, TilePlacement, TileType};

/// Canonical outline in unit coordinates (y grows downward).
pub const OUTLINE: [(f64, f64); 7] = [
    (0.0, 0.0),
    (1.0, 0.0),
    (2.0, 0.0),
    (2.5, 0.5),
    (2.0, 1.0),
    (1.5, 1.5),
    (1.0, 1.0),
];

/// World length of one outline unit, relative to the tile size.
pub const UNIT_SCALE: f64 = 1.28;

/// A directed polygon edge in world coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub start: Vector2<f64>,
    pub end: Vector2<f64>,
    /// Unit direction `start -> end` (zero for a degenerate edge).
    pub direction: Vector2<f64>,
    pub length: f64,
}

impl Edge {
    pub fn new(start: Vector2<f64>, end: Vector2<f64>) -> Self {
        let d = end - start;
        let length = d.norm();
        let direction = if length > 0.0 {
            d / length
        } else {
            Vector2::zeros()
        };
        Self {
            start,
            end,
            direction,
            length,
        }
    }

    #[inline]
    pub fn midpoint(&self) -> Vector2<f64> {
        (self.start + self.end) * 0.5
    }
}

/// World length of one outline unit.
#[inline]
pub fn unit_length(tile_size: f64) -> f64 {
    tile_size * UNIT_SCALE
}

/// Rotation center of a placement.
#[inline]
pub fn center(tile: &TilePlacement, tile_size: f64) -> Vector2<f64> {
    Vector2::new(tile.x + tile_size / 2.0, tile.y + tile_size / 2.0)
}

/// Outline vertices relative to the rotation center, after flip and rotation.
///
/// Type `B` is emitted in reverse order so both types keep the same winding.
pub fn local_vertices(kind: TileType, rotation: f64, tile_size: f64) -> Vec<Vector2<f64>> {
    let unit = unit_length(tile_size);
    let (sin, cos) = rotation.to_radians().sin_cos();
    let rotate = |ux: f64, uy: f64| {
        let lx = match kind {
            TileType::A => ux * unit,
            TileType::B => -ux * unit,
        };
        let ly = uy * unit;
        Vector2::new(lx * cos - ly * sin, lx * sin + ly * cos)
    };
    match kind {
        TileType::A => OUTLINE.iter().map(|&(ux, uy)| rotate(ux, uy)).collect(),
        TileType::B => OUTLINE.iter().rev().map(|&(ux, uy)| rotate(ux, uy)).collect(),
    }
}

/// Bounds of the rotated outline relative to the rotation center.
pub fn local_bounds(kind: TileType, rotation: f64, tile_size: f64) -> BoundingBox {
    let local = local_vertices(kind, rotation, tile_size);
    // Outline is never empty.
    BoundingBox::from_points(local.iter()).unwrap_or(BoundingBox {
        left: 0.0,
        right: 0.0,
        top: 0.0,
        bottom: 0.0,
    })
}

/// World-space polygon of a placed tile.
pub fn vertices(tile: &TilePlacement, tile_size: f64) -> Vec<Vector2<f64>> {
    let c = center(tile, tile_size);
    local_vertices(tile.kind, tile.rotation, tile_size)
        .into_iter()
        .map(|p| p + c)
        .collect()
}

/// Closed edge loop of a placed tile (last edge returns to the first vertex).
pub fn edges(tile: &TilePlacement, tile_size: f64) -> Vec<Edge> {
    polygon_edges(&vertices(tile, tile_size))
}

/// Closed edge loop of an arbitrary polygon.
pub fn polygon_edges(poly: &[Vector2<f64>]) -> Vec<Edge> {
    let n = poly.len();
    (0..n)
        .map(|i| Edge::new(poly[i], poly[(i + 1) % n]))
        .collect()
}

/// Axis-aligned bounds of a placed tile.
pub fn bounding_box(tile: &TilePlacement, tile_size: f64) -> BoundingBox {
    let c = center(tile, tile_size);
    let b = local_bounds(tile.kind, tile.rotation, tile_size);
    BoundingBox {
        left: b.left + c.x,
        right: b.right + c.x,
        top: b.top + c.y,
        bottom: b.bottom + c.y,
    }
}

#[cfg(test)]
mod tests;
