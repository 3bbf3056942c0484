//! Value types of the tile model.
//!
//! - `TileType`, `Face`: tile identity; only `TileType` is geometric.
//! - `TilePlacement`: absolute placement (top-left of the square frame + rotation).
//! - `RelativePlacement`: mirror-relative placement used by challenge files.
//! - `AreaConfig`: board geometry, read-only after construction.
//! - `BoundingBox`: derived axis-aligned bounds.

use std::fmt;

/// Tile outline variant. `B` is the horizontal mirror image of `A`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileType {
    A,
    B,
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileType::A => f.write_str("A"),
            TileType::B => f.write_str("B"),
        }
    }
}

/// Visible side of a tile. Carries no geometry; transforms copy it verbatim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Face {
    #[default]
    Front,
    Back,
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Face::Front => f.write_str("front"),
            Face::Back => f.write_str("back"),
        }
    }
}

/// A tile placed in world coordinates.
///
/// `(x, y)` is the top-left corner of the tile's square frame before rotation;
/// `rotation` (degrees) turns the outline around the frame's center.
/// Placements are values: moving a tile produces a new placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TilePlacement {
    pub kind: TileType,
    pub face: Face,
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
}

impl TilePlacement {
    #[inline]
    pub fn new(kind: TileType, face: Face, x: f64, y: f64, rotation: f64) -> Self {
        Self {
            kind,
            face,
            x,
            y,
            rotation,
        }
    }

    /// Same tile, translated by `(dx, dy)`.
    #[inline]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// Mirror-relative placement: `x` is the signed distance from the
/// touches-mirror position (0 = touching, negative = left), `y` the signed
/// offset from the board's vertical center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RelativePlacement {
    pub kind: TileType,
    pub face: Face,
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
}

/// Board geometry. `mirror_line_x` bounds the player side and is the reflection axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AreaConfig {
    pub width: f64,
    pub height: f64,
    pub mirror_line_x: f64,
    pub tile_size: f64,
}

impl Default for AreaConfig {
    fn default() -> Self {
        Self {
            width: 700.0,
            height: 600.0,
            mirror_line_x: 700.0,
            tile_size: 100.0,
        }
    }
}

impl AreaConfig {
    /// Vertical center used as the origin of relative `y`.
    #[inline]
    pub fn center_y(&self) -> f64 {
        self.height / 2.0
    }

    /// Right edge of the combined play + mirror area.
    #[inline]
    pub fn combined_right(&self) -> f64 {
        2.0 * self.mirror_line_x
    }
}

/// Axis-aligned bounds (`left <= right`, `top <= bottom`, y grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl BoundingBox {
    /// Bounds of a non-empty point set; `None` for an empty one.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a nalgebra::Vector2<f64>>,
    {
        let mut it = points.into_iter();
        let first = it.next()?;
        let mut b = BoundingBox {
            left: first.x,
            right: first.x,
            top: first.y,
            bottom: first.y,
        };
        for p in it {
            b.left = b.left.min(p.x);
            b.right = b.right.max(p.x);
            b.top = b.top.min(p.y);
            b.bottom = b.bottom.max(p.y);
        }
        Some(b)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    #[inline]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            left: self.left + dx,
            right: self.right + dx,
            top: self.top + dy,
            bottom: self.bottom + dy,
        }
    }

    /// True if `self` lies inside `[left, right] x [top, bottom]` widened by `slack`.
    #[inline]
    pub fn inside(&self, left: f64, right: f64, top: f64, bottom: f64, slack: f64) -> bool {
        self.left >= left - slack
            && self.right <= right + slack
            && self.top >= top - slack
            && self.bottom <= bottom + slack
    }

    /// Gap between the boxes (0 if they intersect).
    pub fn distance_to(&self, other: &BoundingBox) -> f64 {
        let dx = (other.left - self.right).max(self.left - other.right).max(0.0);
        let dy = (other.top - self.bottom).max(self.top - other.bottom).max(0.0);
        dx.hypot(dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector2;

    #[test]
    fn bbox_from_points_and_distance() {
        let pts = [
            Vector2::new(1.0, 2.0),
            Vector2::new(-1.0, 5.0),
            Vector2::new(3.0, 0.5),
        ];
        let b = BoundingBox::from_points(pts.iter()).unwrap();
        assert_eq!(b.left, -1.0);
        assert_eq!(b.right, 3.0);
        assert_eq!(b.top, 0.5);
        assert_eq!(b.bottom, 5.0);
        assert!(BoundingBox::from_points(std::iter::empty()).is_none());

        let far = b.translated(10.0, 0.0);
        assert!((b.distance_to(&far) - 6.0).abs() < 1e-12);
        assert_eq!(b.distance_to(&b), 0.0);
    }

    #[test]
    fn placement_translation_keeps_identity() {
        let t = TilePlacement::new(TileType::B, Face::Back, 10.0, 20.0, 45.0);
        let m = t.translated(-3.0, 4.0);
        assert_eq!(m.kind, TileType::B);
        assert_eq!(m.face, Face::Back);
        assert_eq!(m.rotation, 45.0);
        assert_eq!((m.x, m.y), (7.0, 24.0));
        assert_eq!(format!("{}/{}", m.kind, m.face), "B/back");
    }
}
