//! `Engine`: the one-stop surface for callers (CLI, UI bindings, tests).
//!
//! Bundles a board (`AreaConfig`) with a tolerance table so call sites do not
//! thread both through every predicate. Methods are thin; the rules live in
//! the modules they delegate to.

use nalgebra::Vector2;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::cfg::Tolerances;
use crate::collision::{overlap, penetration_depth};
use crate::connectivity::{connected, touch, TouchGraph};
use crate::coords::{self, RelativeReport};
use crate::distance::min_distance;
use crate::error::{LayoutError, Result};
use crate::layout::{self, Layout, LayoutCfg, TargetRect};
use crate::mirror;
use crate::shape::{self, Edge};
use crate::snap::{self, SnapOutcome};
use crate::types::{AreaConfig, BoundingBox, RelativePlacement, TilePlacement, TileType};
use crate::validate::{self, ValidationTrace, ValidationVerdict};

/// Rules engine bound to one board and tolerance table.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Engine {
    pub area: AreaConfig,
    pub tol: Tolerances,
}

impl Engine {
    pub fn new(area: AreaConfig, tol: Tolerances) -> Self {
        Self { area, tol }
    }

    pub fn with_area(area: AreaConfig) -> Self {
        Self::new(area, Tolerances::default())
    }

    // ---- shape ----

    pub fn vertices(&self, tile: &TilePlacement) -> Vec<Vector2<f64>> {
        shape::vertices(tile, self.area.tile_size)
    }

    pub fn edges(&self, tile: &TilePlacement) -> Vec<Edge> {
        shape::edges(tile, self.area.tile_size)
    }

    pub fn bounding_box(&self, tile: &TilePlacement) -> BoundingBox {
        shape::bounding_box(tile, self.area.tile_size)
    }

    // ---- mirror ----

    pub fn reflect(&self, tile: &TilePlacement) -> TilePlacement {
        mirror::reflect(tile, &self.area)
    }

    pub fn touches_mirror(&self, tile: &TilePlacement) -> bool {
        mirror::touches_mirror(tile, &self.area, &self.tol)
    }

    // ---- pairwise predicates on tiles ----

    pub fn overlap(&self, a: &TilePlacement, b: &TilePlacement) -> bool {
        overlap(&self.vertices(a), &self.vertices(b), &self.tol)
    }

    pub fn penetration_depth(&self, a: &TilePlacement, b: &TilePlacement) -> f64 {
        penetration_depth(&self.vertices(a), &self.vertices(b))
    }

    pub fn touch(&self, a: &TilePlacement, b: &TilePlacement) -> bool {
        touch(&self.vertices(a), &self.vertices(b), &self.tol)
    }

    pub fn min_distance(&self, a: &TilePlacement, b: &TilePlacement) -> f64 {
        min_distance(&self.vertices(a), &self.vertices(b))
    }

    // ---- whole-figure checks ----

    pub fn connected(&self, tiles: &[TilePlacement]) -> bool {
        connected(tiles, &self.area, &self.tol)
    }

    pub fn touch_graph(&self, tiles: &[TilePlacement]) -> TouchGraph {
        TouchGraph::from_tiles(tiles, &self.area, &self.tol)
    }

    pub fn validate(&self, tiles: &[TilePlacement]) -> ValidationVerdict {
        validate::validate(tiles, &self.area, &self.tol)
    }

    pub fn validate_with_trace(
        &self,
        tiles: &[TilePlacement],
    ) -> (ValidationVerdict, ValidationTrace) {
        validate::validate_with_trace(tiles, &self.area, &self.tol)
    }

    // ---- placement helpers ----

    pub fn snap(&self, moving: &TilePlacement, others: &[TilePlacement], radius: f64) -> SnapOutcome {
        snap::snap(moving, others, radius, &self.area, &self.tol)
    }

    /// Lay out `n` tiles inside `rect` with the given random source.
    pub fn layout<R: Rng>(
        &self,
        n: usize,
        rect: TargetRect,
        kinds: &[TileType],
        rng: &mut R,
    ) -> std::result::Result<Layout, LayoutError> {
        layout::layout(n, rect, kinds, &self.area, &self.tol, LayoutCfg::default(), rng)
    }

    /// Reproducible layout on the player side of the board.
    pub fn layout_seeded(&self, n: usize, kinds: &[TileType], seed: u64) -> Result<Layout> {
        let mut rng = StdRng::seed_from_u64(seed);
        let rect = TargetRect::player_side(&self.area);
        Ok(self.layout(n, rect, kinds, &mut rng)?)
    }

    // ---- relative coordinates ----

    pub fn touching_x(&self, kind: TileType, rotation: f64) -> f64 {
        coords::touching_x(kind, rotation, &self.area)
    }

    pub fn to_absolute(&self, rel: &RelativePlacement) -> TilePlacement {
        coords::to_absolute(rel, &self.area)
    }

    pub fn to_relative(&self, tile: &TilePlacement) -> RelativePlacement {
        coords::to_relative(tile, &self.area)
    }

    /// Convert one relative piece, refusing it when it breaks a placement rule.
    pub fn to_absolute_checked(&self, piece: usize, rel: &RelativePlacement) -> Result<TilePlacement> {
        Ok(coords::to_absolute_checked(piece, rel, &self.area)?)
    }

    pub fn validate_relative(&self, pieces: &[RelativePlacement]) -> RelativeReport {
        coords::validate_relative(pieces, &self.area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SymtileError;
    use crate::types::Face;

    fn rel(x: f64, y: f64) -> RelativePlacement {
        RelativePlacement {
            kind: TileType::A,
            face: Face::Front,
            x,
            y,
            rotation: 0.0,
        }
    }

    #[test]
    fn relative_origin_is_a_valid_single_tile() {
        let e = Engine::default();
        let t = e.to_absolute(&rel(0.0, 0.0));
        assert!(e.touches_mirror(&t));
        assert!(e.validate(&[t]).is_valid);
        assert_eq!(e.to_relative(&t), rel(0.0, 0.0));
    }

    #[test]
    fn checked_conversion_surfaces_the_first_issue() {
        let e = Engine::default();
        let err = e.to_absolute_checked(2, &rel(12.0, 0.0)).unwrap_err();
        assert!(matches!(err, SymtileError::Placement(_)));
        assert!(err.to_string().contains("piece 2"), "{err}");
        assert!(e.to_absolute_checked(0, &rel(-10.0, 20.0)).is_ok());
    }

    #[test]
    fn seeded_layout_is_reproducible() {
        let e = Engine::default();
        let a = e.layout_seeded(3, &[TileType::A], 11).unwrap();
        let b = e.layout_seeded(3, &[TileType::A], 11).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn layout_errors_lift_into_engine_error() {
        let e = Engine::with_area(AreaConfig {
            width: 200.0,
            height: 100.0,
            mirror_line_x: 200.0,
            tile_size: 100.0,
        });
        let err = e.layout_seeded(1, &[], 0).unwrap_err();
        assert!(matches!(
            err,
            SymtileError::Layout(LayoutError::AreaTooSmall { .. })
        ));
    }

    #[test]
    fn pair_predicates_agree_on_a_seam() {
        let e = Engine::default();
        let a = e.to_absolute(&rel(0.0, 0.0));
        let pitch = 2.0 * shape::unit_length(e.area.tile_size);
        let b = a.translated(-pitch, 0.0);
        assert!(e.touch(&a, &b));
        assert!(e.min_distance(&a, &b) < 1e-9);
        assert!(e.penetration_depth(&a, &b) <= e.tol.significant_overlap);
        assert_eq!(e.touch_graph(&[a, b]).components().len(), 1);
        assert!(e.connected(&[a, b]));
    }
}
