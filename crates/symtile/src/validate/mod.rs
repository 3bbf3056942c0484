//! Challenge validation: one pass/fail verdict with per-rule diagnostics.
//!
//! Rules (all must hold for `is_valid`)
//! - no tile pair overlaps significantly;
//! - no tile overlaps its own reflection;
//! - at least one tile touches the mirror;
//! - no tile's bounding box crosses past the mirror line;
//! - every tile is reachable through touches from the mirror;
//! - every tile and its reflection fit inside the board.
//!
//! `validate_with_trace` also returns the individual findings so callers and
//! tests can see which tiles broke which rule.

use crate::cfg::Tolerances;
use crate::collision::penetration_depth;
use crate::connectivity::unreachable_tiles;
use crate::mirror::{crosses_mirror, reflect, reflection_self_overlap, touches_mirror};
use crate::shape::{bounding_box, vertices};
use crate::types::{AreaConfig, TilePlacement};

mod trace;

pub use trace::{Finding, ValidationTrace};

/// Outcome of `validate`. Each rule is observable on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidationVerdict {
    pub is_valid: bool,
    pub touches_mirror: bool,
    pub enters_mirror: bool,
    pub has_tile_overlaps: bool,
    pub has_reflection_overlaps: bool,
    pub tiles_connected: bool,
    pub tiles_in_area: bool,
}

/// Validate a tile list against all placement rules.
pub fn validate(tiles: &[TilePlacement], area: &AreaConfig, tol: &Tolerances) -> ValidationVerdict {
    validate_with_trace(tiles, area, tol).0
}

/// Validate and collect one finding per violation.
pub fn validate_with_trace(
    tiles: &[TilePlacement],
    area: &AreaConfig,
    tol: &Tolerances,
) -> (ValidationVerdict, ValidationTrace) {
    let mut trace = ValidationTrace::default();
    let polys: Vec<_> = tiles.iter().map(|t| vertices(t, area.tile_size)).collect();

    for i in 0..polys.len() {
        for j in (i + 1)..polys.len() {
            let depth = penetration_depth(&polys[i], &polys[j]);
            tracing::trace!(i, j, depth, "pair penetration");
            if depth > tol.significant_overlap {
                trace.push(Finding::SignificantOverlap { a: i, b: j, depth });
            }
        }
    }

    let mut any_touch = false;
    for (i, t) in tiles.iter().enumerate() {
        let touching = touches_mirror(t, area, tol);
        any_touch |= touching;
        if reflection_self_overlap(t, area, tol) {
            trace.push(Finding::ReflectionOverlap { tile: i });
        }
        if crosses_mirror(t, area, tol) {
            let right = bounding_box(t, area.tile_size).right;
            trace.push(Finding::EntersMirror { tile: i, right });
        }
        if !tile_in_area(t, area, tol) {
            trace.push(Finding::OutOfArea { tile: i });
        }
        if !reflection_in_area(t, touching, area, tol) {
            trace.push(Finding::ReflectionOutOfArea { tile: i });
        }
    }
    if !any_touch {
        trace.push(Finding::NoMirrorContact);
    }

    let unreachable = unreachable_tiles(tiles, area, tol);
    for &tile in &unreachable {
        trace.push(Finding::Unreachable { tile });
    }
    let tiles_connected = !tiles.is_empty() && unreachable.is_empty();

    let has_tile_overlaps = trace.any(|f| matches!(f, Finding::SignificantOverlap { .. }));
    let has_reflection_overlaps = trace.any(|f| matches!(f, Finding::ReflectionOverlap { .. }));
    let enters_mirror = trace.any(|f| matches!(f, Finding::EntersMirror { .. }));
    let tiles_in_area = !trace.any(|f| {
        matches!(
            f,
            Finding::OutOfArea { .. } | Finding::ReflectionOutOfArea { .. }
        )
    });

    let is_valid = !has_tile_overlaps
        && !has_reflection_overlaps
        && any_touch
        && !enters_mirror
        && tiles_connected
        && tiles_in_area;

    let verdict = ValidationVerdict {
        is_valid,
        touches_mirror: any_touch,
        enters_mirror,
        has_tile_overlaps,
        has_reflection_overlaps,
        tiles_connected,
        tiles_in_area,
    };
    tracing::debug!(
        tiles = tiles.len(),
        is_valid,
        touches_mirror = any_touch,
        enters_mirror,
        has_tile_overlaps,
        has_reflection_overlaps,
        tiles_connected,
        tiles_in_area,
        "validated"
    );
    (verdict, trace)
}

/// Original tile inside `[0, mirror] x [0, height]`.
fn tile_in_area(tile: &TilePlacement, area: &AreaConfig, tol: &Tolerances) -> bool {
    bounding_box(tile, area.tile_size).inside(
        0.0,
        area.mirror_line_x,
        0.0,
        area.height,
        tol.mirror_contact,
    )
}

/// Reflection inside the mirror half (touching tiles) or anywhere on the
/// combined double-width board (other tiles).
fn reflection_in_area(
    tile: &TilePlacement,
    touching: bool,
    area: &AreaConfig,
    tol: &Tolerances,
) -> bool {
    let image = bounding_box(&reflect(tile, area), area.tile_size);
    let left = if touching { area.mirror_line_x } else { 0.0 };
    image.inside(
        left,
        area.combined_right(),
        0.0,
        area.height,
        tol.mirror_contact,
    )
}
