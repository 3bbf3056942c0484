//! Mirror reflection of tiles across `x = mirror_line_x`.
//!
//! The reflection mirrors the tile's bounding box rather than its nominal `x`
//! and keeps the tile's offset from its own box left edge, so rotated tiles
//! land with an exact silhouette. `kind`, `face`, `rotation` and `y` are kept.

use crate::cfg::Tolerances;
use crate::collision::overlap;
use crate::shape::{bounding_box, vertices};
use crate::types::{AreaConfig, TilePlacement};

/// Mirror image of `tile` on the far side of the mirror line.
pub fn reflect(tile: &TilePlacement, area: &AreaConfig) -> TilePlacement {
    let b = bounding_box(tile, area.tile_size);
    let reflected_left = 2.0 * area.mirror_line_x - b.right;
    let offset = tile.x - b.left;
    TilePlacement {
        x: reflected_left + offset,
        ..*tile
    }
}

/// Bounding-box right edge sits on the mirror line (within `mirror_contact`).
pub fn touches_mirror(tile: &TilePlacement, area: &AreaConfig, tol: &Tolerances) -> bool {
    let b = bounding_box(tile, area.tile_size);
    (b.right - area.mirror_line_x).abs() <= tol.mirror_contact
}

/// Bounding-box right edge lies past the mirror line (beyond `mirror_contact`).
pub fn crosses_mirror(tile: &TilePlacement, area: &AreaConfig, tol: &Tolerances) -> bool {
    let b = bounding_box(tile, area.tile_size);
    b.right > area.mirror_line_x + tol.mirror_contact
}

/// A tile overlaps its own reflection.
///
/// Mirror-touching tiles always meet their reflection at the seam; that is
/// expected and reported as no overlap.
pub fn reflection_self_overlap(tile: &TilePlacement, area: &AreaConfig, tol: &Tolerances) -> bool {
    if touches_mirror(tile, area, tol) {
        return false;
    }
    let image = reflect(tile, area);
    overlap(
        &vertices(tile, area.tile_size),
        &vertices(&image, area.tile_size),
        tol,
    )
}
