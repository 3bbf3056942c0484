//! Mirror-relative <-> absolute coordinates.
//!
//! Relative `x` is measured from the touches-mirror position of the tile's own
//! kind and rotation (0 = touching, negative = left of it); relative `y` from
//! the board's vertical center. The touches-mirror position comes from the
//! rotated bounding box, so rotated tiles touch at different nominal X.

use thiserror::Error;

use crate::shape::local_bounds;
use crate::types::{AreaConfig, RelativePlacement, TilePlacement, TileType};

/// A violated placement rule for one piece of a relative layout.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PlacementIssue {
    #[error("piece {piece}: x = {x} is greater than 0 and sits in the mirror area")]
    InMirrorArea { piece: usize, x: f64 },

    #[error("piece {piece}: x = {x} is further left than the board allows (minimum {limit})")]
    TooFarLeft { piece: usize, x: f64, limit: f64 },

    #[error("piece {piece}: y = {y} is outside the vertical bounds (|y| <= {limit})")]
    OutOfVerticalBounds { piece: usize, y: f64, limit: f64 },
}

/// A non-fatal observation about a relative layout.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PlacementWarning {
    #[error("no piece touches the mirror (no piece has x = 0)")]
    NoMirrorContact,

    #[error("layout has no pieces")]
    Empty,
}

/// Outcome of validating a relative layout: errors reject, warnings only flag.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RelativeReport {
    pub errors: Vec<PlacementIssue>,
    pub warnings: Vec<PlacementWarning>,
}

impl RelativeReport {
    #[inline]
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Human-readable error lines, one per violated rule.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }
}

/// Nominal `x` at which a tile of this kind and rotation has its bounding-box
/// right edge on the mirror line. Independent of `y`.
pub fn touching_x(kind: TileType, rotation: f64, area: &AreaConfig) -> f64 {
    let b = local_bounds(kind, rotation, area.tile_size);
    area.mirror_line_x - area.tile_size / 2.0 - b.right
}

/// Relative placement -> world placement.
pub fn to_absolute(rel: &RelativePlacement, area: &AreaConfig) -> TilePlacement {
    let base = touching_x(rel.kind, rel.rotation, area);
    TilePlacement {
        kind: rel.kind,
        face: rel.face,
        x: base + rel.x,
        y: area.center_y() + rel.y,
        rotation: rel.rotation,
    }
}

/// World placement -> relative placement (inverse of `to_absolute`).
pub fn to_relative(tile: &TilePlacement, area: &AreaConfig) -> RelativePlacement {
    let base = touching_x(tile.kind, tile.rotation, area);
    RelativePlacement {
        kind: tile.kind,
        face: tile.face,
        x: tile.x - base,
        y: tile.y - area.center_y(),
        rotation: tile.rotation,
    }
}

/// Rule violations of a single relative piece.
pub fn check_relative(
    piece: usize,
    rel: &RelativePlacement,
    area: &AreaConfig,
) -> Vec<PlacementIssue> {
    let mut issues = Vec::new();
    if rel.x > 0.0 {
        issues.push(PlacementIssue::InMirrorArea { piece, x: rel.x });
    }
    let min_x = -(area.mirror_line_x - area.tile_size);
    if rel.x < min_x {
        issues.push(PlacementIssue::TooFarLeft {
            piece,
            x: rel.x,
            limit: min_x,
        });
    }
    let limit = area.center_y();
    if rel.y.abs() > limit {
        issues.push(PlacementIssue::OutOfVerticalBounds {
            piece,
            y: rel.y,
            limit,
        });
    }
    issues
}

/// Validate a relative layout: one error per violated rule and piece, plus warnings.
pub fn validate_relative(pieces: &[RelativePlacement], area: &AreaConfig) -> RelativeReport {
    let mut report = RelativeReport::default();
    for (i, rel) in pieces.iter().enumerate() {
        report.errors.extend(check_relative(i, rel, area));
    }
    if pieces.is_empty() {
        report.warnings.push(PlacementWarning::Empty);
    } else if !pieces.iter().any(|p| p.x == 0.0) {
        report.warnings.push(PlacementWarning::NoMirrorContact);
    }
    if !report.is_ok() {
        tracing::debug!(errors = report.errors.len(), "relative layout rejected");
    }
    report
}

/// Convert a relative piece, refusing it if it breaks a placement rule.
pub fn to_absolute_checked(
    piece: usize,
    rel: &RelativePlacement,
    area: &AreaConfig,
) -> Result<TilePlacement, PlacementIssue> {
    match check_relative(piece, rel, area).into_iter().next() {
        Some(issue) => Err(issue),
        None => Ok(to_absolute(rel, area)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfg::Tolerances;
    use crate::mirror::touches_mirror;
    use crate::types::Face;

    fn rel(x: f64, y: f64, rotation: f64) -> RelativePlacement {
        RelativePlacement {
            kind: TileType::A,
            face: Face::Front,
            x,
            y,
            rotation,
        }
    }

    #[test]
    fn zero_relative_x_touches_mirror_for_every_rotation() {
        let area = AreaConfig::default();
        let tol = Tolerances::default();
        for kind in [TileType::A, TileType::B] {
            for step in 0..8 {
                let r = RelativePlacement {
                    kind,
                    ..rel(0.0, 0.0, f64::from(step) * 45.0)
                };
                let abs = to_absolute(&r, &area);
                assert!(touches_mirror(&abs, &area, &tol));
                assert_eq!(abs.y, area.center_y());
            }
        }
        // unrotated A: right tab tip is 320 units right of the frame center
        assert_eq!(touching_x(TileType::A, 0.0, &area), 330.0);
    }

    #[test]
    fn negative_x_moves_left_of_touching_position() {
        let area = AreaConfig::default();
        let abs = to_absolute(&rel(-40.0, 25.0, 0.0), &area);
        assert_eq!(abs.x, 290.0);
        assert_eq!(abs.y, 325.0);
        let back = to_relative(&abs, &area);
        assert_eq!(back, rel(-40.0, 25.0, 0.0));
    }

    #[test]
    fn report_lists_each_violation_and_warning() {
        let area = AreaConfig::default();
        let pieces = [
            rel(10.0, 0.0, 0.0),
            rel(-700.0, 0.0, 0.0),
            rel(-10.0, 301.0, 0.0),
            rel(5.0, -400.0, 90.0),
        ];
        let report = validate_relative(&pieces, &area);
        assert_eq!(report.errors.len(), 5);
        assert!(matches!(
            report.errors[0],
            PlacementIssue::InMirrorArea { piece: 0, .. }
        ));
        assert!(matches!(
            report.errors[1],
            PlacementIssue::TooFarLeft { piece: 1, .. }
        ));
        assert_eq!(report.warnings, vec![PlacementWarning::NoMirrorContact]);
        assert!(report.error_messages()[2].contains("piece 2"));

        let good = validate_relative(&[rel(0.0, 0.0, 0.0), rel(-256.0, 0.0, 0.0)], &area);
        assert!(good.is_ok());
        assert!(good.warnings.is_empty());
        assert_eq!(
            validate_relative(&[], &area).warnings,
            vec![PlacementWarning::Empty]
        );
    }

    #[test]
    fn checked_conversion_refuses_mirror_side() {
        let area = AreaConfig::default();
        assert!(to_absolute_checked(0, &rel(0.0, 0.0, 0.0), &area).is_ok());
        assert!(matches!(
            to_absolute_checked(3, &rel(1.0, 0.0, 0.0), &area),
            Err(PlacementIssue::InMirrorArea { piece: 3, .. })
        ));
    }
}
