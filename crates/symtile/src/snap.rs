//! Snap/alignment of a tile being moved interactively.
//!
//! Order
//! 1. Clamp the candidate into the player side of the board.
//! 2. Mirror snap: if the bounding box is within `radius` of the mirror, shift
//!    X so the box touches it exactly.
//! 3. Edge alignment: for every nearby tile, score opposing edge pairs by
//!    alignment (how perpendicular the required translation is to the edge)
//!    and continuity (endpoint proximity plus length similarity); translate so
//!    the best pair coincides, sunk `snap_inset` into the target so the seam is
//!    a contact rather than a hair-line gap.
//! 4. Otherwise, bounding-box side snap against boxes that share a span.
//! 5. Nudge out of any penetration above the contact tier, clamp back onto
//!    the board, and repeat while the clamp reintroduces such a penetration.
//!
//! Best effort: with nothing in range, or when no settled position clears
//! every neighbour, the clamped input is returned as `SnapOutcome::NoAlignment`.

use nalgebra::Vector2;

use crate::cfg::Tolerances;
use crate::collision::{min_translation, penetration_depth};
use crate::shape::{bounding_box, edges, vertices, Edge};
use crate::types::{AreaConfig, TilePlacement};

const NUDGE_PASSES: usize = 3;

/// Which alignment produced the snapped position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Alignment {
    Mirror,
    Edge { other: usize, score: f64 },
    BoxSide { other: usize },
}

/// Result of `snap`. `NoAlignment` carries the (boundary-clamped) input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SnapOutcome {
    Aligned(TilePlacement, Alignment),
    NoAlignment(TilePlacement),
}

impl SnapOutcome {
    /// Placement to use, aligned or not.
    #[inline]
    pub fn tile(&self) -> TilePlacement {
        match self {
            SnapOutcome::Aligned(t, _) | SnapOutcome::NoAlignment(t) => *t,
        }
    }

    #[inline]
    pub fn alignment(&self) -> Option<Alignment> {
        match self {
            SnapOutcome::Aligned(_, a) => Some(*a),
            SnapOutcome::NoAlignment(_) => None,
        }
    }
}

/// Best qualifying edge pair between the moving tile and one neighbour.
#[derive(Clone, Copy, Debug)]
struct EdgeMatch {
    other: usize,
    score: f64,
    translation: Vector2<f64>,
}

/// Snap `moving` against the mirror and `others` within `radius`.
pub fn snap(
    moving: &TilePlacement,
    others: &[TilePlacement],
    radius: f64,
    area: &AreaConfig,
    tol: &Tolerances,
) -> SnapOutcome {
    let clamped = clamp_to_board(moving, area);
    let mut candidate = clamped;
    let mut alignment = None;

    let gap = area.mirror_line_x - bounding_box(&candidate, area.tile_size).right;
    if gap.abs() <= radius {
        candidate = candidate.translated(gap, 0.0);
        alignment = Some(Alignment::Mirror);
    }

    if let Some(m) = best_edge_match(&candidate, others, radius, area, tol) {
        tracing::debug!(other = m.other, score = m.score, "edge alignment");
        candidate = candidate.translated(m.translation.x, m.translation.y);
        alignment = Some(Alignment::Edge {
            other: m.other,
            score: m.score,
        });
    } else if let Some((other, dx, dy)) = box_side_snap(&candidate, others, radius, area) {
        tracing::debug!(other, dx, dy, "box side alignment");
        candidate = candidate.translated(dx, dy);
        alignment = Some(Alignment::BoxSide { other });
    }

    let Some(a) = alignment else {
        return SnapOutcome::NoAlignment(clamped);
    };
    match settle(&candidate, others, area, tol) {
        Some(settled) => SnapOutcome::Aligned(settled, a),
        None => {
            tracing::debug!(alignment = ?a, "aligned position stays in overlap");
            SnapOutcome::NoAlignment(clamped)
        }
    }
}

/// Alternate nudging and clamping until no neighbour is penetrated beyond the
/// contact tier. `None` if the passes run out first.
fn settle(
    candidate: &TilePlacement,
    others: &[TilePlacement],
    area: &AreaConfig,
    tol: &Tolerances,
) -> Option<TilePlacement> {
    let polys: Vec<_> = others.iter().map(|o| vertices(o, area.tile_size)).collect();
    let mut t = *candidate;
    for _ in 0..NUDGE_PASSES {
        t = clamp_to_board(&nudge_out(&t, others, area, tol), area);
        if worst_depth(&t, &polys, area) <= tol.significant_overlap {
            return Some(t);
        }
    }
    None
}

fn worst_depth(tile: &TilePlacement, polys: &[Vec<Vector2<f64>>], area: &AreaConfig) -> f64 {
    let mine = vertices(tile, area.tile_size);
    polys
        .iter()
        .map(|p| penetration_depth(p, &mine))
        .fold(0.0, f64::max)
}

/// Shift the tile so its bounding box lies in `[0, mirror] x [0, height]`.
pub fn clamp_to_board(tile: &TilePlacement, area: &AreaConfig) -> TilePlacement {
    let b = bounding_box(tile, area.tile_size);
    let dx = if b.left < 0.0 {
        -b.left
    } else if b.right > area.mirror_line_x {
        area.mirror_line_x - b.right
    } else {
        0.0
    };
    let dy = if b.top < 0.0 {
        -b.top
    } else if b.bottom > area.height {
        area.height - b.bottom
    } else {
        0.0
    };
    if dx == 0.0 && dy == 0.0 {
        *tile
    } else {
        tile.translated(dx, dy)
    }
}

fn centroid(poly: &[Vector2<f64>]) -> Vector2<f64> {
    let sum = poly.iter().fold(Vector2::zeros(), |acc, p| acc + p);
    sum / (poly.len().max(1) as f64)
}

/// Normal of `edge` pointing away from `center`.
fn outward_normal(edge: &Edge, center: Vector2<f64>) -> Vector2<f64> {
    let n = Vector2::new(-edge.direction.y, edge.direction.x);
    if n.dot(&(edge.midpoint() - center)) < 0.0 {
        -n
    } else {
        n
    }
}

/// Score of moving edge `em` against target edge `et`, with the translation
/// that lands `em` on `et`. `None` if the pair does not qualify.
fn score_pair(
    em: &Edge,
    et: &Edge,
    radius: f64,
    tol: &Tolerances,
) -> Option<(f64, Vector2<f64>)> {
    if em.length <= 0.0 || et.length <= 0.0 {
        return None;
    }
    if em.direction.dot(&et.direction) > -tol.antiparallel_cos {
        return None;
    }
    // Opposing edges meet start-to-end.
    let to_end = et.end - em.start;
    let to_start = et.start - em.end;
    let translation = if to_end.norm() <= to_start.norm() {
        to_end
    } else {
        to_start
    };
    let endpoint_gap = translation.norm();
    if endpoint_gap > radius {
        return None;
    }
    let alignment = if endpoint_gap < 1e-9 {
        1.0
    } else {
        let t = translation / endpoint_gap;
        (et.direction.x * t.y - et.direction.y * t.x).abs()
    };
    let length_ratio = em.length.min(et.length) / em.length.max(et.length);
    let continuity = 1.0 / (1.0 + endpoint_gap) + length_ratio;
    Some((alignment + continuity, translation))
}

fn best_edge_match(
    moving: &TilePlacement,
    others: &[TilePlacement],
    radius: f64,
    area: &AreaConfig,
    tol: &Tolerances,
) -> Option<EdgeMatch> {
    let mb = bounding_box(moving, area.tile_size);
    let moving_edges = edges(moving, area.tile_size);
    let mut best: Option<EdgeMatch> = None;
    for (k, other) in others.iter().enumerate() {
        if mb.distance_to(&bounding_box(other, area.tile_size)) > radius {
            continue;
        }
        let center = centroid(&vertices(other, area.tile_size));
        for et in edges(other, area.tile_size) {
            for em in &moving_edges {
                let Some((score, translation)) = score_pair(em, &et, radius, tol) else {
                    continue;
                };
                tracing::trace!(other = k, score, "edge pair");
                if score < tol.snap_min_score {
                    continue;
                }
                if best.as_ref().is_none_or(|b| score > b.score) {
                    let inward = -outward_normal(&et, center) * tol.snap_inset;
                    best = Some(EdgeMatch {
                        other: k,
                        score,
                        translation: translation + inward,
                    });
                }
            }
        }
    }
    best
}

/// Align the closer box side of a neighbour sharing a horizontal or vertical
/// span. Moves that would take the box off the board are skipped.
fn box_side_snap(
    moving: &TilePlacement,
    others: &[TilePlacement],
    radius: f64,
    area: &AreaConfig,
) -> Option<(usize, f64, f64)> {
    let mb = bounding_box(moving, area.tile_size);
    let on_board = |dx: f64, dy: f64| {
        mb.translated(dx, dy)
            .inside(0.0, area.mirror_line_x, 0.0, area.height, 1e-9)
    };
    let mut best: Option<(usize, f64, f64)> = None;
    let mut best_dist = f64::INFINITY;
    for (k, other) in others.iter().enumerate() {
        let ob = bounding_box(other, area.tile_size);
        let share_rows = mb.top < ob.bottom && ob.top < mb.bottom;
        let share_cols = mb.left < ob.right && ob.left < mb.right;
        let mut consider = |d: f64, dx: f64, dy: f64| {
            if d.abs() <= radius && d.abs() < best_dist && on_board(dx, dy) {
                best_dist = d.abs();
                best = Some((k, dx, dy));
            }
        };
        if share_rows {
            let d = ob.right - mb.left;
            consider(d, d, 0.0);
            let d = ob.left - mb.right;
            consider(d, d, 0.0);
        }
        if share_cols {
            let d = ob.bottom - mb.top;
            consider(d, 0.0, d);
            let d = ob.top - mb.bottom;
            consider(d, 0.0, d);
        }
    }
    best
}

/// Push the tile out along the minimum translation axis of any neighbour it
/// penetrates beyond the contact tier.
fn nudge_out(
    tile: &TilePlacement,
    others: &[TilePlacement],
    area: &AreaConfig,
    tol: &Tolerances,
) -> TilePlacement {
    let polys: Vec<_> = others.iter().map(|o| vertices(o, area.tile_size)).collect();
    let mut t = *tile;
    for _ in 0..NUDGE_PASSES {
        let mine = vertices(&t, area.tile_size);
        let worst = polys
            .iter()
            .filter_map(|p| min_translation(p, &mine))
            .filter(|m| m.depth > tol.significant_overlap)
            .max_by(|a, b| a.depth.total_cmp(&b.depth));
        let Some(m) = worst else {
            break;
        };
        tracing::debug!(depth = m.depth, "nudging out of overlap");
        let push = m.axis * m.depth;
        t = t.translated(push.x, push.y);
    }
    t
}
