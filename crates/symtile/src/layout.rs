//! Initial layouts: N non-overlapping tiles inside a target rectangle.
//!
//! Strategies, tried in order
//! 1. Incremental random placement: each tile samples positions (with margin)
//!    until one lies inside the rectangle and clear of the tiles placed so far.
//! 2. Closed-form layouts for 1..=4 tiles (centered, pair, triangle/row, 2x2),
//!    verified afterwards.
//! 3. Full random retries of the whole layout.
//!
//! Every attempt loop is bounded; exhaustion is an explicit error and never a
//! partial layout. Tiles are unrotated and front-facing.

use rand::Rng;

use crate::cfg::Tolerances;
use crate::collision::overlap;
use crate::error::LayoutError;
use crate::shape::{bounding_box, local_bounds, vertices};
use crate::types::{AreaConfig, BoundingBox, Face, TilePlacement, TileType};

/// Slack for "inside the rectangle" so rounding at exact fits does not reject.
const FIT_EPS: f64 = 1e-9;

/// Axis-aligned target rectangle (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl TargetRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Player side of the board: `[0, mirror] x [0, height]`.
    pub fn player_side(area: &AreaConfig) -> Self {
        Self::new(0.0, 0.0, area.mirror_line_x, area.height)
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn contains(&self, b: &BoundingBox) -> bool {
        b.inside(self.left, self.right(), self.top, self.bottom(), FIT_EPS)
    }
}

/// Attempt budgets and spacing.
#[derive(Clone, Copy, Debug)]
pub struct LayoutCfg {
    /// Distance kept from the rectangle border when sampling, if there is room.
    pub margin: f64,
    /// Random samples per tile in the incremental strategy.
    pub attempts_per_tile: usize,
    /// Whole-layout retries in the final strategy.
    pub full_attempts: usize,
    /// Box spacing used by the closed-form layouts.
    pub gap: f64,
}

impl Default for LayoutCfg {
    fn default() -> Self {
        Self {
            margin: 10.0,
            attempts_per_tile: 200,
            full_attempts: 1000,
            gap: 10.0,
        }
    }
}

/// Strategy that produced a layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutStrategy {
    Incremental,
    ClosedForm,
    FullRandom,
}

/// A successful layout.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    pub tiles: Vec<TilePlacement>,
    pub strategy: LayoutStrategy,
}

/// Kind of tile `i` when cycling through `kinds` (type A if empty).
fn kind_at(kinds: &[TileType], i: usize) -> TileType {
    if kinds.is_empty() {
        TileType::A
    } else {
        kinds[i % kinds.len()]
    }
}

/// Unrotated tile whose bounding box has its top-left corner at `(left, top)`.
fn tile_with_box_at(kind: TileType, left: f64, top: f64, area: &AreaConfig) -> TilePlacement {
    let lb = local_bounds(kind, 0.0, area.tile_size);
    let half = area.tile_size / 2.0;
    TilePlacement::new(kind, Face::Front, left - half - lb.left, top - half - lb.top, 0.0)
}

/// Sample a box position for a `w x h` box inside `rect`, keeping `margin` when possible.
fn sample_box<R: Rng>(rng: &mut R, rect: &TargetRect, w: f64, h: f64, margin: f64) -> (f64, f64) {
    let mx = margin.min((rect.width - w) / 2.0).max(0.0);
    let my = margin.min((rect.height - h) / 2.0).max(0.0);
    let (x_lo, x_hi) = (rect.left + mx, rect.right() - w - mx);
    let (y_lo, y_hi) = (rect.top + my, rect.bottom() - h - my);
    let left = if x_hi > x_lo {
        rng.gen_range(x_lo..=x_hi)
    } else {
        x_lo
    };
    let top = if y_hi > y_lo {
        rng.gen_range(y_lo..=y_hi)
    } else {
        y_lo
    };
    (left, top)
}

struct Packer<'a> {
    rect: TargetRect,
    kinds: &'a [TileType],
    area: &'a AreaConfig,
    tol: &'a Tolerances,
    cfg: LayoutCfg,
}

impl Packer<'_> {
    fn fits(&self, tile: &TilePlacement, placed: &[Vec<nalgebra::Vector2<f64>>]) -> bool {
        if !self.rect.contains(&bounding_box(tile, self.area.tile_size)) {
            return false;
        }
        let poly = vertices(tile, self.area.tile_size);
        !placed.iter().any(|p| overlap(p, &poly, self.tol))
    }

    fn verify(&self, tiles: &[TilePlacement]) -> bool {
        let mut placed = Vec::with_capacity(tiles.len());
        for t in tiles {
            if !self.fits(t, &placed) {
                return false;
            }
            placed.push(vertices(t, self.area.tile_size));
        }
        true
    }

    fn box_size(&self, kind: TileType) -> (f64, f64) {
        let b = local_bounds(kind, 0.0, self.area.tile_size);
        (b.width(), b.height())
    }

    fn random_tile<R: Rng>(&self, rng: &mut R, i: usize) -> TilePlacement {
        let kind = kind_at(self.kinds, i);
        let (w, h) = self.box_size(kind);
        let (left, top) = sample_box(rng, &self.rect, w, h, self.cfg.margin);
        tile_with_box_at(kind, left, top, self.area)
    }

    fn incremental<R: Rng>(&self, n: usize, rng: &mut R) -> Option<Vec<TilePlacement>> {
        let mut tiles = Vec::with_capacity(n);
        let mut placed = Vec::with_capacity(n);
        for i in 0..n {
            let tile = (0..self.cfg.attempts_per_tile)
                .map(|_| self.random_tile(rng, i))
                .find(|t| self.fits(t, &placed))?;
            placed.push(vertices(&tile, self.area.tile_size));
            tiles.push(tile);
        }
        Some(tiles)
    }

    fn full_random<R: Rng>(&self, n: usize, rng: &mut R) -> Option<Vec<TilePlacement>> {
        (0..self.cfg.full_attempts)
            .map(|_| (0..n).map(|i| self.random_tile(rng, i)).collect::<Vec<_>>())
            .find(|tiles| self.verify(tiles))
    }

    fn closed_form(&self, n: usize) -> Option<Vec<TilePlacement>> {
        let (w, h) = (0..n)
            .map(|i| self.box_size(kind_at(self.kinds, i)))
            .fold((0.0f64, 0.0f64), |(w, h), (bw, bh)| (w.max(bw), h.max(bh)));
        let g = self.cfg.gap;
        let cx = self.rect.left + self.rect.width / 2.0;
        let cy = self.rect.top + self.rect.height / 2.0;
        let wide = self.rect.width >= 2.0 * w + g;
        let tall = self.rect.height >= 2.0 * h + g;

        let boxes: Vec<(f64, f64)> = match n {
            1 => vec![(cx - w / 2.0, cy - h / 2.0)],
            2 if wide => vec![(cx - w - g / 2.0, cy - h / 2.0), (cx + g / 2.0, cy - h / 2.0)],
            2 => vec![(cx - w / 2.0, cy - h - g / 2.0), (cx - w / 2.0, cy + g / 2.0)],
            3 if wide && tall => vec![
                (cx - w / 2.0, cy - h - g / 2.0),
                (cx - w - g / 2.0, cy + g / 2.0),
                (cx + g / 2.0, cy + g / 2.0),
            ],
            3 if self.rect.width >= 3.0 * w + 2.0 * g => vec![
                (cx - 1.5 * w - g, cy - h / 2.0),
                (cx - w / 2.0, cy - h / 2.0),
                (cx + w / 2.0 + g, cy - h / 2.0),
            ],
            3 => vec![
                (cx - w / 2.0, cy - 1.5 * h - g),
                (cx - w / 2.0, cy - h / 2.0),
                (cx - w / 2.0, cy + h / 2.0 + g),
            ],
            4 => vec![
                (cx - w - g / 2.0, cy - h - g / 2.0),
                (cx + g / 2.0, cy - h - g / 2.0),
                (cx - w - g / 2.0, cy + g / 2.0),
                (cx + g / 2.0, cy + g / 2.0),
            ],
            _ => return None,
        };
        let tiles: Vec<_> = boxes
            .into_iter()
            .enumerate()
            .map(|(i, (l, t))| tile_with_box_at(kind_at(self.kinds, i), l, t, self.area))
            .collect();
        self.verify(&tiles).then_some(tiles)
    }
}

/// Lay out `n` tiles inside `rect`, cycling through `kinds`.
pub fn layout<R: Rng>(
    n: usize,
    rect: TargetRect,
    kinds: &[TileType],
    area: &AreaConfig,
    tol: &Tolerances,
    cfg: LayoutCfg,
    rng: &mut R,
) -> Result<Layout, LayoutError> {
    let packer = Packer {
        rect,
        kinds,
        area,
        tol,
        cfg,
    };
    if n == 0 {
        return Ok(Layout {
            tiles: Vec::new(),
            strategy: LayoutStrategy::ClosedForm,
        });
    }
    let too_small = (0..n.min(kinds.len().max(1))).any(|i| {
        let (w, h) = packer.box_size(kind_at(kinds, i));
        w > rect.width || h > rect.height
    });
    if too_small {
        return Err(LayoutError::AreaTooSmall {
            width: rect.width,
            height: rect.height,
        });
    }

    if let Some(tiles) = packer.incremental(n, rng) {
        tracing::debug!(n, strategy = "incremental", "layout found");
        return Ok(Layout {
            tiles,
            strategy: LayoutStrategy::Incremental,
        });
    }
    if let Some(tiles) = packer.closed_form(n) {
        tracing::debug!(n, strategy = "closed_form", "layout found");
        return Ok(Layout {
            tiles,
            strategy: LayoutStrategy::ClosedForm,
        });
    }
    if let Some(tiles) = packer.full_random(n, rng) {
        tracing::debug!(n, strategy = "full_random", "layout found");
        return Ok(Layout {
            tiles,
            strategy: LayoutStrategy::FullRandom,
        });
    }
    tracing::debug!(n, "layout exhausted");
    Err(LayoutError::Exhausted {
        count: n,
        reason: format!(
            "no non-overlapping arrangement in a {}x{} rectangle after {} samples per tile and {} full retries",
            rect.width, rect.height, cfg.attempts_per_tile, cfg.full_attempts
        ),
    })
}

/// Closed-form layout only (no randomness); `None` for n > 4 or if it does not fit.
pub fn closed_form_layout(
    n: usize,
    rect: TargetRect,
    kinds: &[TileType],
    area: &AreaConfig,
    tol: &Tolerances,
    cfg: LayoutCfg,
) -> Option<Vec<TilePlacement>> {
    Packer {
        rect,
        kinds,
        area,
        tol,
        cfg,
    }
    .closed_form(n)
}
