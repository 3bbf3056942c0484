use thiserror::Error;

pub use crate::coords::PlacementIssue;

/// Top-level error type of the engine.
///
/// Geometric checks never fail; only layout generation and relative-placement
/// validation produce errors.
#[derive(Debug, Error)]
pub enum SymtileError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("invalid relative placement: {0}")]
    Placement(#[from] PlacementIssue),
}

/// Failure of the packing/positioning algorithm. Never carries a partial layout.
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("could not place {count} tiles: {reason}")]
    Exhausted { count: usize, reason: String },

    #[error("target rectangle {width} x {height} cannot hold a single tile")]
    AreaTooSmall { width: f64, height: f64 },
}

/// Convenience type alias for results using [`SymtileError`].
pub type Result<T> = std::result::Result<T, SymtileError>;
