//! Geometric rules engine for the mirror-tile symmetry puzzle.
//!
//! Players place polygonal tiles left of a vertical mirror line. The engine
//! decides whether a placement set is a legal figure (connected, free of
//! significant overlap, touching the mirror, inside the board) and computes
//! each tile's mirrored counterpart.
//!
//! Layout
//! - `types`, `cfg`: value types and the tolerance table shared by every check.
//! - `shape`: canonical outline, world-space vertices, edges and bounds.
//! - `distance`, `collision`, `connectivity`, `mirror`: the geometric predicates.
//! - `validate`: composes the predicates into a single verdict.
//! - `coords`, `snap`, `layout`: placement helpers used at the UI/storage boundary.
//! - `api`: the `Engine` facade bundling an `AreaConfig` with `Tolerances`.
//!
//! All functions are pure; the only shared state is the read-only area and
//! tolerance configuration.

pub mod api;
pub mod cfg;
pub mod collision;
pub mod connectivity;
pub mod coords;
pub mod distance;
pub mod error;
pub mod layout;
pub mod mirror;
pub mod shape;
pub mod snap;
pub mod types;
pub mod validate;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use api::Engine;
pub use cfg::Tolerances;
pub use error::{LayoutError, Result, SymtileError};
pub use nalgebra::Vector2 as Vec2;
pub use types::{AreaConfig, BoundingBox, Face, RelativePlacement, TilePlacement, TileType};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::api::Engine;
    pub use crate::cfg::Tolerances;
    pub use crate::connectivity::TouchGraph;
    pub use crate::coords::{PlacementIssue, PlacementWarning, RelativeReport};
    pub use crate::layout::{Layout, LayoutCfg, LayoutStrategy, TargetRect};
    pub use crate::shape::Edge;
    pub use crate::snap::{Alignment, SnapOutcome};
    pub use crate::types::{
        AreaConfig, BoundingBox, Face, RelativePlacement, TilePlacement, TileType,
    };
    pub use crate::validate::{Finding, ValidationTrace, ValidationVerdict};
    pub use nalgebra::Vector2 as Vec2;
}
