//! Engine tolerances (world units).
//!
//! Policy
//! - One table, fixed at `Engine` construction. These values change pass/fail
//!   outcomes and are part of the engine contract.
//! - Calibrated for tile size 100; other sizes may need different values.

/// Named tolerance table used by every geometric check.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    /// Band around `mirror_line_x` counted as touching; also the slack for
    /// "does not cross the mirror" and for reflection-in-area checks.
    pub mirror_contact: f64,
    /// Separating-axis gap above which `overlap` reports no overlap.
    pub separation_gap: f64,
    /// Penetration above which two tiles significantly overlap.
    pub significant_overlap: f64,
    /// Lower bound of the penetration band counted as a touch.
    pub contact_penetration: f64,
    /// Minimum-distance epsilon counted as a touch (sub-unit gap).
    pub contact_gap: f64,
    /// Separation the snap engine leaves between aligned edges.
    pub snap_inset: f64,
    /// Minimum score for an edge pair to qualify as an alignment.
    pub snap_min_score: f64,
    /// |cos| between edge directions required to call two edges opposing.
    pub antiparallel_cos: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            mirror_contact: 1.0,
            separation_gap: 5.0,
            significant_overlap: 15.0,
            contact_penetration: 0.05,
            contact_gap: 0.5,
            snap_inset: 1.0,
            snap_min_score: 1.2,
            antiparallel_cos: 0.9,
        }
    }
}
