//! Structured diagnostics returned alongside a verdict.

use std::fmt;

/// One rule violation. Tile indices refer to the validated list.
#[derive(Clone, Debug, PartialEq)]
pub enum Finding {
    SignificantOverlap { a: usize, b: usize, depth: f64 },
    ReflectionOverlap { tile: usize },
    NoMirrorContact,
    EntersMirror { tile: usize, right: f64 },
    OutOfArea { tile: usize },
    ReflectionOutOfArea { tile: usize },
    Unreachable { tile: usize },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::SignificantOverlap { a, b, depth } => {
                write!(f, "tiles {a} and {b} overlap by {depth:.2}")
            }
            Finding::ReflectionOverlap { tile } => {
                write!(f, "tile {tile} overlaps its reflection")
            }
            Finding::NoMirrorContact => f.write_str("no tile touches the mirror"),
            Finding::EntersMirror { tile, right } => {
                write!(f, "tile {tile} crosses the mirror (right edge at {right:.2})")
            }
            Finding::OutOfArea { tile } => write!(f, "tile {tile} is outside the play area"),
            Finding::ReflectionOutOfArea { tile } => {
                write!(f, "reflection of tile {tile} is outside the mirror area")
            }
            Finding::Unreachable { tile } => {
                write!(f, "tile {tile} is not connected to the mirror")
            }
        }
    }
}

/// Findings in rule order: pair overlaps, then per-tile checks, then connectivity.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationTrace {
    pub findings: Vec<Finding>,
}

impl ValidationTrace {
    #[inline]
    pub(crate) fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    #[inline]
    pub fn any(&self, pred: impl Fn(&Finding) -> bool) -> bool {
        self.findings.iter().any(pred)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Human-readable lines, one per finding.
    pub fn messages(&self) -> Vec<String> {
        self.findings.iter().map(ToString::to_string).collect()
    }
}
