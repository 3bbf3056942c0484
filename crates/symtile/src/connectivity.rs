//! Touch graph and reachability from the mirror.
//!
//! Two tiles touch when they are in near-exact contact: a penetration inside
//! the contact band, or a sub-unit gap. The touch graph is implicit in a tile
//! list and recomputed per call.

use nalgebra::Vector2;

use crate::cfg::Tolerances;
use crate::collision::penetration_depth;
use crate::distance::min_distance;
use crate::mirror::touches_mirror;
use crate::shape::vertices;
use crate::types::{AreaConfig, TilePlacement};

/// Near-exact contact between two polygons.
pub fn touch(a: &[Vector2<f64>], b: &[Vector2<f64>], tol: &Tolerances) -> bool {
    let depth = penetration_depth(a, b);
    if depth >= tol.contact_penetration && depth <= tol.significant_overlap {
        return true;
    }
    min_distance(a, b) < tol.contact_gap
}

/// Undirected touch-adjacency over a tile list.
#[derive(Clone, Debug, Default)]
pub struct TouchGraph {
    pub adj: Vec<Vec<usize>>,
}

impl TouchGraph {
    /// Build from world polygons (one per tile).
    pub fn build(polys: &[Vec<Vector2<f64>>], tol: &Tolerances) -> Self {
        let n = polys.len();
        let mut adj = vec![Vec::new(); n];
        for i in 0..n {
            for j in (i + 1)..n {
                if touch(&polys[i], &polys[j], tol) {
                    tracing::trace!(i, j, "tiles touch");
                    adj[i].push(j);
                    adj[j].push(i);
                }
            }
        }
        Self { adj }
    }

    /// Build directly from placements.
    pub fn from_tiles(tiles: &[TilePlacement], area: &AreaConfig, tol: &Tolerances) -> Self {
        let polys: Vec<_> = tiles.iter().map(|t| vertices(t, area.tile_size)).collect();
        Self::build(&polys, tol)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.adj.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.adj.is_empty()
    }

    /// Visited flags of an iterative depth-first traversal from `start`.
    pub fn reachable_from(&self, start: usize) -> Vec<bool> {
        let mut seen = vec![false; self.adj.len()];
        if start >= self.adj.len() {
            return seen;
        }
        let mut stack = vec![start];
        seen[start] = true;
        while let Some(k) = stack.pop() {
            for &next in &self.adj[k] {
                if !seen[next] {
                    seen[next] = true;
                    stack.push(next);
                }
            }
        }
        seen
    }

    /// Connected components, each sorted ascending, ordered by smallest member.
    pub fn components(&self) -> Vec<Vec<usize>> {
        let mut assigned = vec![false; self.adj.len()];
        let mut out = Vec::new();
        for s in 0..self.adj.len() {
            if assigned[s] {
                continue;
            }
            let seen = self.reachable_from(s);
            let comp: Vec<usize> = (0..seen.len()).filter(|&k| seen[k]).collect();
            for &k in &comp {
                assigned[k] = true;
            }
            out.push(comp);
        }
        out
    }
}

/// Tiles not reachable through touches from the traversal root.
///
/// The root is the first mirror-touching tile, or tile 0 if none touches.
/// A single tile is reported unreachable unless it touches the mirror itself;
/// an empty list has nothing unreachable.
pub fn unreachable_tiles(
    tiles: &[TilePlacement],
    area: &AreaConfig,
    tol: &Tolerances,
) -> Vec<usize> {
    match tiles.len() {
        0 => Vec::new(),
        1 => {
            if touches_mirror(&tiles[0], area, tol) {
                Vec::new()
            } else {
                vec![0]
            }
        }
        _ => {
            let graph = TouchGraph::from_tiles(tiles, area, tol);
            let root = tiles
                .iter()
                .position(|t| touches_mirror(t, area, tol))
                .unwrap_or(0);
            let seen = graph.reachable_from(root);
            (0..seen.len()).filter(|&k| !seen[k]).collect()
        }
    }
}

/// Every tile reachable through touches from the mirror. Empty lists are not connected.
pub fn connected(tiles: &[TilePlacement], area: &AreaConfig, tol: &Tolerances) -> bool {
    !tiles.is_empty() && unreachable_tiles(tiles, area, tol).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64, s: f64) -> Vec<Vector2<f64>> {
        vec![
            Vector2::new(x, y),
            Vector2::new(x + s, y),
            Vector2::new(x + s, y + s),
            Vector2::new(x, y + s),
        ]
    }

    #[test]
    fn touch_bands() {
        let tol = Tolerances::default();
        let a = square(0.0, 0.0, 100.0);
        assert!(touch(&a, &square(100.0, 0.0, 100.0), &tol)); // shared edge
        assert!(touch(&a, &square(100.3, 0.0, 100.0), &tol)); // sub-unit gap
        assert!(touch(&a, &square(92.0, 0.0, 100.0), &tol)); // contact penetration
        assert!(!touch(&a, &square(103.0, 0.0, 100.0), &tol)); // visible gap
        assert!(!touch(&a, &square(50.0, 50.0, 100.0), &tol)); // real overlap
    }

    #[test]
    fn chain_graph_is_one_component_until_link_removed() {
        let tol = Tolerances::default();
        let chain = vec![
            square(0.0, 0.0, 10.0),
            square(10.0, 0.0, 10.0),
            square(20.0, 0.0, 10.0),
        ];
        let g = TouchGraph::build(&chain, &tol);
        assert_eq!(g.components(), vec![vec![0, 1, 2]]);
        assert!(g.reachable_from(0).iter().all(|&s| s));

        let broken = vec![
            square(0.0, 0.0, 10.0),
            square(10.0, 0.0, 10.0),
            square(40.0, 0.0, 10.0),
        ];
        let g = TouchGraph::build(&broken, &tol);
        assert_eq!(g.components(), vec![vec![0, 1], vec![2]]);
        assert_eq!(g.reachable_from(0), vec![true, true, false]);
        assert_eq!(g.reachable_from(7), vec![false, false, false]);
    }
}
