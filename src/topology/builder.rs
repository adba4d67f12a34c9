//! Adjacency and jump graph construction.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Point, MAX_BOARD_SIZE};

/// Orthogonal steps, in enumeration order.
const ORTHOGONAL: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Diagonal steps, appended after the orthogonal ones on diagonal nodes.
const DIAGONAL: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// One capture geometry from a source point: leap over `over`, land on `landing`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Jump {
    pub over: Point,
    pub landing: Point,
}

/// Adjacency and jump graphs for a square board of side `n`.
///
/// Neighbor and jump lists keep a fixed order (orthogonal directions first,
/// then diagonals) so that anything iterating them is deterministic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Topology {
    size: usize,
    adjacency: Vec<SmallVec<[Point; 8]>>,
    jumps: Vec<SmallVec<[Jump; 8]>>,
}

impl Topology {
    /// Build both graphs for a board of side `n`.
    ///
    /// Total for every `n`: a zero-sized board simply has no points. Sides
    /// above `MAX_BOARD_SIZE` cannot be addressed by `Point` and build the
    /// empty topology (size 0); `RulesBuilder` rejects them up front.
    #[must_use]
    pub fn build(n: usize) -> Self {
        let n = if n > MAX_BOARD_SIZE { 0 } else { n };
        let adjacency = build_adjacency(n);
        let jumps = build_jumps(n, &adjacency);
        Self {
            size: n,
            adjacency,
            jumps,
        }
    }

    /// Board side length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of points on the board.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.size * self.size
    }

    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.on_board(self.size)
    }

    /// Points reachable from `point` in a single step.
    ///
    /// Empty for off-board points.
    #[must_use]
    pub fn neighbors(&self, point: Point) -> &[Point] {
        self.adjacency
            .get(point.index())
            .map(|n| n.as_slice())
            .unwrap_or(&[])
    }

    /// Capture geometries anchored at `point`.
    ///
    /// Empty for off-board points.
    #[must_use]
    pub fn jumps(&self, point: Point) -> &[Jump] {
        self.jumps
            .get(point.index())
            .map(|j| j.as_slice())
            .unwrap_or(&[])
    }

    #[must_use]
    pub fn are_adjacent(&self, a: Point, b: Point) -> bool {
        self.neighbors(a).contains(&b)
    }

    /// Resolve the jumped-over point for a jump from `src` landing on `landing`.
    #[must_use]
    pub fn jump_over(&self, src: Point, landing: Point) -> Option<Point> {
        self.jumps(src)
            .iter()
            .find(|jump| jump.landing == landing)
            .map(|jump| jump.over)
    }

    /// The four corner points, where tigers start.
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        let n = self.size;
        [
            Point::from_coords(0, 0, n),
            Point::from_coords(0, n.saturating_sub(1), n),
            Point::from_coords(n.saturating_sub(1), 0, n),
            Point::from_coords(n.saturating_sub(1), n.saturating_sub(1), n),
        ]
    }
}

/// Midpoints of the four edges: top, bottom, left, right.
///
/// Uses `k = n / 2`, so even-sized boards take the lower-right middle.
#[must_use]
pub fn edge_midpoints(n: usize) -> [Point; 4] {
    let k = n / 2;
    let last = n.saturating_sub(1);
    [
        Point::from_coords(0, k, n),
        Point::from_coords(last, k, n),
        Point::from_coords(k, 0, n),
        Point::from_coords(k, last, n),
    ]
}

fn step(n: usize, row: usize, col: usize, (dr, dc): (i32, i32)) -> Option<Point> {
    let r = row as i32 + dr;
    let c = col as i32 + dc;
    let bound = n as i32;
    if (0..bound).contains(&r) && (0..bound).contains(&c) {
        Some(Point::from_coords(r as usize, c as usize, n))
    } else {
        None
    }
}

fn build_adjacency(n: usize) -> Vec<SmallVec<[Point; 8]>> {
    Point::all(n)
        .map(|point| {
            let (row, col) = point.coords(n);
            let diagonals: &[(i32, i32)] = if point.is_diagonal_node(n) {
                &DIAGONAL
            } else {
                &[]
            };
            ORTHOGONAL
                .iter()
                .chain(diagonals)
                .filter_map(|&dir| step(n, row, col, dir))
                .collect()
        })
        .collect()
}

fn build_jumps(n: usize, adjacency: &[SmallVec<[Point; 8]>]) -> Vec<SmallVec<[Jump; 8]>> {
    Point::all(n)
        .map(|src| {
            let (r0, c0) = src.coords(n);
            adjacency[src.index()]
                .iter()
                .filter_map(|&over| {
                    let (r1, c1) = over.coords(n);
                    let dir = (r1 as i32 - r0 as i32, c1 as i32 - c0 as i32);
                    let landing = step(n, r1, c1, dir)?;
                    // Both hops must lie on one line through `over`.
                    adjacency[over.index()]
                        .contains(&landing)
                        .then_some(Jump { over, landing })
                })
                .collect()
        })
        .collect()
}
