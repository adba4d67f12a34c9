//! Board point identification.
//!
//! Every intersection of the board has a `Point` id.
//!
//! ## ID Layout
//!
//! Points are numbered row-major: `row * n + col` for a board of side `n`,
//! so a 7×7 board uses ids `0..49`. The side length is **passed in**, never
//! hardcoded, so the same type serves every board up to `MAX_BOARD_SIZE`.
//!
//! ```
//! use bagh_chal::core::Point;
//!
//! let center = Point::from_coords(3, 3, 7);
//! assert_eq!(center, Point(24));
//! assert_eq!(center.coords(7), (3, 3));
//! ```

use serde::{Deserialize, Serialize};

/// Largest board side whose points all fit a `Point` id (255 × 255 = 65025).
pub const MAX_BOARD_SIZE: usize = 255;

/// Identifier of a board point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Point(pub u16);

impl Point {
    /// Create a point from `(row, col)` on a board of side `n`.
    #[must_use]
    pub const fn from_coords(row: usize, col: usize, n: usize) -> Self {
        Self((row * n + col) as u16)
    }

    /// Row-major index into a board's cell array.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// `(row, col)` of this point on a board of side `n`.
    #[must_use]
    pub const fn coords(self, n: usize) -> (usize, usize) {
        (self.index() / n, self.index() % n)
    }

    #[must_use]
    pub const fn row(self, n: usize) -> usize {
        self.index() / n
    }

    #[must_use]
    pub const fn col(self, n: usize) -> usize {
        self.index() % n
    }

    /// Check whether this point lies on a board of side `n`.
    #[must_use]
    pub const fn on_board(self, n: usize) -> bool {
        self.index() < n * n
    }

    /// "Intersection" parity: these points connect diagonally as well.
    #[must_use]
    pub const fn is_diagonal_node(self, n: usize) -> bool {
        (self.row(n) + self.col(n)) % 2 == 0
    }

    /// Iterate over every point on a board of side `n`, in id order.
    ///
    /// Empty when `n` exceeds `MAX_BOARD_SIZE`.
    pub fn all(n: usize) -> impl Iterator<Item = Point> {
        let count = if n <= MAX_BOARD_SIZE { n * n } else { 0 };
        (0..count).map(|id| Point(id as u16))
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0)
    }
}
