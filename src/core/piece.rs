//! Sides and board contents.
//!
//! ## Side
//!
//! The two players: goats place and herd, tigers hunt.
//!
//! ## Piece
//!
//! What occupies a single point. `Rock` is reserved for blocked terrain and
//! is never placed by the current rules.

use serde::{Deserialize, Serialize};

/// One of the two sides of the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Goat,
    Tiger,
}

impl Side {
    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Goat => Side::Tiger,
            Side::Tiger => Side::Goat,
        }
    }

    /// The piece this side moves.
    #[must_use]
    pub const fn piece(self) -> Piece {
        match self {
            Side::Goat => Piece::Goat,
            Side::Tiger => Piece::Tiger,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Goat => write!(f, "goat"),
            Side::Tiger => write!(f, "tiger"),
        }
    }
}

/// Contents of a single board point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Piece {
    #[default]
    Empty,
    Goat,
    Tiger,
    /// Impassable terrain. Defined for future variants; never placed today.
    Rock,
}

impl Piece {
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Piece::Empty)
    }

    /// The side owning this piece, if any.
    #[must_use]
    pub const fn side(self) -> Option<Side> {
        match self {
            Piece::Goat => Some(Side::Goat),
            Piece::Tiger => Some(Side::Tiger),
            Piece::Empty | Piece::Rock => None,
        }
    }

    /// Single-character glyph used by `Board`'s `Display`.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Piece::Empty => '.',
            Piece::Goat => 'G',
            Piece::Tiger => 'T',
            Piece::Rock => '#',
        }
    }
}
