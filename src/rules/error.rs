//! Reasons an action is rejected.

use crate::core::{Action, Point, Side};

use super::engine::Phase;

/// Error returned when an action is illegal in the current state.
///
/// A rejected action never modifies the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ActionError {
    /// The action names a point that is not on the board.
    #[display("Point {} is off the board", _0)]
    OffBoard(Point),

    /// The action kind belongs to the other side (goats never jump, tigers never place).
    #[display("{} cannot {}", side, action)]
    WrongSide { side: Side, action: Action },

    #[display("Cannot {} during the {} phase", action, phase)]
    WrongPhase { action: Action, phase: Phase },

    /// Only further captures are allowed while a chain is in progress.
    #[display("Chain capture in progress at {}", _0)]
    ChainInProgress(Point),

    #[display("Chain capture must continue from {}, not {}", anchor, src)]
    ChainAnchorMismatch { anchor: Point, src: Point },

    #[display("{} does not hold a {}", point, side)]
    NotOwnPiece { point: Point, side: Side },

    #[display("{} is occupied", _0)]
    Occupied(Point),

    #[display("{} and {} are not adjacent", src, dst)]
    NotAdjacent { src: Point, dst: Point },

    #[display("No jump line from {} to {}", src, dst)]
    NoJumpLine { src: Point, dst: Point },

    #[display("No goat to capture at {}", _0)]
    NothingToCapture(Point),

    #[display("Goat at {} is on a sanctuary", _0)]
    Sanctuary(Point),
}

impl std::error::Error for ActionError {}
