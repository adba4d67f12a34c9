//! Action representation.
//!
//! An action is one of three verbs over board points:
//! - `Place(dst)`: a goat enters the board (placement phase only)
//! - `Move(src, dst)`: a piece steps along a line to an adjacent point
//! - `Jump(src, dst)`: a tiger leaps over a goat, capturing it
//!
//! The jumped-over point is not part of the action; the engine resolves it
//! from the jump geometry.

use serde::{Deserialize, Serialize};

use super::piece::Side;
use super::point::Point;

/// A complete game action.
///
/// ## Example
///
/// ```
/// use bagh_chal::core::{Action, Point};
///
/// let place = Action::Place(Point(24));
/// let step = Action::Move(Point(0), Point(1));
///
/// assert_eq!(place.dst(), Point(24));
/// assert_eq!(step.src(), Some(Point(0)));
/// assert!(!step.is_capture());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Place(Point),
    Move(Point, Point),
    Jump(Point, Point),
}

impl Action {
    /// Origin point. `None` for placements.
    #[must_use]
    pub const fn src(self) -> Option<Point> {
        match self {
            Action::Place(_) => None,
            Action::Move(src, _) | Action::Jump(src, _) => Some(src),
        }
    }

    /// Destination point.
    #[must_use]
    pub const fn dst(self) -> Point {
        match self {
            Action::Place(dst) | Action::Move(_, dst) | Action::Jump(_, dst) => dst,
        }
    }

    #[must_use]
    pub const fn is_capture(self) -> bool {
        matches!(self, Action::Jump(..))
    }

    /// Every point named by the action.
    pub fn points(self) -> impl Iterator<Item = Point> {
        self.src().into_iter().chain(std::iter::once(self.dst()))
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Place(dst) => write!(f, "place {}", dst),
            Action::Move(src, dst) => write!(f, "move {} -> {}", src, dst),
            Action::Jump(src, dst) => write!(f, "jump {} x> {}", src, dst),
        }
    }
}

/// An applied action with metadata for history tracking.
///
/// Used for:
/// - Move lists in front ends
/// - Replay/debugging
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The side that took this action.
    pub side: Side,

    /// The action taken.
    pub action: Action,

    /// Ply count after the action was applied.
    pub ply: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(side: Side, action: Action, ply: u32) -> Self {
        Self { side, action, ply }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_has_no_src() {
        let action = Action::Place(Point(3));

        assert_eq!(action.src(), None);
        assert_eq!(action.dst(), Point(3));
        assert_eq!(action.points().collect::<Vec<_>>(), vec![Point(3)]);
    }

    #[test]
    fn test_jump_is_capture() {
        let jump = Action::Jump(Point(0), Point(2));
        let step = Action::Move(Point(0), Point(1));

        assert!(jump.is_capture());
        assert!(!step.is_capture());
        assert_eq!(jump.points().collect::<Vec<_>>(), vec![Point(0), Point(2)]);
    }

    #[test]
    fn test_action_equality() {
        assert_eq!(Action::Move(Point(0), Point(1)), Action::Move(Point(0), Point(1)));
        assert_ne!(Action::Move(Point(0), Point(1)), Action::Jump(Point(0), Point(1)));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Action::Place(Point(24))), "place P24");
        assert_eq!(format!("{}", Action::Jump(Point(0), Point(2))), "jump P0 x> P2");
    }

    #[test]
    fn test_action_record_serialization() {
        let record = ActionRecord::new(Side::Tiger, Action::Jump(Point(0), Point(14)), 7);

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: ActionRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, deserialized);
    }
}
