//! Rule configuration.
//!
//! A `Rules` value bundles everything fixed for the length of a game:
//! - board topology (adjacency and jump graphs)
//! - goat quota and capture target
//! - sanctuary points
//! - optional rule modules (multi-jump chains, KO repetition draws)
//!
//! Rules are immutable. Changing a parameter means building a new `Rules`
//! with `RulesBuilder` and starting a fresh `GameState`.

use rustc_hash::FxHashSet;

use super::point::{Point, MAX_BOARD_SIZE};
use crate::topology::{edge_midpoints, Topology};

/// Default board side length.
pub const DEFAULT_BOARD_SIZE: usize = 7;

/// Default number of goats placed before movement begins.
pub const DEFAULT_GOATS_TO_PLACE: u32 = 30;

/// Default number of captures that wins the game for tigers.
pub const DEFAULT_CAPTURE_TO_WIN: u32 = 8;

/// Default ply count after which the game is drawn.
pub const DEFAULT_MOVE_CAP: u32 = 1200;

/// Error building a rule configuration.
#[derive(Clone, Debug, PartialEq, Eq, derive_more::Display)]
pub enum ConfigError {
    /// Four distinct tiger corners need at least a 2×2 board.
    #[display("Board size {} is too small (minimum 2)", _0)]
    BoardTooSmall(usize),

    /// Point ids cannot address a board this large.
    #[display("Board size {} is too large (maximum {})", _0, MAX_BOARD_SIZE)]
    BoardTooLarge(usize),

    /// Tigers would win before moving.
    #[display("Capture target must be at least 1")]
    ZeroCaptureTarget,

    /// More captures required than goats will ever exist.
    #[display("Capture target {} exceeds goat quota {}", capture_to_win, goats_to_place)]
    UnreachableCaptureTarget {
        capture_to_win: u32,
        goats_to_place: u32,
    },

    #[display("Sanctuary {} is off a {}x{} board", point, size, size)]
    SanctuaryOffBoard { point: Point, size: usize },
}

impl std::error::Error for ConfigError {}

/// Complete, immutable rule configuration.
///
/// Build with `Rules::default_7x7()` or `RulesBuilder`.
#[derive(Clone, Debug)]
pub struct Rules {
    topology: Topology,
    goats_to_place: u32,
    capture_to_win: u32,
    move_cap: u32,
    sanctuaries: FxHashSet<Point>,
    multi_jump: bool,
    ko: bool,
}

impl Rules {
    /// The standard 7×7 variant: 30 goats, 8 captures to win, edge-midpoint
    /// sanctuaries, multi-jump and KO both on.
    #[must_use]
    pub fn default_7x7() -> Self {
        let topology = Topology::build(DEFAULT_BOARD_SIZE);
        Self {
            sanctuaries: edge_midpoints(DEFAULT_BOARD_SIZE).into_iter().collect(),
            topology,
            goats_to_place: DEFAULT_GOATS_TO_PLACE,
            capture_to_win: DEFAULT_CAPTURE_TO_WIN,
            move_cap: DEFAULT_MOVE_CAP,
            multi_jump: true,
            ko: true,
        }
    }

    /// Start a builder from the default 7×7 settings.
    pub fn builder() -> RulesBuilder {
        RulesBuilder::new()
    }

    #[must_use]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Board side length.
    #[must_use]
    pub fn board_size(&self) -> usize {
        self.topology.size()
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.topology.point_count()
    }

    #[must_use]
    pub fn goats_to_place(&self) -> u32 {
        self.goats_to_place
    }

    #[must_use]
    pub fn capture_to_win(&self) -> u32 {
        self.capture_to_win
    }

    /// Ply count at which the game is declared drawn.
    #[must_use]
    pub fn move_cap(&self) -> u32 {
        self.move_cap
    }

    #[must_use]
    pub fn sanctuaries(&self) -> &FxHashSet<Point> {
        &self.sanctuaries
    }

    /// Goats on a sanctuary can never be jumped.
    #[must_use]
    pub fn is_sanctuary(&self, point: Point) -> bool {
        self.sanctuaries.contains(&point)
    }

    /// Chain captures enabled.
    #[must_use]
    pub fn multi_jump(&self) -> bool {
        self.multi_jump
    }

    /// Threefold-repetition draws enabled.
    #[must_use]
    pub fn ko(&self) -> bool {
        self.ko
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::default_7x7()
    }
}

/// Builder for alternate rule sets.
///
/// Starts from the 7×7 defaults. Sanctuaries default to the edge midpoints
/// of whatever board size is finally chosen.
#[derive(Clone, Debug)]
pub struct RulesBuilder {
    board_size: usize,
    goats_to_place: u32,
    capture_to_win: u32,
    move_cap: u32,
    sanctuaries: Option<Vec<Point>>,
    multi_jump: bool,
    ko: bool,
}

impl Default for RulesBuilder {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            goats_to_place: DEFAULT_GOATS_TO_PLACE,
            capture_to_win: DEFAULT_CAPTURE_TO_WIN,
            move_cap: DEFAULT_MOVE_CAP,
            sanctuaries: None,
            multi_jump: true,
            ko: true,
        }
    }
}

impl RulesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn board_size(mut self, size: usize) -> Self {
        self.board_size = size;
        self
    }

    #[must_use]
    pub fn goats_to_place(mut self, count: u32) -> Self {
        self.goats_to_place = count;
        self
    }

    #[must_use]
    pub fn capture_to_win(mut self, count: u32) -> Self {
        self.capture_to_win = count;
        self
    }

    #[must_use]
    pub fn move_cap(mut self, plies: u32) -> Self {
        self.move_cap = plies;
        self
    }

    /// Replace the sanctuary set. Pass an empty iterator for none.
    #[must_use]
    pub fn sanctuaries(mut self, points: impl IntoIterator<Item = Point>) -> Self {
        self.sanctuaries = Some(points.into_iter().collect());
        self
    }

    #[must_use]
    pub fn multi_jump(mut self, enabled: bool) -> Self {
        self.multi_jump = enabled;
        self
    }

    #[must_use]
    pub fn ko(mut self, enabled: bool) -> Self {
        self.ko = enabled;
        self
    }

    /// Validate and build the rules.
    pub fn build(self) -> Result<Rules, ConfigError> {
        if self.board_size < 2 {
            return Err(ConfigError::BoardTooSmall(self.board_size));
        }
        if self.board_size > MAX_BOARD_SIZE {
            return Err(ConfigError::BoardTooLarge(self.board_size));
        }
        if self.capture_to_win == 0 {
            return Err(ConfigError::ZeroCaptureTarget);
        }
        if self.capture_to_win > self.goats_to_place {
            return Err(ConfigError::UnreachableCaptureTarget {
                capture_to_win: self.capture_to_win,
                goats_to_place: self.goats_to_place,
            });
        }

        let sanctuaries = match self.sanctuaries {
            Some(points) => points,
            None => edge_midpoints(self.board_size).to_vec(),
        };
        if let Some(&point) = sanctuaries.iter().find(|p| !p.on_board(self.board_size)) {
            return Err(ConfigError::SanctuaryOffBoard {
                point,
                size: self.board_size,
            });
        }

        Ok(Rules {
            topology: Topology::build(self.board_size),
            goats_to_place: self.goats_to_place,
            capture_to_win: self.capture_to_win,
            move_cap: self.move_cap,
            sanctuaries: sanctuaries.into_iter().collect(),
            multi_jump: self.multi_jump,
            ko: self.ko,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = Rules::default_7x7();

        assert_eq!(rules.board_size(), 7);
        assert_eq!(rules.point_count(), 49);
        assert_eq!(rules.goats_to_place(), 30);
        assert_eq!(rules.capture_to_win(), 8);
        assert_eq!(rules.move_cap(), 1200);
        assert!(rules.multi_jump());
        assert!(rules.ko());

        for p in [3, 45, 21, 27] {
            assert!(rules.is_sanctuary(Point(p)));
        }
        assert_eq!(rules.sanctuaries().len(), 4);
        assert!(!rules.is_sanctuary(Point(24)));
    }

    #[test]
    fn test_builder_overrides() {
        let rules = RulesBuilder::new()
            .goats_to_place(24)
            .capture_to_win(6)
            .multi_jump(false)
            .ko(false)
            .move_cap(50)
            .build()
            .unwrap();

        assert_eq!(rules.goats_to_place(), 24);
        assert_eq!(rules.capture_to_win(), 6);
        assert_eq!(rules.move_cap(), 50);
        assert!(!rules.multi_jump());
        assert!(!rules.ko());
    }

    #[test]
    fn test_builder_sanctuaries_follow_size() {
        let rules = RulesBuilder::new().board_size(5).build().unwrap();

        assert_eq!(rules.point_count(), 25);
        for p in edge_midpoints(5) {
            assert!(rules.is_sanctuary(p));
        }
    }

    #[test]
    fn test_builder_custom_sanctuaries() {
        let rules = Rules::builder().sanctuaries([Point(24)]).build().unwrap();
        assert!(rules.is_sanctuary(Point(24)));
        assert!(!rules.is_sanctuary(Point(3)));

        let none = Rules::builder().sanctuaries([]).build().unwrap();
        assert!(none.sanctuaries().is_empty());
    }

    #[test]
    fn test_builder_rejects_bad_settings() {
        assert_eq!(
            RulesBuilder::new().board_size(1).build().unwrap_err(),
            ConfigError::BoardTooSmall(1)
        );
        assert_eq!(
            RulesBuilder::new().board_size(300).build().unwrap_err(),
            ConfigError::BoardTooLarge(300)
        );
        assert_eq!(
            RulesBuilder::new().board_size(MAX_BOARD_SIZE + 1).build().unwrap_err(),
            ConfigError::BoardTooLarge(256)
        );
        assert!(RulesBuilder::new().board_size(MAX_BOARD_SIZE).build().is_ok());
        assert_eq!(
            RulesBuilder::new().capture_to_win(0).build().unwrap_err(),
            ConfigError::ZeroCaptureTarget
        );
        assert!(matches!(
            RulesBuilder::new().goats_to_place(5).capture_to_win(6).build(),
            Err(ConfigError::UnreachableCaptureTarget { .. })
        ));
        assert_eq!(
            RulesBuilder::new().sanctuaries([Point(49)]).build().unwrap_err(),
            ConfigError::SanctuaryOffBoard { point: Point(49), size: 7 }
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::UnreachableCaptureTarget {
            capture_to_win: 9,
            goats_to_place: 4,
        };
        assert_eq!(err.to_string(), "Capture target 9 exceeds goat quota 4");
        assert_eq!(
            ConfigError::BoardTooLarge(300).to_string(),
            "Board size 300 is too large (maximum 255)"
        );
    }
}
