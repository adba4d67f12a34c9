//! Rules engine trait and its implementation for `Rules`.
//!
//! Every call takes the state explicitly; the rules themselves never change.
//! `try_apply` validates an action completely before touching the state, so
//! a rejected action leaves the state exactly as it was.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::core::{Action, ActionRecord, Board, GameState, Piece, Point, Rules, Side, ToMove};
use crate::topology::Jump;

use super::error::ActionError;

/// Occurrences of one board configuration that end the game in a draw.
pub const REPETITION_LIMIT: u32 = 3;

/// Game phase, derived from the goat placement counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Goats still entering the board.
    Placement,
    /// All goats placed; goats move along lines.
    Movement,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Placement => write!(f, "placement"),
            Phase::Movement => write!(f, "movement"),
        }
    }
}

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Winner(Side),
    Draw,
}

impl GameResult {
    /// Check if a side won.
    #[must_use]
    pub fn is_winner(&self, side: Side) -> bool {
        matches!(self, GameResult::Winner(s) if *s == side)
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Winner(Side::Goat) => write!(f, "GOAT wins!"),
            GameResult::Winner(Side::Tiger) => write!(f, "TIGER wins!"),
            GameResult::Draw => write!(f, "Draw"),
        }
    }
}

/// Why a game ended, in the order the conditions are checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// The current board has occurred `REPETITION_LIMIT` times (KO).
    Repetition,
    /// Tigers reached the capture target.
    CaptureTarget,
    /// Tiger to move with no legal action.
    TigersTrapped,
    /// Ply cap reached.
    MoveCap,
}

impl Termination {
    #[must_use]
    pub fn result(self) -> GameResult {
        match self {
            Termination::Repetition | Termination::MoveCap => GameResult::Draw,
            Termination::CaptureTarget => GameResult::Winner(Side::Tiger),
            Termination::TigersTrapped => GameResult::Winner(Side::Goat),
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions_for`: empty when the side cannot act; enumeration order
///   is deterministic (point id, then graph order)
/// - `try_apply`: all-or-nothing
/// - `termination`: `None` while the game continues
pub trait RulesEngine {
    /// Current phase.
    fn phase(&self, state: &GameState) -> Phase;

    /// Legal actions for `side`, whether or not it is that side's turn.
    fn legal_actions_for(&self, state: &GameState, side: Side) -> Vec<Action>;

    /// Validate and apply an action.
    fn try_apply(&self, state: &mut GameState, action: Action) -> Result<(), ActionError>;

    /// Check if the game is over, and why.
    fn termination(&self, state: &GameState) -> Option<Termination>;

    // === Convenience Methods ===

    /// Legal actions for the side to move.
    fn legal_actions(&self, state: &GameState) -> Vec<Action> {
        self.legal_actions_for(state, state.side_to_move())
    }

    /// Apply an action, reporting only success.
    fn apply(&self, state: &mut GameState, action: Action) -> bool {
        match self.try_apply(state, action) {
            Ok(()) => true,
            Err(err) => {
                debug!(%action, %err, "action rejected");
                false
            }
        }
    }

    /// Returns `Some(result)` if the game has ended, `None` if it continues.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        self.termination(state).map(Termination::result)
    }
}

impl Rules {
    /// Whether a tiger on the jump's source could take this capture on `board`.
    #[must_use]
    pub fn can_capture(&self, board: &Board, jump: Jump) -> bool {
        board.get(jump.over) == Some(Piece::Goat)
            && !self.is_sanctuary(jump.over)
            && board.is_empty_at(jump.landing)
    }

    /// Captures available to a tiger standing on `src`.
    pub fn captures_from<'a>(
        &'a self,
        board: &'a Board,
        src: Point,
    ) -> impl Iterator<Item = Jump> + 'a {
        self.topology()
            .jumps(src)
            .iter()
            .copied()
            .filter(move |&jump| self.can_capture(board, jump))
    }

    /// Empty points one step from `src`.
    pub fn open_neighbors<'a>(
        &'a self,
        board: &'a Board,
        src: Point,
    ) -> impl Iterator<Item = Point> + 'a {
        self.topology()
            .neighbors(src)
            .iter()
            .copied()
            .filter(move |&dst| board.is_empty_at(dst))
    }

    fn validate_place(&self, state: &GameState, dst: Point) -> Result<(), ActionError> {
        let action = Action::Place(dst);
        let side = state.side_to_move();
        if side != Side::Goat {
            return Err(ActionError::WrongSide { side, action });
        }
        let phase = self.phase(state);
        if phase != Phase::Placement {
            return Err(ActionError::WrongPhase { action, phase });
        }
        if !state.board.is_empty_at(dst) {
            return Err(ActionError::Occupied(dst));
        }
        Ok(())
    }

    fn validate_move(&self, state: &GameState, src: Point, dst: Point) -> Result<(), ActionError> {
        if let Some(anchor) = state.chain_anchor() {
            return Err(ActionError::ChainInProgress(anchor));
        }
        let side = state.side_to_move();
        let phase = self.phase(state);
        // Tigers may step during placement; goats only once all are placed.
        if side == Side::Goat && phase != Phase::Movement {
            return Err(ActionError::WrongPhase {
                action: Action::Move(src, dst),
                phase,
            });
        }
        if state.board.get(src) != Some(side.piece()) {
            return Err(ActionError::NotOwnPiece { point: src, side });
        }
        if !state.board.is_empty_at(dst) {
            return Err(ActionError::Occupied(dst));
        }
        if !self.topology().are_adjacent(src, dst) {
            return Err(ActionError::NotAdjacent { src, dst });
        }
        Ok(())
    }

    /// Returns the captured point.
    fn validate_jump(&self, state: &GameState, src: Point, dst: Point) -> Result<Point, ActionError> {
        let side = state.side_to_move();
        if side != Side::Tiger {
            return Err(ActionError::WrongSide {
                side,
                action: Action::Jump(src, dst),
            });
        }
        if let Some(anchor) = state.chain_anchor() {
            if src != anchor {
                return Err(ActionError::ChainAnchorMismatch { anchor, src });
            }
        }
        let over = self
            .topology()
            .jump_over(src, dst)
            .ok_or(ActionError::NoJumpLine { src, dst })?;
        if state.board.get(src) != Some(Piece::Tiger) {
            return Err(ActionError::NotOwnPiece { point: src, side });
        }
        if state.board.get(over) != Some(Piece::Goat) {
            return Err(ActionError::NothingToCapture(over));
        }
        if !state.board.is_empty_at(dst) {
            return Err(ActionError::Occupied(dst));
        }
        if self.is_sanctuary(over) {
            return Err(ActionError::Sanctuary(over));
        }
        Ok(over)
    }
}

impl RulesEngine for Rules {
    fn phase(&self, state: &GameState) -> Phase {
        if state.goats_placed < self.goats_to_place() {
            Phase::Placement
        } else {
            Phase::Movement
        }
    }

    fn legal_actions_for(&self, state: &GameState, side: Side) -> Vec<Action> {
        let board = &state.board;
        let mut actions = Vec::new();

        match side {
            Side::Goat => {
                if state.is_chain_active() {
                    return actions;
                }
                match self.phase(state) {
                    Phase::Placement => {
                        actions.extend(board.points_with(Piece::Empty).map(Action::Place));
                    }
                    Phase::Movement => {
                        for src in board.points_with(Piece::Goat) {
                            actions.extend(
                                self.open_neighbors(board, src).map(|dst| Action::Move(src, dst)),
                            );
                        }
                    }
                }
            }
            Side::Tiger => {
                if let Some(anchor) = state.chain_anchor() {
                    actions.extend(
                        self.captures_from(board, anchor)
                            .map(|jump| Action::Jump(anchor, jump.landing)),
                    );
                    return actions;
                }
                for src in board.points_with(Piece::Tiger) {
                    actions.extend(self.open_neighbors(board, src).map(|dst| Action::Move(src, dst)));
                    actions.extend(
                        self.captures_from(board, src)
                            .map(|jump| Action::Jump(src, jump.landing)),
                    );
                }
            }
        }

        actions
    }

    #[instrument(level = "debug", skip(self, state), fields(side = %state.side_to_move(), ply = state.ply))]
    fn try_apply(&self, state: &mut GameState, action: Action) -> Result<(), ActionError> {
        if let Some(point) = action.points().find(|&p| !self.topology().contains(p)) {
            return Err(ActionError::OffBoard(point));
        }

        let side = state.side_to_move();
        match action {
            Action::Place(dst) => {
                self.validate_place(state, dst)?;
                state.board.set(dst, Piece::Goat);
                state.goats_placed += 1;
                state.to_move = ToMove::Tiger;
            }
            Action::Move(src, dst) => {
                self.validate_move(state, src, dst)?;
                state.board.set(src, Piece::Empty);
                state.board.set(dst, side.piece());
                state.to_move = ToMove::turn(side.opponent());
            }
            Action::Jump(src, dst) => {
                let over = self.validate_jump(state, src, dst)?;
                state.board.set(src, Piece::Empty);
                state.board.set(over, Piece::Empty);
                state.board.set(dst, Piece::Tiger);
                state.goats_captured += 1;

                let continues =
                    self.multi_jump() && self.captures_from(&state.board, dst).next().is_some();
                state.to_move = if continues {
                    debug!(anchor = %dst, "chain capture continues");
                    ToMove::TigerChain(dst)
                } else {
                    ToMove::Goat
                };
            }
        }

        state.ply = state.ply.saturating_add(1);
        state.history.push_back(ActionRecord::new(side, action, state.ply));
        if self.ko() {
            state.record_position();
        }
        Ok(())
    }

    fn termination(&self, state: &GameState) -> Option<Termination> {
        if self.ko() && state.current_repetitions() >= REPETITION_LIMIT {
            return Some(Termination::Repetition);
        }
        if state.goats_captured >= self.capture_to_win() {
            return Some(Termination::CaptureTarget);
        }
        // A goat with no legal action does not lose; only tigers can be trapped.
        if state.side_to_move() == Side::Tiger
            && self.legal_actions_for(state, Side::Tiger).is_empty()
        {
            return Some(Termination::TigersTrapped);
        }
        if state.ply >= self.move_cap() {
            return Some(Termination::MoveCap);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RulesBuilder;

    /// Position with the given goats and tigers on a 7×7 board.
    fn position(
        rules: &Rules,
        goats: &[u16],
        tigers: &[u16],
        goats_placed: u32,
        goats_captured: u32,
        to_move: ToMove,
    ) -> GameState {
        let mut board = Board::new(rules.board_size());
        for &g in goats {
            board.set(Point(g), Piece::Goat);
        }
        for &t in tigers {
            board.set(Point(t), Piece::Tiger);
        }
        GameState::from_position(rules, board, goats_placed, goats_captured, to_move).unwrap()
    }

    #[test]
    fn test_phase_follows_placement_counter() {
        let rules = Rules::default_7x7();
        let state = GameState::initial(&rules);
        assert_eq!(rules.phase(&state), Phase::Placement);

        let goats: Vec<u16> = (7..37).collect();
        let full = position(&rules, &goats, &[0, 6, 42, 48], 30, 0, ToMove::Goat);
        assert_eq!(rules.phase(&full), Phase::Movement);
    }

    #[test]
    fn test_initial_legal_actions() {
        let rules = Rules::default_7x7();
        let state = GameState::initial(&rules);

        let goat_actions = rules.legal_actions(&state);
        assert_eq!(goat_actions.len(), 45);
        assert!(goat_actions.iter().all(|a| matches!(a, Action::Place(_))));

        // Each corner tiger has three open neighbors and nothing to capture.
        let tiger_actions = rules.legal_actions_for(&state, Side::Tiger);
        assert_eq!(tiger_actions.len(), 12);
        assert!(tiger_actions.iter().all(|a| matches!(a, Action::Move(..))));
    }

    #[test]
    fn test_place_then_tiger_move() {
        let rules = Rules::default_7x7();
        let mut state = GameState::initial(&rules);

        assert!(rules.apply(&mut state, Action::Place(Point(24))));
        assert_eq!(state.goats_placed(), 1);
        assert_eq!(state.side_to_move(), Side::Tiger);
        assert_eq!(state.ply(), 1);

        assert!(rules.apply(&mut state, Action::Move(Point(0), Point(1))));
        assert_eq!(state.side_to_move(), Side::Goat);
        assert_eq!(state.board()[Point(1)], Piece::Tiger);
        assert!(state.board().is_empty_at(Point(0)));
        assert_eq!(state.history().len(), 2);
        assert_eq!(state.history()[1], ActionRecord::new(Side::Tiger, Action::Move(Point(0), Point(1)), 2));
    }

    #[test]
    fn test_wrong_side_and_phase() {
        let rules = Rules::default_7x7();
        let mut state = GameState::initial(&rules);

        assert!(matches!(
            rules.try_apply(&mut state, Action::Move(Point(0), Point(1))),
            Err(ActionError::WrongPhase { phase: Phase::Placement, .. })
        ));
        assert!(matches!(
            rules.try_apply(&mut state, Action::Jump(Point(0), Point(2))),
            Err(ActionError::WrongSide { side: Side::Goat, .. })
        ));

        rules.apply(&mut state, Action::Place(Point(24)));
        assert!(matches!(
            rules.try_apply(&mut state, Action::Place(Point(10))),
            Err(ActionError::WrongSide { side: Side::Tiger, .. })
        ));
    }

    #[test]
    fn test_goat_cannot_move_during_placement() {
        let rules = Rules::default_7x7();
        let mut state = position(&rules, &[24], &[0, 6, 42, 48], 1, 0, ToMove::Goat);

        assert_eq!(
            rules.try_apply(&mut state, Action::Move(Point(24), Point(25))),
            Err(ActionError::WrongPhase {
                action: Action::Move(Point(24), Point(25)),
                phase: Phase::Placement,
            })
        );
    }

    #[test]
    fn test_move_requires_adjacency() {
        let rules = Rules::default_7x7();
        let mut state = position(&rules, &[], &[1, 6, 42, 48], 0, 0, ToMove::Tiger);

        // (0,1) is odd parity: no diagonal line to (1,2).
        assert_eq!(
            rules.try_apply(&mut state, Action::Move(Point(1), Point(9))),
            Err(ActionError::NotAdjacent { src: Point(1), dst: Point(9) })
        );
        assert!(rules.apply(&mut state, Action::Move(Point(1), Point(8))));
    }

    #[test]
    fn test_off_board_rejected() {
        let rules = Rules::default_7x7();
        let mut state = GameState::initial(&rules);

        assert_eq!(
            rules.try_apply(&mut state, Action::Place(Point(49))),
            Err(ActionError::OffBoard(Point(49)))
        );
    }

    #[test]
    fn test_single_jump_captures() {
        let rules = Rules::default_7x7();
        let mut state = position(&rules, &[8], &[0, 6, 42, 48], 1, 0, ToMove::Tiger);

        assert!(rules.legal_actions(&state).contains(&Action::Jump(Point(0), Point(16))));
        assert!(rules.apply(&mut state, Action::Jump(Point(0), Point(16))));

        assert_eq!(state.goats_captured(), 1);
        assert!(state.board().is_empty_at(Point(8)));
        assert!(state.board().is_empty_at(Point(0)));
        assert_eq!(state.board()[Point(16)], Piece::Tiger);
        assert_eq!(state.to_move(), ToMove::Goat);
    }

    #[test]
    fn test_chain_capture_continues() {
        let rules = Rules::default_7x7();
        let mut state = position(&rules, &[8, 24], &[0, 6, 42, 48], 2, 0, ToMove::Tiger);

        assert!(rules.apply(&mut state, Action::Jump(Point(0), Point(16))));
        assert_eq!(state.to_move(), ToMove::TigerChain(Point(16)));
        assert_eq!(rules.legal_actions(&state), vec![Action::Jump(Point(16), Point(32))]);
        assert!(rules.legal_actions_for(&state, Side::Goat).is_empty());

        // Only the anchored tiger may continue, and only by capturing.
        assert_eq!(
            rules.try_apply(&mut state, Action::Move(Point(16), Point(17))),
            Err(ActionError::ChainInProgress(Point(16)))
        );
        assert_eq!(
            rules.try_apply(&mut state, Action::Jump(Point(6), Point(18))),
            Err(ActionError::ChainAnchorMismatch { anchor: Point(16), src: Point(6) })
        );

        assert!(rules.apply(&mut state, Action::Jump(Point(16), Point(32))));
        assert_eq!(state.goats_captured(), 2);
        assert_eq!(state.to_move(), ToMove::Goat);
        assert_eq!(state.goats_on_board(), 0);
    }

    #[test]
    fn test_chain_disabled_passes_turn() {
        let rules = RulesBuilder::new().multi_jump(false).build().unwrap();
        let mut state = position(&rules, &[8, 24], &[0, 6, 42, 48], 2, 0, ToMove::Tiger);

        assert!(rules.apply(&mut state, Action::Jump(Point(0), Point(16))));
        assert_eq!(state.to_move(), ToMove::Goat);
    }

    #[test]
    fn test_sanctuary_blocks_capture() {
        let rules = Rules::default_7x7();
        let mut state = position(&rules, &[3], &[4], 1, 0, ToMove::Tiger);

        assert!(!rules.legal_actions(&state).iter().any(|a| a.is_capture()));
        assert_eq!(
            rules.try_apply(&mut state, Action::Jump(Point(4), Point(2))),
            Err(ActionError::Sanctuary(Point(3)))
        );

        let open = RulesBuilder::new().sanctuaries([]).build().unwrap();
        let mut state = position(&open, &[3], &[4], 1, 0, ToMove::Tiger);
        assert!(open.apply(&mut state, Action::Jump(Point(4), Point(2))));
    }

    #[test]
    fn test_jump_geometry_errors() {
        let rules = Rules::default_7x7();
        let mut state = position(&rules, &[8], &[0], 1, 0, ToMove::Tiger);

        assert_eq!(
            rules.try_apply(&mut state, Action::Jump(Point(0), Point(9))),
            Err(ActionError::NoJumpLine { src: Point(0), dst: Point(9) })
        );
        assert_eq!(
            rules.try_apply(&mut state, Action::Jump(Point(0), Point(2))),
            Err(ActionError::NothingToCapture(Point(1)))
        );
    }

    #[test]
    fn test_failed_apply_is_idempotent() {
        let rules = Rules::default_7x7();
        let mut state = position(&rules, &[8, 16], &[0, 6, 42, 48], 2, 0, ToMove::Tiger);
        let before = state.clone();

        assert!(!rules.apply(&mut state, Action::Jump(Point(0), Point(16))));
        assert!(!rules.apply(&mut state, Action::Jump(Point(0), Point(16))));
        assert_eq!(state, before);
    }

    #[test]
    fn test_terminal_capture_target() {
        let rules = Rules::default_7x7();
        let state = position(&rules, &[], &[0, 6, 42, 48], 8, 8, ToMove::Goat);

        assert_eq!(rules.termination(&state), Some(Termination::CaptureTarget));
        assert_eq!(rules.is_terminal(&state), Some(GameResult::Winner(Side::Tiger)));
    }

    #[test]
    fn test_terminal_tigers_trapped() {
        let rules = Rules::default_7x7();
        let state = position(&rules, &[1, 2, 7, 8, 14, 16], &[0], 6, 0, ToMove::Tiger);

        assert!(rules.legal_actions(&state).is_empty());
        assert_eq!(rules.is_terminal(&state), Some(GameResult::Winner(Side::Goat)));
    }

    #[test]
    fn test_goat_without_moves_is_not_terminal() {
        let rules = RulesBuilder::new().goats_to_place(1).capture_to_win(1).build().unwrap();
        let state = position(&rules, &[0], &[1, 7, 8], 1, 0, ToMove::Goat);

        assert!(rules.legal_actions(&state).is_empty());
        assert_eq!(rules.is_terminal(&state), None);
    }

    #[test]
    fn test_terminal_move_cap() {
        let rules = Rules::default_7x7();

        let almost = GameState::initial(&rules).with_ply(1199);
        assert_eq!(rules.is_terminal(&almost), None);

        let capped = GameState::initial(&rules).with_ply(1200);
        assert_eq!(rules.termination(&capped), Some(Termination::MoveCap));
        assert_eq!(rules.is_terminal(&capped), Some(GameResult::Draw));
    }

    #[test]
    fn test_ply_counter_saturates() {
        let rules = Rules::default_7x7();
        let mut state = GameState::initial(&rules).with_ply(u32::MAX);

        assert!(rules.apply(&mut state, Action::Place(Point(24))));
        assert_eq!(state.ply(), u32::MAX);
        assert_eq!(state.history()[0].ply, u32::MAX);
        assert_eq!(rules.termination(&state), Some(Termination::MoveCap));
    }

    #[test]
    fn test_initial_not_terminal() {
        let rules = Rules::default_7x7();
        assert_eq!(rules.is_terminal(&GameState::initial(&rules)), None);
    }

    #[test]
    fn test_ko_disabled_skips_table() {
        let rules = RulesBuilder::new().ko(false).build().unwrap();
        let mut state = GameState::initial(&rules);

        rules.apply(&mut state, Action::Place(Point(24)));
        assert_eq!(state.distinct_positions(), 1);
    }

    #[test]
    fn test_game_result_is_winner() {
        assert!(GameResult::Winner(Side::Goat).is_winner(Side::Goat));
        assert!(!GameResult::Winner(Side::Goat).is_winner(Side::Tiger));
        assert!(!GameResult::Draw.is_winner(Side::Tiger));
        assert_eq!(format!("{}", GameResult::Winner(Side::Tiger)), "TIGER wins!");
    }
}
