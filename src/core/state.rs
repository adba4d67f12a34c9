//! Game state.
//!
//! ## Board
//!
//! One `Piece` per point, row-major. Boards are hashable so the exact
//! configuration can key the repetition table.
//!
//! ## GameState
//!
//! Complete game state:
//! - Board contents
//! - Goat placement/capture counters
//! - Side to move, including an in-progress chain capture
//! - Ply counter
//! - Repetition table (every board ever reached)
//! - Action history
//!
//! Fields are read through accessors; only the rules engine mutates them.

use im::{HashMap as ImHashMap, Vector};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::ActionRecord;
use super::config::Rules;
use super::piece::{Piece, Side};
use super::point::Point;

/// Board contents.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<Piece>,
}

impl Board {
    /// Create an empty board of side `size`.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Piece::Empty; size * size],
        }
    }

    /// Board side length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Piece at `point`, or `None` off the board.
    #[must_use]
    pub fn get(&self, point: Point) -> Option<Piece> {
        self.cells.get(point.index()).copied()
    }

    #[must_use]
    pub fn is_empty_at(&self, point: Point) -> bool {
        self.get(point) == Some(Piece::Empty)
    }

    /// Put `piece` on `point`. Off-board points are ignored.
    pub fn set(&mut self, point: Point, piece: Piece) {
        if let Some(cell) = self.cells.get_mut(point.index()) {
            *cell = piece;
        }
    }

    #[must_use]
    pub fn cells(&self) -> &[Piece] {
        &self.cells
    }

    /// Number of points holding `piece`.
    #[must_use]
    pub fn count(&self, piece: Piece) -> usize {
        self.cells.iter().filter(|&&c| c == piece).count()
    }

    /// Points holding `piece`, in id order.
    pub fn points_with(&self, piece: Piece) -> impl Iterator<Item = Point> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, c)| **c == piece)
            .map(|(i, _)| Point(i as u16))
    }

    /// Apply `edits`, run `f` on the edited board, then restore every edited
    /// point to its prior contents.
    ///
    /// The restore runs from a drop guard, so it also happens if `f` panics.
    ///
    /// ```
    /// use bagh_chal::core::{Board, Piece, Point};
    ///
    /// let mut board = Board::new(7);
    /// let goats = board.probe(&[(Point(24), Piece::Goat)], |b| b.count(Piece::Goat));
    ///
    /// assert_eq!(goats, 1);
    /// assert!(board.is_empty_at(Point(24)));
    /// ```
    pub fn probe<R>(&mut self, edits: &[(Point, Piece)], f: impl FnOnce(&Board) -> R) -> R {
        let mut guard = ProbeGuard {
            board: self,
            saved: SmallVec::new(),
        };
        for &(point, piece) in edits {
            if let Some(prior) = guard.board.get(point) {
                guard.saved.push((point, prior));
                guard.board.set(point, piece);
            }
        }
        f(&*guard.board)
    }
}

impl std::ops::Index<Point> for Board {
    type Output = Piece;

    fn index(&self, point: Point) -> &Piece {
        &self.cells[point.index()]
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.chunks(self.size.max(1)) {
            let line: String = row.iter().map(|p| p.glyph()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

struct ProbeGuard<'a> {
    board: &'a mut Board,
    saved: SmallVec<[(Point, Piece); 4]>,
}

impl Drop for ProbeGuard<'_> {
    fn drop(&mut self) {
        // Reverse order so repeated points end at their original value.
        for &(point, piece) in self.saved.iter().rev() {
            self.board.set(point, piece);
        }
    }
}

/// Who acts next.
///
/// A chain capture belongs to the tiger's turn, so "goat to move with a chain
/// in progress" cannot be expressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToMove {
    Goat,
    Tiger,
    /// Tiger is mid multi-jump; only further captures from this point are legal.
    TigerChain(Point),
}

impl ToMove {
    #[must_use]
    pub const fn side(self) -> Side {
        match self {
            ToMove::Goat => Side::Goat,
            ToMove::Tiger | ToMove::TigerChain(_) => Side::Tiger,
        }
    }

    /// Anchor point of an in-progress chain capture.
    #[must_use]
    pub const fn chain_anchor(self) -> Option<Point> {
        match self {
            ToMove::TigerChain(anchor) => Some(anchor),
            ToMove::Goat | ToMove::Tiger => None,
        }
    }

    /// Plain turn for `side`, no chain.
    #[must_use]
    pub const fn turn(side: Side) -> Self {
        match side {
            Side::Goat => ToMove::Goat,
            Side::Tiger => ToMove::Tiger,
        }
    }
}

/// Error setting up a custom position.
#[derive(Clone, Debug, PartialEq, Eq, derive_more::Display)]
pub enum SetupError {
    #[display("Board is {}x{}, rules expect {}x{}", board, board, rules, rules)]
    SizeMismatch { board: usize, rules: usize },

    /// Goats on board must equal placed minus captured.
    #[display("{} goats on board, counters imply {}", on_board, expected)]
    GoatCountMismatch { on_board: usize, expected: i64 },

    #[display("Chain anchor {} does not hold a tiger", _0)]
    ChainWithoutTiger(Point),
}

impl std::error::Error for SetupError {}

/// Full game state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) goats_placed: u32,
    pub(crate) goats_captured: u32,
    pub(crate) to_move: ToMove,
    pub(crate) ply: u32,
    /// Times each board configuration has occurred.
    pub(crate) repetitions: ImHashMap<Board, u32>,
    /// Successfully applied actions, oldest first.
    pub(crate) history: Vector<ActionRecord>,
}

impl GameState {
    /// Starting position: tigers on the four corners, goat to move.
    #[must_use]
    pub fn initial(rules: &Rules) -> Self {
        let mut board = Board::new(rules.board_size());
        for corner in rules.topology().corners() {
            board.set(corner, Piece::Tiger);
        }
        Self::with_board(board, 0, 0, ToMove::Goat)
    }

    /// Set up an arbitrary position (puzzles, tests, analysis).
    ///
    /// The given board counts as its first occurrence.
    pub fn from_position(
        rules: &Rules,
        board: Board,
        goats_placed: u32,
        goats_captured: u32,
        to_move: ToMove,
    ) -> Result<Self, SetupError> {
        if board.size() != rules.board_size() {
            return Err(SetupError::SizeMismatch {
                board: board.size(),
                rules: rules.board_size(),
            });
        }

        let expected = i64::from(goats_placed) - i64::from(goats_captured);
        let on_board = board.count(Piece::Goat);
        if on_board as i64 != expected {
            return Err(SetupError::GoatCountMismatch { on_board, expected });
        }

        if let Some(anchor) = to_move.chain_anchor() {
            if board.get(anchor) != Some(Piece::Tiger) {
                return Err(SetupError::ChainWithoutTiger(anchor));
            }
        }

        Ok(Self::with_board(board, goats_placed, goats_captured, to_move))
    }

    fn with_board(board: Board, goats_placed: u32, goats_captured: u32, to_move: ToMove) -> Self {
        let mut repetitions = ImHashMap::new();
        repetitions.insert(board.clone(), 1);
        Self {
            board,
            goats_placed,
            goats_captured,
            to_move,
            ply: 0,
            repetitions,
            history: Vector::new(),
        }
    }

    /// Override the ply counter of a freshly set-up position.
    #[must_use]
    pub fn with_ply(mut self, ply: u32) -> Self {
        self.ply = ply;
        self
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn goats_placed(&self) -> u32 {
        self.goats_placed
    }

    #[must_use]
    pub fn goats_captured(&self) -> u32 {
        self.goats_captured
    }

    /// Goats currently on the board.
    #[must_use]
    pub fn goats_on_board(&self) -> usize {
        self.board.count(Piece::Goat)
    }

    #[must_use]
    pub fn to_move(&self) -> ToMove {
        self.to_move
    }

    #[must_use]
    pub fn side_to_move(&self) -> Side {
        self.to_move.side()
    }

    #[must_use]
    pub fn chain_anchor(&self) -> Option<Point> {
        self.to_move.chain_anchor()
    }

    #[must_use]
    pub fn is_chain_active(&self) -> bool {
        self.chain_anchor().is_some()
    }

    /// Plies played so far (every applied action counts, chain jumps included).
    #[must_use]
    pub fn ply(&self) -> u32 {
        self.ply
    }

    /// Times `board` has occurred in this game.
    #[must_use]
    pub fn repetition_count(&self, board: &Board) -> u32 {
        self.repetitions.get(board).copied().unwrap_or(0)
    }

    /// Times the current board has occurred.
    #[must_use]
    pub fn current_repetitions(&self) -> u32 {
        self.repetition_count(&self.board)
    }

    /// Number of distinct board configurations seen.
    #[must_use]
    pub fn distinct_positions(&self) -> usize {
        self.repetitions.len()
    }

    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    pub(crate) fn record_position(&mut self) {
        *self.repetitions.entry(self.board.clone()).or_insert(0) += 1;
    }
}
