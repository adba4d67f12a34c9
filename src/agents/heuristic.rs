//! One-ply greedy heuristics for both sides.
//!
//! Both evaluators score candidate actions by tiger mobility: for every
//! tiger, the number of empty neighbors plus the number of captures it could
//! make. Tigers maximize it, goats minimize it. Ties go to the candidate
//! found first in enumeration order.
//!
//! Candidates are tried on a scratch copy of the board through
//! `Board::probe`, so evaluation never touches the real state.

use std::cmp::Reverse;

use tracing::{instrument, trace};

use crate::core::{Action, Board, GameState, Piece, Rules, Side};
use crate::rules::{Phase, RulesEngine};

use super::Agent;

/// Extra score for placing a goat next to a tiger.
pub const TIGER_ADJACENCY_PENALTY: usize = 3;

/// Sum over all tigers of open neighbors plus available captures.
#[must_use]
pub fn tiger_mobility(board: &Board, rules: &Rules) -> usize {
    board
        .points_with(Piece::Tiger)
        .map(|tiger| {
            rules.open_neighbors(board, tiger).count() + rules.captures_from(board, tiger).count()
        })
        .sum()
}

/// Pick a tiger action.
///
/// - Mid chain: the continuation leaving the most further captures from its landing point.
/// - Otherwise: the first capture found, if any.
/// - Otherwise: the step maximizing tiger mobility.
///
/// Returns `None` when it is not the tiger's turn or tigers cannot act.
#[instrument(level = "trace", skip_all, fields(ply = state.ply()))]
pub fn tiger_heuristic(state: &GameState, rules: &Rules) -> Option<Action> {
    if state.side_to_move() != Side::Tiger {
        return None;
    }
    let board = state.board();

    if let Some(anchor) = state.chain_anchor() {
        return rules
            .captures_from(board, anchor)
            .map(|jump| {
                let follow_ups = rules.captures_from(board, jump.landing).count();
                (Action::Jump(anchor, jump.landing), follow_ups)
            })
            .min_by_key(|&(_, follow_ups)| Reverse(follow_ups))
            .map(|(action, _)| action);
    }

    let first_capture = board.points_with(Piece::Tiger).find_map(|src| {
        rules
            .captures_from(board, src)
            .next()
            .map(|jump| Action::Jump(src, jump.landing))
    });
    if first_capture.is_some() {
        return first_capture;
    }

    let mut scratch = board.clone();
    rules
        .legal_actions_for(state, Side::Tiger)
        .into_iter()
        .filter_map(|action| match action {
            Action::Move(src, dst) => {
                let score = scratch.probe(&[(src, Piece::Empty), (dst, Piece::Tiger)], |b| {
                    tiger_mobility(b, rules)
                });
                trace!(%action, score, "tiger candidate");
                Some((action, score))
            }
            _ => None,
        })
        .min_by_key(|&(_, score)| Reverse(score))
        .map(|(action, _)| action)
}

/// Pick a goat action.
///
/// Placement: the empty point minimizing tiger mobility once occupied, with
/// `TIGER_ADJACENCY_PENALTY` added next to a tiger. Movement: the step
/// minimizing tiger mobility.
///
/// Returns `None` when it is not the goat's turn or goats cannot act.
#[instrument(level = "trace", skip_all, fields(ply = state.ply()))]
pub fn goat_heuristic(state: &GameState, rules: &Rules) -> Option<Action> {
    if state.side_to_move() != Side::Goat {
        return None;
    }
    let board = state.board();
    let mut scratch = board.clone();

    match rules.phase(state) {
        Phase::Placement => board
            .points_with(Piece::Empty)
            .map(|dst| {
                let exposed = rules
                    .topology()
                    .neighbors(dst)
                    .iter()
                    .any(|&n| board.get(n) == Some(Piece::Tiger));
                let mobility = scratch.probe(&[(dst, Piece::Goat)], |b| tiger_mobility(b, rules));
                let score = if exposed {
                    mobility + TIGER_ADJACENCY_PENALTY
                } else {
                    mobility
                };
                trace!(%dst, score, "goat placement candidate");
                (Action::Place(dst), score)
            })
            .min_by_key(|&(_, score)| score)
            .map(|(action, _)| action),
        Phase::Movement => rules
            .legal_actions_for(state, Side::Goat)
            .into_iter()
            .filter_map(|action| match action {
                Action::Move(src, dst) => {
                    let score = scratch.probe(&[(src, Piece::Empty), (dst, Piece::Goat)], |b| {
                        tiger_mobility(b, rules)
                    });
                    trace!(%action, score, "goat candidate");
                    Some((action, score))
                }
                _ => None,
            })
            .min_by_key(|&(_, score)| score)
            .map(|(action, _)| action),
    }
}

/// Greedy tiger player.
#[derive(Clone, Copy, Debug, Default)]
pub struct TigerHeuristic;

impl Agent for TigerHeuristic {
    fn side(&self) -> Side {
        Side::Tiger
    }

    fn choose(&mut self, state: &GameState, rules: &Rules) -> Option<Action> {
        tiger_heuristic(state, rules)
    }
}

/// Greedy goat player.
#[derive(Clone, Copy, Debug, Default)]
pub struct GoatHeuristic;

impl Agent for GoatHeuristic {
    fn side(&self) -> Side {
        Side::Goat
    }

    fn choose(&mut self, state: &GameState, rules: &Rules) -> Option<Action> {
        goat_heuristic(state, rules)
    }
}
