//! Automated players.
//!
//! Agents consume the same public contract a human-driven front end uses:
//! they read the state, pick one action, and leave applying it to the
//! caller (or to the drivers in `runner`).
//!
//! - `heuristic`: one-ply greedy evaluators for tigers and goats
//! - `random`: seeded uniform choice among legal actions
//! - `runner`: single-turn and whole-match drivers

pub mod heuristic;
pub mod random;
pub mod runner;

use crate::core::{Action, GameState, Rules, Side};

pub use heuristic::{goat_heuristic, tiger_heuristic, tiger_mobility, GoatHeuristic, TigerHeuristic};
pub use random::RandomAgent;
pub use runner::{play_agent_turn, MatchOutcome, MatchRunner};

/// A player that picks actions for one side.
pub trait Agent {
    /// The side this agent plays.
    fn side(&self) -> Side;

    /// Pick an action for the current state.
    ///
    /// Returns `None` when the agent's side has nothing to do (not its turn,
    /// or no legal action). Callers must check for this.
    fn choose(&mut self, state: &GameState, rules: &Rules) -> Option<Action>;
}
