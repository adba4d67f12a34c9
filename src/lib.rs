//! # bagh-chal
//!
//! Rules engine for 7×7 Bagh-Chal ("tigers and goats") with three extra
//! rule modules: edge-midpoint sanctuaries, multi-jump chain captures, and
//! threefold-repetition (KO) draws.
//!
//! ## Design Principles
//!
//! 1. **Rules are data**: board size, quotas, sanctuaries and rule toggles
//!    live in an immutable `Rules` value. A different rule set is a new
//!    `Rules`, never a mutated one.
//!
//! 2. **All-or-nothing transitions**: `RulesEngine::try_apply` validates an
//!    action completely before mutating the state.
//!
//! 3. **Front ends are thin**: rendering and input live outside this crate.
//!    A front end enumerates actions, applies one, and polls
//!    `is_terminal` after every applied action.
//!
//! ## Modules
//!
//! - `core`: Points, pieces, actions, rules, state, RNG
//! - `topology`: Adjacency and jump graphs
//! - `rules`: `RulesEngine` trait (phase, legal actions, apply, terminal)
//! - `agents`: Greedy heuristics, random agent, turn/match drivers
//!
//! ## Example
//!
//! ```
//! use bagh_chal::{Action, GameState, Point, Rules, RulesEngine, Side};
//!
//! let rules = Rules::default_7x7();
//! let mut state = GameState::initial(&rules);
//!
//! assert!(rules.apply(&mut state, Action::Place(Point(24))));
//! assert_eq!(state.side_to_move(), Side::Tiger);
//! assert!(rules.is_terminal(&state).is_none());
//! ```

pub mod core;
pub mod topology;
pub mod rules;
pub mod agents;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, Board, ConfigError, GameRng, GameState, Piece, Point, Rules,
    RulesBuilder, SetupError, Side, ToMove, MAX_BOARD_SIZE,
};

pub use crate::topology::{edge_midpoints, Jump, Topology};

pub use crate::rules::{ActionError, GameResult, Phase, RulesEngine, Termination};

pub use crate::agents::{
    goat_heuristic, play_agent_turn, tiger_heuristic, tiger_mobility, Agent, GoatHeuristic,
    MatchOutcome, MatchRunner, RandomAgent, TigerHeuristic,
};
