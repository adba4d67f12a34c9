//! Core engine types: points, pieces, actions, rules, state, RNG.
//!
//! These are the building blocks every other module works with. Rule
//! variations are expressed through `Rules`, never by modifying the core.

pub mod point;
pub mod piece;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use point::{Point, MAX_BOARD_SIZE};
pub use piece::{Piece, Side};
pub use rng::GameRng;
pub use config::{ConfigError, Rules, RulesBuilder};
pub use action::{Action, ActionRecord};
pub use state::{Board, GameState, SetupError, ToMove};
