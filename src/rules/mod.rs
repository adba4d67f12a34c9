//! Rules engine.
//!
//! `RulesEngine` defines:
//! - Which phase the game is in
//! - Legal actions for either side
//! - How actions modify state
//! - Win/draw conditions
//!
//! `Rules` implements it; front ends and agents only go through this trait.

pub mod engine;
pub mod error;

pub use engine::{GameResult, Phase, RulesEngine, Termination, REPETITION_LIMIT};
pub use error::ActionError;
