//! Uniform random player.

use crate::core::{Action, GameRng, GameState, Rules, Side};
use crate::rules::RulesEngine;

use super::Agent;

/// Picks uniformly among legal actions. Deterministic for a given seed.
#[derive(Clone, Debug)]
pub struct RandomAgent {
    side: Side,
    rng: GameRng,
}

impl RandomAgent {
    #[must_use]
    pub fn new(side: Side, seed: u64) -> Self {
        Self::with_rng(side, GameRng::new(seed))
    }

    #[must_use]
    pub fn with_rng(side: Side, rng: GameRng) -> Self {
        Self { side, rng }
    }
}

impl Agent for RandomAgent {
    fn side(&self) -> Side {
        self.side
    }

    fn choose(&mut self, state: &GameState, rules: &Rules) -> Option<Action> {
        if state.side_to_move() != self.side {
            return None;
        }
        let actions = rules.legal_actions(state);
        self.rng.choose(&actions).copied()
    }
}
