//! Turn and match drivers.
//!
//! `play_agent_turn` plays one full turn for an agent, including every jump
//! of a chain capture. `MatchRunner` alternates two agents until the game
//! ends.

use tracing::{info, warn};

use crate::core::{Action, GameState, Rules, Side};
use crate::rules::{GameResult, RulesEngine, Termination};

use super::Agent;

/// How a match ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The game reached a terminal condition.
    Finished {
        result: GameResult,
        termination: Termination,
    },
    /// The side to move had no action but the position is not terminal.
    ///
    /// Only goats can end up here: a trapped goat side is not a loss.
    Stalled { side: Side },
}

impl MatchOutcome {
    /// The game result, if the match finished.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        match self {
            MatchOutcome::Finished { result, .. } => Some(*result),
            MatchOutcome::Stalled { .. } => None,
        }
    }
}

/// Play one turn for `agent`.
///
/// Goats act once. Tigers keep acting while a chain capture is in progress.
/// Stops early if the agent has no action, the agent's action is rejected,
/// or the game ends mid-chain. Returns the actions applied.
pub fn play_agent_turn(agent: &mut dyn Agent, state: &mut GameState, rules: &Rules) -> Vec<Action> {
    let side = agent.side();
    let mut applied = Vec::new();

    while state.side_to_move() == side {
        let Some(action) = agent.choose(state, rules) else {
            break;
        };
        if let Err(err) = rules.try_apply(state, action) {
            warn!(%side, %action, %err, "agent chose an illegal action");
            break;
        }
        applied.push(action);

        if !state.is_chain_active() || rules.is_terminal(state).is_some() {
            break;
        }
    }

    applied
}

/// Plays two agents against each other.
#[derive(Clone, Copy, Debug)]
pub struct MatchRunner<'r> {
    rules: &'r Rules,
}

impl<'r> MatchRunner<'r> {
    #[must_use]
    pub fn new(rules: &'r Rules) -> Self {
        Self { rules }
    }

    /// Run from `state` until the game ends or the side to move cannot act.
    ///
    /// Always returns: every applied action advances the ply counter toward
    /// the rules' move cap.
    pub fn run(
        &self,
        state: &mut GameState,
        goat: &mut dyn Agent,
        tiger: &mut dyn Agent,
    ) -> MatchOutcome {
        debug_assert_eq!(goat.side(), Side::Goat);
        debug_assert_eq!(tiger.side(), Side::Tiger);

        loop {
            if let Some(termination) = self.rules.termination(state) {
                let result = termination.result();
                info!(%result, ?termination, ply = state.ply(), "match finished");
                return MatchOutcome::Finished {
                    result,
                    termination,
                };
            }

            let side = state.side_to_move();
            let agent: &mut dyn Agent = match side {
                Side::Goat => &mut *goat,
                Side::Tiger => &mut *tiger,
            };
            if play_agent_turn(agent, state, self.rules).is_empty() {
                info!(%side, ply = state.ply(), "match stalled");
                return MatchOutcome::Stalled { side };
            }
        }
    }
}
