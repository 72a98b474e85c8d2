//! A module for defining the decision makers of a battle.

use crate::battle::state::{BattleState, EventBus};
use crate::errors::{ActionError, BattleResult};
use crate::player::PlayerAction;
use crate::rng::GameRng;

/// A trait for any system that can decide on a battle action.
/// The human console and the opponent AI both implement it, so the battle
/// runner drives either the same way.
pub trait Behavior {
    /// Inspects the battle state and decides on the next action.
    fn decide_action(
        &mut self,
        state: &BattleState,
        rng: &mut GameRng,
    ) -> BattleResult<PlayerAction>;

    /// Called with the events of every resolved turn.
    fn observe(&mut self, _events: &EventBus) -> BattleResult<()> {
        Ok(())
    }

    /// Called before each decision with the current state of the battle.
    fn show_status(&mut self, _state: &BattleState) -> BattleResult<()> {
        Ok(())
    }

    /// Called when a decided action was rejected and nothing happened.
    fn action_rejected(&mut self, _error: &ActionError) -> BattleResult<()> {
        Ok(())
    }
}

/// Picks uniformly between attacking and defending.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomAI;

impl RandomAI {
    pub fn new() -> Self {
        Self
    }
}

impl Behavior for RandomAI {
    fn decide_action(
        &mut self,
        _state: &BattleState,
        rng: &mut GameRng,
    ) -> BattleResult<PlayerAction> {
        Ok(match rng.range(1, 2, "enemy action") {
            1 => PlayerAction::Attack,
            _ => PlayerAction::Defend,
        })
    }
}
