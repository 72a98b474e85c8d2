use crate::battle::ai::Behavior;
use crate::battle::engine::resolve_turn;
use crate::battle::state::{BattleState, GameState};
use crate::errors::{BattleEngineError, BattleResult};
use crate::rng::GameRng;
use log::{info, warn};

/// Drive a battle to its end. Each turn the controller sees the state, picks
/// an action and observes the resulting events. Rejected actions are reported
/// back to the controller and asked for again without using up the turn.
pub fn run_battle(
    state: &mut BattleState,
    controller: &mut dyn Behavior,
    rng: &mut GameRng,
) -> BattleResult<GameState> {
    info!("Battle started against {}", state.opponent.name());
    controller.observe(&state.intro_events())?;

    while !state.game_state.is_over() {
        controller.show_status(state)?;
        let action = controller.decide_action(state, rng)?;

        match resolve_turn(state, action, rng) {
            Ok(events) => controller.observe(&events)?,
            Err(BattleEngineError::Action(error)) => {
                warn!("Rejected action on turn {}: {}", state.turn_number, error);
                controller.action_rejected(&error)?;
            }
            Err(error) => return Err(error),
        }
    }

    Ok(state.game_state)
}
