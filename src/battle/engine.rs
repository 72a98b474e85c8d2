use crate::battle::ai::{Behavior, RandomAI};
use crate::battle::state::{BattleEvent, BattleState, BattleType, EventBus, GameState, Opponent};
use crate::errors::{ActionError, BattleResult, BattleStateError};
use crate::items::ItemOutcome;
use crate::player::PlayerAction;
use crate::progression::RewardCalculator;
use crate::rng::GameRng;
use log::info;

/// Check that `action` may be taken right now. A rejected action leaves the
/// battle untouched, so the caller can simply ask again.
pub fn validate_player_action(state: &BattleState, action: &PlayerAction) -> BattleResult<()> {
    if state.game_state.is_over() {
        return Err(BattleStateError::BattleOver.into());
    }
    match action {
        PlayerAction::ThrowCaptureDevice => {
            if state.battle_type() != BattleType::Wild {
                return Err(ActionError::NotAllowed("Throwing a Poke Ball").into());
            }
            if state.player.capture_device_index().is_none() {
                return Err(ActionError::NoCaptureDevice.into());
            }
        }
        PlayerAction::Flee => {
            if state.battle_type() != BattleType::Wild || !state.rules.can_flee {
                return Err(ActionError::NotAllowed("Fleeing").into());
            }
        }
        PlayerAction::Attack | PlayerAction::Defend | PlayerAction::UseItem { .. } => {}
    }
    Ok(())
}

/// Main entry point for turn resolution.
/// Validates and executes the player's action, handles a knock-out of the
/// opposing Pokemon, lets the opponent act, and settles the battle outcome.
/// Returns the events of the turn.
pub fn resolve_turn(
    state: &mut BattleState,
    action: PlayerAction,
    rng: &mut GameRng,
) -> BattleResult<EventBus> {
    validate_player_action(state, &action)?;

    let mut bus = EventBus::new();
    bus.push(BattleEvent::TurnStarted {
        turn_number: state.turn_number,
    });

    // 1. Player action
    if let Some(outcome) = execute_player_action(state, action, rng, &mut bus)? {
        finish_battle(state, outcome, &mut bus);
        return Ok(bus);
    }

    // 2. Knock-out of the opposing Pokemon ends the turn without an enemy action
    if !opponent_pokemon_alive(state) {
        if let Some(outcome) = handle_opponent_knockout(state, rng, &mut bus)? {
            finish_battle(state, outcome, &mut bus);
            return Ok(bus);
        }
        end_turn(state, &mut bus);
        return Ok(bus);
    }

    // 3. Opponent action
    let enemy_action = RandomAI::new().decide_action(state, rng)?;
    execute_opponent_action(state, &enemy_action, rng, &mut bus)?;

    // 4. The player's active Pokemon going down loses the battle
    if !state.player.active_pokemon().is_some_and(|p| p.is_alive()) {
        finish_battle(state, GameState::PlayerLost, &mut bus);
        return Ok(bus);
    }

    end_turn(state, &mut bus);
    Ok(bus)
}

/// Returns the final outcome when the action itself ends the battle.
fn execute_player_action(
    state: &mut BattleState,
    action: PlayerAction,
    rng: &mut GameRng,
    bus: &mut EventBus,
) -> BattleResult<Option<GameState>> {
    match action {
        PlayerAction::Attack => {
            let player_name = state.player.name.clone();
            let attacker = state
                .player
                .active_pokemon()
                .ok_or(BattleStateError::NoActivePokemon {
                    trainer: player_name,
                })?;
            let opponent_name = state.opponent.name();
            let target = state
                .opponent
                .active_pokemon_mut()
                .ok_or(BattleStateError::NoActivePokemon {
                    trainer: opponent_name,
                })?;
            attacker.attack(target, rng, bus);
        }
        PlayerAction::Defend => {
            let player_name = state.player.name.clone();
            state
                .player
                .active_pokemon_mut()
                .ok_or(BattleStateError::NoActivePokemon {
                    trainer: player_name,
                })?
                .defend(bus);
        }
        PlayerAction::UseItem {
            item_slot,
            target_slot,
        } => {
            state.player.use_item(item_slot, target_slot, rng, bus);
        }
        PlayerAction::ThrowCaptureDevice => {
            let Opponent::Wild(target) = &mut state.opponent else {
                return Err(ActionError::NotAllowed("Throwing a Poke Ball").into());
            };
            if state.player.throw_capture_device(target, rng, bus)? == ItemOutcome::Captured {
                return Ok(Some(GameState::PokemonCaught));
            }
        }
        PlayerAction::Flee => {
            if rng.chance(state.rules.flee_chance, "flee attempt") {
                bus.push(BattleEvent::FleeSucceeded);
                return Ok(Some(GameState::PlayerFled));
            }
            bus.push(BattleEvent::FleeFailed);
        }
    }
    Ok(None)
}

fn opponent_pokemon_alive(state: &BattleState) -> bool {
    state
        .opponent
        .active_pokemon()
        .is_some_and(|p| p.is_alive())
}

/// A wild knock-out pays experience and wins. A trainer's knocked-out Pokemon
/// leaves the roster and the next one is sent out; an empty roster wins.
/// Returns the outcome if the battle is over.
fn handle_opponent_knockout(
    state: &mut BattleState,
    rng: &mut GameRng,
    bus: &mut EventBus,
) -> BattleResult<Option<GameState>> {
    match &mut state.opponent {
        Opponent::Wild(defeated) => {
            let experience = RewardCalculator::new(state.rules.experience_per_level)
                .experience_for_defeating(defeated);
            if let Some(winner) = state.player.active_pokemon_mut() {
                winner.gain_experience(experience, rng, bus);
            }
            Ok(Some(GameState::PlayerWon))
        }
        Opponent::Trainer(trainer) => {
            if let Some(index) = trainer.active_pokemon_index() {
                trainer.remove_pokemon(index);
            }
            match trainer.active_pokemon() {
                Some(next) => {
                    bus.push(BattleEvent::PokemonSentOut {
                        trainer: trainer.name.clone(),
                        pokemon: next.name.clone(),
                    });
                    Ok(None)
                }
                None => {
                    bus.push(BattleEvent::TrainerDefeated {
                        trainer: trainer.name.clone(),
                    });
                    Ok(Some(GameState::PlayerWon))
                }
            }
        }
    }
}

fn execute_opponent_action(
    state: &mut BattleState,
    action: &PlayerAction,
    rng: &mut GameRng,
    bus: &mut EventBus,
) -> BattleResult<()> {
    let opponent_name = state.opponent.name();
    match action {
        PlayerAction::Defend => {
            state
                .opponent
                .active_pokemon_mut()
                .ok_or(BattleStateError::NoActivePokemon {
                    trainer: opponent_name,
                })?
                .defend(bus);
        }
        // Anything else the opponent picks is played as an attack
        _ => {
            let attacker = state
                .opponent
                .active_pokemon()
                .ok_or(BattleStateError::NoActivePokemon {
                    trainer: opponent_name,
                })?;
            let player_name = state.player.name.clone();
            let target = state
                .player
                .active_pokemon_mut()
                .ok_or(BattleStateError::NoActivePokemon {
                    trainer: player_name,
                })?;
            attacker.attack(target, rng, bus);
        }
    }
    Ok(())
}

fn end_turn(state: &mut BattleState, bus: &mut EventBus) {
    bus.push(BattleEvent::TurnEnded);
    state.turn_number += 1;
}

/// Settle the outcome and clear every battle-only modifier on both sides.
fn finish_battle(state: &mut BattleState, outcome: GameState, bus: &mut EventBus) {
    state.game_state = outcome;
    state.player.end_battle();
    match &mut state.opponent {
        Opponent::Wild(pokemon) => pokemon.end_battle(),
        Opponent::Trainer(trainer) => trainer.end_battle(),
    }
    info!(
        "Battle against {} ended on turn {}: {:?}",
        state.opponent.name(),
        state.turn_number,
        outcome
    );
    bus.push(BattleEvent::BattleEnded { outcome });
}
