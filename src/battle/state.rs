use crate::battle::catch::CatchFailureReason;
use crate::errors::{BattleResult, BattleStateError};
use crate::items::{ItemFailureReason, StatType};
use crate::player::{ActionKind, Trainer};
use crate::pokemon::PokemonInst;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Copy)]
pub enum GameState {
    InProgress,
    PlayerWon,
    PlayerLost,
    PlayerFled,
    PokemonCaught,
}

impl GameState {
    pub fn is_over(self) -> bool {
        self != GameState::InProgress
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Copy)]
pub enum BattleType {
    Wild,
    Trainer,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Battle Start
    WildEncounter {
        pokemon: String,
        level: u8,
    },
    TrainerChallenge {
        trainer: String,
    },
    PokemonSentOut {
        trainer: String,
        pokemon: String,
    },

    // Turn Management
    TurnStarted {
        turn_number: u32,
    },
    TurnEnded,

    // Combat
    AttackUsed {
        attacker: String,
        target: String,
        damage: u16,
    },
    DamageDealt {
        target: String,
        damage: u16,
        remaining_hp: u16,
        max_hp: u16,
    },
    DefenseRaised {
        pokemon: String,
        defense: u16,
    },
    DefenseReset {
        pokemon: String,
        defense: u16,
    },
    PokemonFainted {
        pokemon: String,
    },

    // Progression
    ExperienceGained {
        pokemon: String,
        amount: u32,
    },
    LevelUp {
        pokemon: String,
        new_level: u8,
    },
    Evolved {
        from: String,
        into: String,
    },

    // Items
    ItemUsed {
        item: String,
        target: String,
    },
    ItemFailed {
        item: String,
        target: String,
        reason: ItemFailureReason,
    },
    ItemCancelled,
    InvalidItemChoice {
        choice: usize,
    },
    NoTargetAvailable,
    PokemonHealed {
        target: String,
        amount: u16,
        new_hp: u16,
        max_hp: u16,
    },
    StatBoosted {
        target: String,
        stat: StatType,
        amount: u16,
        new_value: u16,
    },

    // Catching
    CatchAttempted {
        pokemon: String,
    },
    CatchSucceeded {
        pokemon: String,
    },
    CatchFailed {
        pokemon: String,
        reason: CatchFailureReason,
    },

    // Fleeing
    FleeSucceeded,
    FleeFailed,

    // Battle End
    TrainerDefeated {
        trainer: String,
    },
    BattleEnded {
        outcome: GameState,
    },

    // Dungeon
    DungeonStageStarted {
        stage: usize,
        total: usize,
        trainer: String,
    },
    BossChallenge {
        trainer: String,
    },
    DungeonCleared,
    DungeonFailed {
        stage: usize,
    },
}

impl BattleEvent {
    /// Formats the event into a human-readable string.
    /// Returns None for silent events that should not produce user-visible text.
    pub fn format(&self) -> Option<String> {
        match self {
            // === Battle Start Events ===
            BattleEvent::WildEncounter { pokemon, level } => {
                Some(format!("A wild {} (Lv. {}) appears!", pokemon, level))
            }
            BattleEvent::TrainerChallenge { trainer } => {
                Some(format!("{} challenges you to a battle!", trainer))
            }
            BattleEvent::PokemonSentOut { trainer, pokemon } => {
                Some(format!("{} sends out {}!", trainer, pokemon))
            }

            // === Turn Management Events ===
            BattleEvent::TurnStarted { turn_number } => {
                Some(format!("=== Turn {} ===", turn_number))
            }
            BattleEvent::TurnEnded => None,

            // === Combat Events ===
            BattleEvent::AttackUsed {
                attacker,
                target,
                damage,
            } => Some(format!(
                "{} attacks {} and deals {} damage!",
                attacker, target, damage
            )),
            BattleEvent::DamageDealt {
                target,
                remaining_hp,
                max_hp,
                ..
            } => Some(format!("{} now has {}/{} HP.", target, remaining_hp, max_hp)),
            BattleEvent::DefenseRaised { pokemon, defense } => Some(format!(
                "{} takes a defensive stance! (DEF {})",
                pokemon, defense
            )),
            BattleEvent::DefenseReset { .. } => None,
            BattleEvent::PokemonFainted { pokemon } => Some(format!("{} fainted!", pokemon)),

            // === Progression Events ===
            BattleEvent::ExperienceGained { pokemon, amount } => {
                Some(format!("{} gains {} XP!", pokemon, amount))
            }
            BattleEvent::LevelUp { pokemon, new_level } => {
                Some(format!("{} grew to level {}!", pokemon, new_level))
            }
            BattleEvent::Evolved { from, into } => {
                Some(format!("{} evolved into {}!", from, into))
            }

            // === Item Events ===
            BattleEvent::ItemUsed { item, target } => {
                Some(format!("Used {} on {}.", item, target))
            }
            BattleEvent::ItemFailed {
                item,
                target,
                reason,
            } => match reason {
                ItemFailureReason::TargetFainted => Some(format!(
                    "Can't use {} on {}: it has fainted!",
                    item, target
                )),
            },
            BattleEvent::ItemCancelled => Some("You put the bag away.".to_string()),
            BattleEvent::InvalidItemChoice { .. } => Some("Invalid item!".to_string()),
            BattleEvent::NoTargetAvailable => {
                Some("There is no Pokemon able to receive that item.".to_string())
            }
            BattleEvent::PokemonHealed {
                target,
                amount,
                new_hp,
                max_hp,
            } => Some(format!(
                "{} recovered {} HP! ({}/{})",
                target, amount, new_hp, max_hp
            )),
            BattleEvent::StatBoosted {
                target,
                stat,
                amount,
                new_value,
            } => Some(format!(
                "{}'s {} rose by {}! ({})",
                target, stat, amount, new_value
            )),

            // === Catch Events ===
            BattleEvent::CatchAttempted { pokemon } => {
                Some(format!("You throw a Poke Ball at {}!", pokemon))
            }
            BattleEvent::CatchSucceeded { pokemon } => {
                Some(format!("Gotcha! {} was caught!", pokemon))
            }
            BattleEvent::CatchFailed { pokemon, reason } => Some(match reason {
                CatchFailureReason::NotCapturable => {
                    format!("{} belongs to someone else!", pokemon)
                }
                CatchFailureReason::TargetFainted => {
                    format!("{} has fainted and can't be caught.", pokemon)
                }
                CatchFailureReason::TooHealthy { .. } => {
                    format!("{} is not weak enough to be caught!", pokemon)
                }
                CatchFailureReason::RollFailed { .. } => {
                    format!("{} broke free!", pokemon)
                }
            }),

            // === Flee Events ===
            BattleEvent::FleeSucceeded => Some("Got away safely!".to_string()),
            BattleEvent::FleeFailed => Some("Couldn't get away!".to_string()),

            // === Battle End Events ===
            BattleEvent::TrainerDefeated { trainer } => {
                Some(format!("{} is out of usable Pokemon!", trainer))
            }
            BattleEvent::BattleEnded { outcome } => match outcome {
                GameState::PlayerWon => Some("You won the battle!".to_string()),
                GameState::PlayerLost => Some("You lost the battle...".to_string()),
                GameState::PlayerFled | GameState::PokemonCaught | GameState::InProgress => None,
            },

            // === Dungeon Events ===
            BattleEvent::DungeonStageStarted {
                stage,
                total,
                trainer,
            } => Some(format!(
                "--- Dungeon floor {}/{}: {} blocks the way! ---",
                stage + 1,
                total,
                trainer
            )),
            BattleEvent::BossChallenge { trainer } => {
                Some(format!("--- The dungeon boss {} awaits! ---", trainer))
            }
            BattleEvent::DungeonCleared => Some("You conquered the dungeon!".to_string()),
            BattleEvent::DungeonFailed { stage } => Some(format!(
                "You were driven out of the dungeon on floor {}.",
                stage + 1
            )),
        }
    }
}

/// Event bus for collecting and managing battle events.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Write every non-silent event's text, one per line.
    pub fn write_formatted<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for text in self.events.iter().filter_map(BattleEvent::format) {
            writeln!(out, "{}", text)?;
        }
        Ok(())
    }

    /// Return true if the event bus contains no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Return the number of events in the bus.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl std::fmt::Display for EventBus {
    /// Shows debug format of all events.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}

/// Tunable numbers the engine needs while resolving turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleRules {
    /// Percent chance that a flee attempt succeeds
    pub flee_chance: u32,
    /// Experience awarded per level of a defeated wild Pokemon
    pub experience_per_level: u32,
    /// Whether the flee action is offered in wild battles
    pub can_flee: bool,
}

impl Default for BattleRules {
    fn default() -> Self {
        Self {
            flee_chance: 60,
            experience_per_level: 5,
            can_flee: true,
        }
    }
}

/// The other side of a battle: a lone wild Pokemon or a trainer's roster.
#[derive(Debug, Clone)]
pub enum Opponent {
    Wild(PokemonInst),
    Trainer(Trainer),
}

impl Opponent {
    pub fn battle_type(&self) -> BattleType {
        match self {
            Opponent::Wild(_) => BattleType::Wild,
            Opponent::Trainer(_) => BattleType::Trainer,
        }
    }

    pub fn active_pokemon(&self) -> Option<&PokemonInst> {
        match self {
            Opponent::Wild(pokemon) => Some(pokemon),
            Opponent::Trainer(trainer) => trainer.active_pokemon(),
        }
    }

    pub fn active_pokemon_mut(&mut self) -> Option<&mut PokemonInst> {
        match self {
            Opponent::Wild(pokemon) => Some(pokemon),
            Opponent::Trainer(trainer) => trainer.active_pokemon_mut(),
        }
    }

    pub fn name(&self) -> String {
        match self {
            Opponent::Wild(pokemon) => format!("Wild {}", pokemon.name),
            Opponent::Trainer(trainer) => trainer.name.clone(),
        }
    }
}

#[derive(Debug)]
pub struct BattleState<'a> {
    pub player: &'a mut Trainer,
    pub opponent: Opponent,
    pub rules: BattleRules,
    pub turn_number: u32,
    pub game_state: GameState,
}

impl<'a> BattleState<'a> {
    /// Starts a battle. Both sides must field a living active Pokemon.
    pub fn new(
        player: &'a mut Trainer,
        opponent: Opponent,
        rules: BattleRules,
    ) -> BattleResult<Self> {
        if !player.active_pokemon().is_some_and(PokemonInst::is_alive) {
            return Err(BattleStateError::NoActivePokemon {
                trainer: player.name.clone(),
            }
            .into());
        }
        if !opponent.active_pokemon().is_some_and(PokemonInst::is_alive) {
            return Err(BattleStateError::NoActivePokemon {
                trainer: opponent.name(),
            }
            .into());
        }

        Ok(Self {
            player,
            opponent,
            rules,
            turn_number: 1,
            game_state: GameState::InProgress,
        })
    }

    pub fn battle_type(&self) -> BattleType {
        self.opponent.battle_type()
    }

    /// The actions offered on the battle menu, in menu order.
    pub fn available_actions(&self) -> Vec<ActionKind> {
        let mut actions = vec![ActionKind::Attack, ActionKind::Defend, ActionKind::UseItem];
        if self.battle_type() == BattleType::Wild {
            actions.push(ActionKind::ThrowCaptureDevice);
            if self.rules.can_flee {
                actions.push(ActionKind::Flee);
            }
        }
        actions
    }

    /// Events announcing the battle, for the runner to show before the first turn.
    pub fn intro_events(&self) -> EventBus {
        let mut bus = EventBus::new();
        match &self.opponent {
            Opponent::Wild(pokemon) => bus.push(BattleEvent::WildEncounter {
                pokemon: pokemon.name.clone(),
                level: pokemon.level,
            }),
            Opponent::Trainer(trainer) => {
                bus.push(BattleEvent::TrainerChallenge {
                    trainer: trainer.name.clone(),
                });
                if let Some(pokemon) = trainer.active_pokemon() {
                    bus.push(BattleEvent::PokemonSentOut {
                        trainer: trainer.name.clone(),
                        pokemon: pokemon.name.clone(),
                    });
                }
            }
        }
        if let Some(pokemon) = self.player.active_pokemon() {
            bus.push(BattleEvent::PokemonSentOut {
                trainer: self.player.name.clone(),
                pokemon: pokemon.name.clone(),
            });
        }
        bus
    }
}

impl std::fmt::Display for BattleState<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Current state:")?;
        if let Some(pokemon) = self.player.active_pokemon() {
            writeln!(f, "  {}", pokemon)?;
        }
        if let Some(pokemon) = self.opponent.active_pokemon() {
            writeln!(f, "  {}", pokemon)?;
        }
        write!(f, "-------------------------")
    }
}
