//! Pokemon Quest
//!
//! A text-based Pokemon adventure: pick a starter, explore, fight wild Pokemon
//! and rival trainers, catch what you can and clear the dungeon. Battles are
//! resolved turn by turn against an explicit random source so every outcome
//! can be replayed in tests.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod config;
pub mod dungeon;
pub mod errors;
pub mod factory;
pub mod game;
pub mod interface;
pub mod items;
pub mod player;
pub mod pokemon;
pub mod progression;
pub mod rng;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{ElementType, EncounterPool, GameData, PokemonTemplate, StatLine, TrainerTemplate};

// --- From this crate's modules (`src/`) ---

// Core battle engine functions and state.
pub use battle::ai::{Behavior, RandomAI};
pub use battle::engine::resolve_turn;
pub use battle::runner::run_battle;
pub use battle::state::{BattleEvent, BattleRules, BattleState, EventBus, GameState, Opponent};

// Core runtime types.
pub use items::{Item, ItemOutcome};
pub use player::{PlayerAction, PlayerType, Trainer};
pub use pokemon::PokemonInst;
pub use rng::GameRng;

// Session types.
pub use config::GameConfig;
pub use dungeon::{Dungeon, DungeonOutcome};
pub use factory::PokemonFactory;
pub use game::Game;
pub use interface::Console;

// Crate-specific error and result types.
pub use errors::{
    ActionError, BattleEngineError, BattleResult, BattleStateError, ConfigError, DataError,
    DataResult, GameError, GameResult,
};
