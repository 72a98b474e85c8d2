use crate::config::EncounterWeights;
use schema::EncounterPool;
use std::path::PathBuf;

/// Main error type for the battle engine
#[derive(Debug, thiserror::Error)]
pub enum BattleEngineError {
    /// Error related to invalid battle state
    #[error("Battle state error: {0}")]
    BattleState(#[from] BattleStateError),
    /// Error related to invalid player actions
    #[error("Action error: {0}")]
    Action(#[from] ActionError),
    /// The player's input stream closed while a decision was pending
    #[error("Input closed")]
    InputClosed,
    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to battle state validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BattleStateError {
    /// A side entered battle without a living active Pokemon
    #[error("{trainer} has no Pokemon able to battle")]
    NoActivePokemon { trainer: String },
    /// A turn was submitted after the battle already ended
    #[error("The battle is already over")]
    BattleOver,
}

/// Errors related to player actions. These are recoverable: the battle
/// loop reports them and asks again without consuming the turn.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// Action is not valid in the current battle type
    #[error("{0} is not allowed in this battle")]
    NotAllowed(&'static str),
    /// Tried to throw a capture device with none in the bag
    #[error("No capture device left in the bag")]
    NoCaptureDevice,
}

/// Errors related to the embedded game data
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("Malformed game data: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Unknown Pokemon template: {0}")]
    UnknownTemplate(String),
    #[error("No templates in the {0:?} encounter pool")]
    EmptyPool(EncounterPool),
    #[error("No trainer templates defined")]
    NoTrainers,
}

/// Errors related to loading the game configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Malformed config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Invalid seed {value:?}: expected an unsigned integer")]
    InvalidSeed { value: String },
    #[error("Encounter weights {weights:?} add up to more than {}", u32::MAX)]
    InvalidEncounterWeights { weights: EncounterWeights },
}

/// Top-level error for a game session
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    Battle(#[from] BattleEngineError),
    #[error(transparent)]
    Data(#[from] DataError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Type alias for Results using DataError
pub type DataResult<T> = Result<T, DataError>;

/// Type alias for Results using GameError
pub type GameResult<T> = Result<T, GameError>;
