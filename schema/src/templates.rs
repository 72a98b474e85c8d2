use crate::ElementType;
use serde::{Deserialize, Serialize};

/// Which encounter tables a template may be drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncounterPool {
    Starter,
    Wild,
    Trainer,
}

/// A stat that grows linearly with level: `base + per_level * level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatLine {
    pub base: u16,
    #[serde(default)]
    pub per_level: u16,
}

impl StatLine {
    pub fn at_level(&self, level: u8) -> u16 {
        self.base
            .saturating_add(self.per_level.saturating_mul(level as u16))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonTemplate {
    pub name: String,
    pub types: Vec<ElementType>,
    pub hp: StatLine,
    pub attack: StatLine,
    pub defense: StatLine,
    #[serde(default)]
    pub evolves_into: Option<String>,
    pub pools: Vec<EncounterPool>,
}

impl PokemonTemplate {
    pub fn in_pool(&self, pool: EncounterPool) -> bool {
        self.pools.contains(&pool)
    }
}

/// A rival trainer. An empty `team` means the roster is rolled from the
/// trainer encounter pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerTemplate {
    pub name: String,
    pub age: u8,
    #[serde(default)]
    pub team: Vec<String>,
}

/// Everything loaded from the game data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameData {
    pub pokemon: Vec<PokemonTemplate>,
    /// Starter handed out when the player's choice matches no starter.
    pub fallback_starter: String,
    pub trainers: Vec<TrainerTemplate>,
    pub boss: TrainerTemplate,
}

impl GameData {
    pub fn template(&self, name: &str) -> Option<&PokemonTemplate> {
        self.pokemon
            .iter()
            .find(|template| template.name.eq_ignore_ascii_case(name))
    }

    /// Templates in `pool`, in file order.
    pub fn pool(&self, pool: EncounterPool) -> Vec<&PokemonTemplate> {
        self.pokemon
            .iter()
            .filter(|template| template.in_pool(pool))
            .collect()
    }
}
