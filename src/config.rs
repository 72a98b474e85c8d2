use crate::battle::state::BattleRules;
use crate::errors::ConfigError;
use crate::items::{Item, DEFAULT_BOOST_AMOUNT, DEFAULT_POTION_HEAL};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming a RON config file.
pub const CONFIG_PATH_VAR: &str = "POKEMON_QUEST_CONFIG";
/// Environment variable holding an RNG seed; overrides the file's seed.
pub const SEED_VAR: &str = "POKEMON_QUEST_SEED";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartingInventory {
    pub capture_devices: usize,
    pub potions: usize,
    pub attack_boosts: usize,
    pub defense_boosts: usize,
}

impl Default for StartingInventory {
    fn default() -> Self {
        Self {
            capture_devices: 5,
            potions: 3,
            attack_boosts: 1,
            defense_boosts: 1,
        }
    }
}

/// Relative odds of each exploration outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterWeights {
    pub wild: u32,
    pub trainer: u32,
    pub dungeon: u32,
}

impl Default for EncounterWeights {
    fn default() -> Self {
        Self {
            wild: 60,
            trainer: 30,
            dungeon: 10,
        }
    }
}

impl EncounterWeights {
    /// Sum of the three weights; `None` when it does not fit in a `u32`.
    pub fn total(&self) -> Option<u32> {
        self.wild.checked_add(self.trainer)?.checked_add(self.dungeon)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub seed: Option<u64>,
    pub flee_chance: u32,
    pub experience_per_level: u32,
    pub potion_heal: u16,
    pub boost_amount: u16,
    pub starting_inventory: StartingInventory,
    pub encounter_weights: EncounterWeights,
    pub enemy_team_size: usize,
    pub dungeon_stages: usize,
    pub boss_level_offset: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        let rules = BattleRules::default();
        Self {
            seed: None,
            flee_chance: rules.flee_chance,
            experience_per_level: rules.experience_per_level,
            potion_heal: DEFAULT_POTION_HEAL,
            boost_amount: DEFAULT_BOOST_AMOUNT,
            starting_inventory: StartingInventory::default(),
            encounter_weights: EncounterWeights::default(),
            enemy_team_size: 2,
            dungeon_stages: 3,
            boss_level_offset: 3,
        }
    }
}

impl GameConfig {
    /// Load from the environment: the file named by `POKEMON_QUEST_CONFIG`
    /// if set, else defaults, then the `POKEMON_QUEST_SEED` override.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_PATH_VAR).map(PathBuf::from);
        let seed = std::env::var(SEED_VAR).ok();
        Self::load(path.as_deref(), seed.as_deref())
    }

    pub fn load(path: Option<&Path>, seed_override: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                info!("Loaded config from {}", path.display());
                Self::from_ron(&source)?
            }
            None => Self::default(),
        };

        if let Some(value) = seed_override {
            let seed = value.trim().parse().map_err(|_| ConfigError::InvalidSeed {
                value: value.to_string(),
            })?;
            config.seed = Some(seed);
        }
        Ok(config)
    }

    pub fn from_ron(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.encounter_weights.total().is_none() {
            return Err(ConfigError::InvalidEncounterWeights {
                weights: self.encounter_weights,
            });
        }
        Ok(())
    }

    pub fn battle_rules(&self) -> BattleRules {
        BattleRules {
            flee_chance: self.flee_chance,
            experience_per_level: self.experience_per_level,
            can_flee: true,
        }
    }

    /// The bag a new player starts with, capture devices first.
    pub fn starting_items(&self) -> Vec<Item> {
        let stock = &self.starting_inventory;
        let mut items = Vec::new();
        items.extend(std::iter::repeat(Item::CaptureDevice).take(stock.capture_devices));
        items.extend(
            std::iter::repeat(Item::Potion {
                heal_amount: self.potion_heal,
            })
            .take(stock.potions),
        );
        items.extend(
            std::iter::repeat(Item::AttackBoost {
                amount: self.boost_amount,
            })
            .take(stock.attack_boosts),
        );
        items.extend(
            std::iter::repeat(Item::DefenseBoost {
                amount: self.boost_amount,
            })
            .take(stock.defense_boosts),
        );
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::TestPokemonBuilder;
    use crate::progression::RewardCalculator;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = GameConfig::from_ron("()").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.battle_rules(), BattleRules::default());
    }

    #[test]
    fn test_partial_config_overrides_fields() {
        let config = GameConfig::from_ron(
            "(flee_chance: 100, seed: Some(42), encounter_weights: (dungeon: 0))",
        )
        .unwrap();
        assert_eq!(config.flee_chance, 100);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.encounter_weights.wild, 60);
        assert_eq!(config.encounter_weights.dungeon, 0);
        assert_eq!(config.dungeon_stages, 3);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        assert!(matches!(
            GameConfig::from_ron("(flee_chance: \"often\")"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_overflowing_encounter_weights_are_rejected() {
        let result =
            GameConfig::from_ron("(encounter_weights: (wild: 4294967295, trainer: 1, dungeon: 0))");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidEncounterWeights { weights }) if weights.wild == u32::MAX
        ));
    }

    #[test]
    fn test_encounter_weight_total() {
        assert_eq!(EncounterWeights::default().total(), Some(100));
        let weights = EncounterWeights {
            wild: u32::MAX,
            trainer: 0,
            dungeon: 1,
        };
        assert_eq!(weights.total(), None);
    }

    #[test]
    fn test_huge_experience_rate_saturates() {
        let config = GameConfig::from_ron("(experience_per_level: 4294967295)").unwrap();
        let calculator = RewardCalculator::new(config.battle_rules().experience_per_level);
        let chenipan = TestPokemonBuilder::new("Chenipan", 2).build();
        assert_eq!(calculator.experience_for_defeating(&chenipan), u32::MAX);
    }

    #[test]
    fn test_seed_override() {
        let config = GameConfig::load(None, Some(" 1234 ")).unwrap();
        assert_eq!(config.seed, Some(1234));

        assert!(matches!(
            GameConfig::load(None, Some("abc")),
            Err(ConfigError::InvalidSeed { .. })
        ));
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let result = GameConfig::load(Some(Path::new("/nonexistent/pokemon-quest.ron")), None);
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_starting_items() {
        let items = GameConfig::default().starting_items();
        assert_eq!(items.len(), 10);
        assert_eq!(items[0], Item::CaptureDevice);
        assert_eq!(items[5], Item::potion());
        assert_eq!(items[8], Item::attack_boost());
        assert_eq!(items[9], Item::defense_boost());
    }
}
