use crate::errors::{DataError, DataResult};
use crate::player::{PlayerType, Trainer};
use crate::pokemon::PokemonInst;
use crate::rng::GameRng;
use log::debug;
use schema::{EncounterPool, GameData, PokemonTemplate, TrainerTemplate};

// Embedded creature and trainer templates
const BUILTIN_GAME_DATA: &str = include_str!("../data/game_data.ron");

/// Builds starters, wild Pokemon and rival trainers from the game data templates.
#[derive(Debug, Clone)]
pub struct PokemonFactory {
    data: GameData,
}

impl PokemonFactory {
    /// Factory over the templates compiled into the binary.
    pub fn builtin() -> DataResult<Self> {
        Self::from_ron(BUILTIN_GAME_DATA)
    }

    /// Parse and check a game data file. Every name referenced by the file
    /// must resolve and every encounter pool must be populated.
    pub fn from_ron(source: &str) -> DataResult<Self> {
        let data: GameData = ron::from_str(source)?;
        let factory = Self { data };
        factory.validate()?;
        Ok(factory)
    }

    fn validate(&self) -> DataResult<()> {
        for pool in [EncounterPool::Starter, EncounterPool::Wild, EncounterPool::Trainer] {
            if self.data.pool(pool).is_empty() {
                return Err(DataError::EmptyPool(pool));
            }
        }
        if self.data.trainers.is_empty() {
            return Err(DataError::NoTrainers);
        }
        let referenced = std::iter::once(&self.data.fallback_starter)
            .chain(self.data.boss.team.iter())
            .chain(self.data.trainers.iter().flat_map(|t| t.team.iter()));
        for name in referenced {
            self.template(name)?;
        }
        Ok(())
    }

    pub fn data(&self) -> &GameData {
        &self.data
    }

    fn template(&self, name: &str) -> DataResult<&PokemonTemplate> {
        self.data
            .template(name)
            .ok_or_else(|| DataError::UnknownTemplate(name.to_string()))
    }

    /// Names of the selectable starters, in menu order.
    pub fn starter_names(&self) -> Vec<&str> {
        self.data
            .pool(EncounterPool::Starter)
            .into_iter()
            .map(|template| template.name.as_str())
            .collect()
    }

    /// A level 1 starter by name (case-insensitive). Unknown names get the
    /// fallback starter.
    pub fn create_starter(&self, name: &str) -> DataResult<PokemonInst> {
        let template = match self
            .data
            .pool(EncounterPool::Starter)
            .into_iter()
            .find(|template| template.name.to_lowercase() == name.to_lowercase())
        {
            Some(template) => template,
            None => self.template(&self.data.fallback_starter)?,
        };
        Ok(PokemonInst::from_template(template, 1))
    }

    /// A capturable Pokemon drawn uniformly from the wild pool.
    pub fn create_wild(&self, level: u8, rng: &mut GameRng) -> DataResult<PokemonInst> {
        let pool = self.data.pool(EncounterPool::Wild);
        if pool.is_empty() {
            return Err(DataError::EmptyPool(EncounterPool::Wild));
        }
        let template = pool[rng.index(pool.len(), "wild species")];
        let mut pokemon = PokemonInst::from_template(template, level);
        pokemon.capturable = true;
        debug!("Created wild {} at level {}", pokemon.name, pokemon.level);
        Ok(pokemon)
    }

    /// A random rival. Trainers with a fixed team field it; the others get
    /// `team_size` Pokemon drawn from the trainer pool.
    pub fn create_enemy_trainer(
        &self,
        level: u8,
        team_size: usize,
        rng: &mut GameRng,
    ) -> DataResult<Trainer> {
        if self.data.trainers.is_empty() {
            return Err(DataError::NoTrainers);
        }
        let template = &self.data.trainers[rng.index(self.data.trainers.len(), "rival trainer")];
        self.build_trainer(template, level, team_size, rng)
    }

    /// The dungeon boss with its fixed team.
    pub fn create_boss(&self, level: u8, rng: &mut GameRng) -> DataResult<Trainer> {
        self.build_trainer(&self.data.boss, level, 1, rng)
    }

    fn build_trainer(
        &self,
        template: &TrainerTemplate,
        level: u8,
        team_size: usize,
        rng: &mut GameRng,
    ) -> DataResult<Trainer> {
        let mut trainer = Trainer::new(template.name.clone(), template.age, PlayerType::NPC);

        if template.team.is_empty() {
            let pool = self.data.pool(EncounterPool::Trainer);
            if pool.is_empty() {
                return Err(DataError::EmptyPool(EncounterPool::Trainer));
            }
            for _ in 0..team_size.max(1) {
                let species = pool[rng.index(pool.len(), "rival team member")];
                trainer.add_pokemon(PokemonInst::from_template(species, level));
            }
        } else {
            for name in &template.team {
                trainer.add_pokemon(PokemonInst::from_template(self.template(name)?, level));
            }
        }

        debug!(
            "Created trainer {} with {} Pokemon at level {}",
            trainer.name,
            trainer.team.len(),
            level
        );
        Ok(trainer)
    }
}
