use crate::battle::state::{BattleRules, BattleState, Opponent};
use crate::errors::BattleResult;
use crate::factory::PokemonFactory;
use crate::player::{PlayerType, Trainer};
use crate::pokemon::PokemonInst;

/// A builder for creating test Pokemon instances from the built-in templates.
///
/// # Example
/// ```ignore
/// let pokemon = TestPokemonBuilder::new("Chenipan", 3)
///     .capturable()
///     .with_hp(4)
///     .build();
/// ```
pub struct TestPokemonBuilder {
    name: String,
    level: u8,
    stats: Option<(u16, u16, u16)>,
    current_hp: Option<u16>,
    capturable: bool,
}

impl TestPokemonBuilder {
    /// Creates a new builder for a given template name and level.
    pub fn new(name: &str, level: u8) -> Self {
        Self {
            name: name.to_string(),
            level,
            stats: None,
            current_hp: None,
            capturable: false,
        }
    }

    /// Overrides max HP, attack and defense instead of taking them from the template.
    pub fn with_stats(mut self, max_hp: u16, attack: u16, defense: u16) -> Self {
        self.stats = Some((max_hp, attack, defense));
        self
    }

    /// Sets the current HP for the test Pokemon. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    /// Marks the Pokemon as wild.
    pub fn capturable(mut self) -> Self {
        self.capturable = true;
        self
    }

    /// Builds the `PokemonInst`.
    pub fn build(self) -> PokemonInst {
        let factory = match PokemonFactory::builtin() {
            Ok(factory) => factory,
            Err(err) => panic!("Failed to load built-in game data: {}", err),
        };
        let Some(template) = factory.data().template(&self.name) else {
            panic!("No template named {:?}", self.name);
        };

        let mut pokemon = match self.stats {
            Some((max_hp, attack, defense)) => PokemonInst::new(
                template.name.clone(),
                template.types.clone(),
                self.level,
                max_hp,
                attack,
                defense,
                template.evolves_into.clone(),
            ),
            None => PokemonInst::from_template(template, self.level),
        };
        pokemon.capturable = self.capturable;

        if let Some(hp) = self.current_hp {
            pokemon.set_hp(hp);
        }

        pokemon
    }
}

/// Creates a human test trainer owning `team`, the first Pokemon active.
pub fn create_test_player(team: Vec<PokemonInst>) -> Trainer {
    let mut trainer = Trainer::new("Sacha", 10, PlayerType::Human);
    for pokemon in team {
        trainer.add_pokemon(pokemon);
    }
    trainer
}

/// Creates an NPC trainer with the given name and team.
pub fn create_test_rival(name: &str, team: Vec<PokemonInst>) -> Trainer {
    let mut trainer = Trainer::new(name, 12, PlayerType::NPC);
    for pokemon in team {
        trainer.add_pokemon(pokemon);
    }
    trainer
}

/// Creates a wild battle with default rules.
pub fn create_wild_battle(player: &mut Trainer, wild: PokemonInst) -> BattleState<'_> {
    assert_ok(BattleState::new(player, Opponent::Wild(wild), BattleRules::default()))
}

/// Creates a trainer battle with default rules.
pub fn create_trainer_battle(player: &mut Trainer, rival: Trainer) -> BattleState<'_> {
    assert_ok(BattleState::new(player, Opponent::Trainer(rival), BattleRules::default()))
}

/// Helper function to assert that a Result is Ok and return the value.
/// Provides clear error messages in tests when functions unexpectedly fail.
pub fn assert_ok<T>(result: BattleResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}
