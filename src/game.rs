use crate::battle::runner::run_battle;
use crate::battle::state::{BattleState, Opponent};
use crate::config::GameConfig;
use crate::dungeon::Dungeon;
use crate::errors::{BattleEngineError, GameError, GameResult};
use crate::factory::PokemonFactory;
use crate::interface::{parse_choice, Console};
use crate::player::{PlayerType, Trainer};
use crate::rng::GameRng;
use log::{info, warn};
use std::io::{BufRead, Write};

const DEFAULT_AGE: u8 = 10;
const DEFAULT_NAME: &str = "Red";

const MAIN_MENU: [&str; 5] = ["View team", "Explore", "View inventory", "Rest", "Quit"];

/// What an exploration roll turned up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encounter {
    Wild,
    Trainer,
    Dungeon,
}

/// One interactive session: the player, the data they battle against and the console they play on.
pub struct Game<R, W> {
    console: Console<R, W>,
    factory: PokemonFactory,
    config: GameConfig,
    rng: GameRng,
    player: Trainer,
}

impl<R: BufRead, W: Write> Game<R, W> {
    /// Ask for the player's name, age and starter and hand out the starting bag.
    pub fn setup(
        mut console: Console<R, W>,
        factory: PokemonFactory,
        config: GameConfig,
        rng: GameRng,
    ) -> GameResult<Self> {
        console.say("Welcome to the world of Pokemon!")?;

        let name = console.prompt("What is your name? ")?;
        let name = if name.is_empty() {
            warn!("Empty trainer name, using {}", DEFAULT_NAME);
            DEFAULT_NAME.to_string()
        } else {
            name
        };

        let age_answer = console.prompt("How old are you? ")?;
        let age = age_answer.parse::<u8>().unwrap_or_else(|_| {
            warn!("Invalid age {:?}, using {}", age_answer, DEFAULT_AGE);
            DEFAULT_AGE
        });

        let mut player = Trainer::new(name, age, PlayerType::Human);

        let starters: Vec<String> = factory.starter_names().into_iter().map(String::from).collect();
        console.say("Choose your starter:")?;
        for (i, starter) in starters.iter().enumerate() {
            console.say(&format!("{}. {}", i + 1, starter))?;
        }
        let choice = console.prompt_choice("> ")?;
        let starter_name = match choice.and_then(|index| starters.get(index)) {
            Some(name) => name.as_str(),
            None => {
                warn!("Invalid starter choice, defaulting to the first starter");
                starters.first().map_or("", String::as_str)
            }
        };
        let starter = factory.create_starter(starter_name)?;
        console.say(&format!("{} chose {}!", player.name, starter.name))?;
        player.add_pokemon(starter);

        for item in config.starting_items() {
            player.add_item(item);
        }
        info!(
            "{} (age {}) starts with {} items",
            player.name,
            player.age,
            player.inventory.len()
        );

        Ok(Self {
            console,
            factory,
            config,
            rng,
            player,
        })
    }

    pub fn player(&self) -> &Trainer {
        &self.player
    }

    pub fn console(&self) -> &Console<R, W> {
        &self.console
    }

    /// Main menu loop. Returns when the player quits or the input closes.
    pub fn run(&mut self) -> GameResult<()> {
        match self.main_menu() {
            Err(GameError::Battle(BattleEngineError::InputClosed)) => {
                info!("Input closed, ending the session");
                Ok(())
            }
            result => result,
        }
    }

    fn main_menu(&mut self) -> GameResult<()> {
        loop {
            self.console.say("")?;
            self.console.say("What do you want to do?")?;
            for (i, entry) in MAIN_MENU.iter().enumerate() {
                self.console.say(&format!("{}. {}", i + 1, entry))?;
            }
            let answer = self.console.prompt("> ")?;

            match parse_choice(&answer) {
                Some(0) => {
                    let summary = self.player.team_summary();
                    self.console.say(&summary)?;
                }
                Some(1) => self.explore()?,
                Some(2) => {
                    let summary = self.player.inventory_summary();
                    self.console.say(&summary)?;
                }
                Some(3) => self.rest()?,
                Some(4) => {
                    self.console.say("See you next time!")?;
                    return Ok(());
                }
                _ => {
                    warn!("Invalid main menu choice {:?}", answer);
                    self.console.say("Invalid choice!")?;
                }
            }
        }
    }

    fn rest(&mut self) -> GameResult<()> {
        self.player.heal_all();
        self.console.say("Your Pokemon are fully healed.")?;
        Ok(())
    }

    /// Roll an encounter and play it out.
    pub fn explore(&mut self) -> GameResult<()> {
        if !self.player.ready_for_battle() {
            self.console
                .say("None of your Pokemon can battle. Rest before exploring.")?;
            return Ok(());
        }

        let encounter = roll_encounter(&self.config, &mut self.rng);
        info!("Exploration rolled {:?}", encounter);
        let level = self.player.battle_level();
        let rules = self.config.battle_rules();

        match encounter {
            Encounter::Wild => {
                let wild = self.factory.create_wild(level, &mut self.rng)?;
                let mut state = BattleState::new(&mut self.player, Opponent::Wild(wild), rules)?;
                run_battle(&mut state, &mut self.console, &mut self.rng)?;
            }
            Encounter::Trainer => {
                let rival = self
                    .factory
                    .create_enemy_trainer(level, self.config.enemy_team_size, &mut self.rng)?;
                let mut state =
                    BattleState::new(&mut self.player, Opponent::Trainer(rival), rules)?;
                run_battle(&mut state, &mut self.console, &mut self.rng)?;
            }
            Encounter::Dungeon => {
                self.console.say("You found the entrance to a dungeon!")?;
                let dungeon = Dungeon {
                    stages: self.config.dungeon_stages,
                    boss_level_offset: self.config.boss_level_offset,
                    enemy_team_size: self.config.enemy_team_size,
                };
                dungeon.run(
                    &mut self.player,
                    &self.factory,
                    rules,
                    &mut self.console,
                    &mut self.rng,
                )?;
            }
        }

        // A fainted lead is swapped for the next living Pokemon right away
        self.player.ready_for_battle();
        Ok(())
    }
}

/// Weighted pick between a wild encounter, a trainer battle and a dungeon.
pub fn roll_encounter(config: &GameConfig, rng: &mut GameRng) -> Encounter {
    let weights = config.encounter_weights;
    let total = match weights.total() {
        Some(total) if total > 0 => total,
        _ => return Encounter::Wild,
    };
    let roll = rng.range(1, total, "encounter");
    if roll <= weights.wild {
        Encounter::Wild
    } else if roll <= weights.wild + weights.trainer {
        Encounter::Trainer
    } else {
        Encounter::Dungeon
    }
}
