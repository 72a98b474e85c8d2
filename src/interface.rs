//! Line-based console front end.
//!
//! Reads choices from any `BufRead` and writes menus and battle text to any
//! `Write`, so the same code drives stdin/stdout and scripted test sessions.

use crate::battle::ai::Behavior;
use crate::battle::state::{BattleState, EventBus};
use crate::errors::{ActionError, BattleEngineError, BattleResult};
use crate::player::{ActionKind, PlayerAction, Trainer};
use crate::rng::GameRng;
use log::warn;
use std::io::{BufRead, Write};

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn say(&mut self, text: &str) -> BattleResult<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Read one trimmed line. A closed input stream is an error.
    pub fn read_line(&mut self) -> BattleResult<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(BattleEngineError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    pub fn prompt(&mut self, text: &str) -> BattleResult<String> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        self.read_line()
    }

    /// Prompt for a 1-based number and return it 0-based. `None` when the
    /// answer is not a positive number.
    pub fn prompt_choice(&mut self, text: &str) -> BattleResult<Option<usize>> {
        let answer = self.prompt(text)?;
        Ok(parse_choice(&answer))
    }

    /// Show a numbered menu and ask until one of its entries is picked.
    pub fn menu(&mut self, title: &str, options: &[&str]) -> BattleResult<usize> {
        loop {
            self.say(title)?;
            for (i, option) in options.iter().enumerate() {
                self.say(&format!("{}. {}", i + 1, option))?;
            }
            match self.prompt_choice("> ")? {
                Some(choice) if choice < options.len() => return Ok(choice),
                _ => {
                    warn!("Invalid menu choice for {:?}", title);
                    self.say("Invalid choice!")?;
                }
            }
        }
    }

    fn choose_item(&mut self, player: &Trainer) -> BattleResult<Option<usize>> {
        let usable = player.usable_items();
        loop {
            self.say("Your bag:")?;
            self.say("0. Cancel")?;
            for (i, (_, item)) in usable.iter().enumerate() {
                self.say(&format!("{}. {}", i + 1, item))?;
            }
            let answer = self.prompt("Choose an item to use: ")?;
            match answer.parse::<usize>() {
                Ok(0) => return Ok(None),
                // Out of range numbers go through so the turn reports an invalid item
                Ok(number) => return Ok(Some(number - 1)),
                Err(_) => {
                    warn!("Unparseable item choice {:?}", answer);
                    self.say("Invalid item!")?;
                }
            }
        }
    }

    fn choose_target(&mut self, player: &Trainer) -> BattleResult<Option<usize>> {
        let alive = player.alive_indices();
        if alive.len() < 2 {
            return Ok(None);
        }
        self.say("On which Pokemon?")?;
        for (i, &team_index) in alive.iter().enumerate() {
            self.say(&format!("{}. {}", i + 1, player.team[team_index]))?;
        }
        let choice = self.prompt_choice("> ")?;
        match choice {
            Some(slot) if slot < alive.len() => Ok(Some(slot)),
            _ => {
                warn!("Invalid target choice, defaulting to the first Pokemon");
                Ok(None)
            }
        }
    }
}

/// Parse a 1-based menu answer into a 0-based index.
pub fn parse_choice(answer: &str) -> Option<usize> {
    answer
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|number| number.checked_sub(1))
}

impl<R: BufRead, W: Write> Behavior for Console<R, W> {
    fn decide_action(
        &mut self,
        state: &BattleState,
        _rng: &mut GameRng,
    ) -> BattleResult<PlayerAction> {
        let actions = state.available_actions();
        let labels: Vec<&str> = actions.iter().map(|action| action.label()).collect();
        let choice = self.menu("What will you do?", &labels)?;

        Ok(match actions[choice] {
            ActionKind::Attack => PlayerAction::Attack,
            ActionKind::Defend => PlayerAction::Defend,
            ActionKind::UseItem => {
                let item_slot = self.choose_item(&*state.player)?;
                let target_slot = match item_slot {
                    Some(_) => self.choose_target(&*state.player)?,
                    None => None,
                };
                PlayerAction::UseItem {
                    item_slot,
                    target_slot,
                }
            }
            ActionKind::ThrowCaptureDevice => PlayerAction::ThrowCaptureDevice,
            ActionKind::Flee => PlayerAction::Flee,
        })
    }

    fn observe(&mut self, events: &EventBus) -> BattleResult<()> {
        events.write_formatted(&mut self.output)?;
        Ok(())
    }

    fn show_status(&mut self, state: &BattleState) -> BattleResult<()> {
        writeln!(self.output, "\n{}", state)?;
        Ok(())
    }

    fn action_rejected(&mut self, error: &ActionError) -> BattleResult<()> {
        self.say(&error.to_string())
    }
}
