use crate::battle::state::{BattleEvent, EventBus};
use crate::errors::{ActionError, BattleResult};
use crate::items::{Item, ItemOutcome};
use crate::pokemon::PokemonInst;
use crate::rng::GameRng;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerType {
    Human,
    NPC,
}

/// The entries of the battle menu.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Attack,
    Defend,
    UseItem,
    ThrowCaptureDevice,
    Flee,
}

impl ActionKind {
    pub fn label(self) -> &'static str {
        match self {
            ActionKind::Attack => "Attack",
            ActionKind::Defend => "Defend",
            ActionKind::UseItem => "Use item",
            ActionKind::ThrowCaptureDevice => "Throw Poke Ball",
            ActionKind::Flee => "Flee",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum PlayerAction {
    Attack,
    Defend,
    // `item_slot` indexes the usable (non capture) items; None cancels.
    // `target_slot` indexes the alive Pokemon; None picks the first one.
    UseItem {
        item_slot: Option<usize>,
        target_slot: Option<usize>,
    },
    ThrowCaptureDevice,
    Flee,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Trainer {
    pub name: String,
    pub age: u8,
    // Kept for display; nothing raises it.
    pub level: u8,
    // Informational: who plays the side is decided by the controller passed to the runner.
    pub player_type: PlayerType,

    // Insertion order is selection order.
    pub team: Vec<PokemonInst>,
    pub inventory: Vec<Item>,

    // None once every Pokemon on the team has fainted.
    active_pokemon_index: Option<usize>,
}

impl Trainer {
    pub fn new(name: impl Into<String>, age: u8, player_type: PlayerType) -> Self {
        Trainer {
            name: name.into(),
            age,
            level: 1,
            player_type,
            team: Vec::new(),
            inventory: Vec::new(),
            active_pokemon_index: None,
        }
    }

    /// Add a Pokemon to the end of the team. The first one added becomes active.
    pub fn add_pokemon(&mut self, pokemon: PokemonInst) {
        self.team.push(pokemon);
        if self.active_pokemon_index.is_none() {
            self.select_active_pokemon(None);
        }
    }

    pub fn add_item(&mut self, item: Item) {
        self.inventory.push(item);
    }

    pub fn active_pokemon_index(&self) -> Option<usize> {
        self.active_pokemon_index
    }

    pub fn active_pokemon(&self) -> Option<&PokemonInst> {
        self.active_pokemon_index.and_then(|i| self.team.get(i))
    }

    pub fn active_pokemon_mut(&mut self) -> Option<&mut PokemonInst> {
        self.active_pokemon_index.and_then(|i| self.team.get_mut(i))
    }

    /// Team indices of the Pokemon that can still battle, in team order.
    pub fn alive_indices(&self) -> Vec<usize> {
        self.team
            .iter()
            .enumerate()
            .filter(|(_, pokemon)| pokemon.is_alive())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn has_alive_pokemon(&self) -> bool {
        self.team.iter().any(PokemonInst::is_alive)
    }

    /// Make a living Pokemon active. `choice` indexes the alive Pokemon only;
    /// a missing or out of range choice picks the first alive one. Returns the
    /// team index selected, or None (and no active Pokemon) if all have fainted.
    pub fn select_active_pokemon(&mut self, choice: Option<usize>) -> Option<usize> {
        let alive = self.alive_indices();
        let selected = choice
            .and_then(|c| alive.get(c).copied())
            .or_else(|| alive.first().copied());
        self.active_pokemon_index = selected;
        selected
    }

    /// Replace a knocked-out active Pokemon with the first living one.
    /// Returns false when nothing on the team can battle.
    pub fn ready_for_battle(&mut self) -> bool {
        if self.active_pokemon().is_some_and(PokemonInst::is_alive) {
            return true;
        }
        self.select_active_pokemon(None).is_some()
    }

    /// Level used to scale encounters: that of the active Pokemon.
    pub fn battle_level(&self) -> u8 {
        self.active_pokemon().map_or(self.level, |pokemon| pokemon.level)
    }

    /// Inventory positions of items usable from the item menu (everything but
    /// capture devices), paired with the item.
    pub fn usable_items(&self) -> Vec<(usize, Item)> {
        self.inventory
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, item)| !item.is_capture_device())
            .collect()
    }

    pub fn capture_device_index(&self) -> Option<usize> {
        self.inventory.iter().position(Item::is_capture_device)
    }

    pub fn count_items(&self, name: &str) -> usize {
        self.inventory.iter().filter(|item| item.name() == name).count()
    }

    /// Use a non capture item from the bag on one of this trainer's Pokemon.
    /// The target becomes the active Pokemon. The item leaves the inventory
    /// only if it was consumed.
    pub fn use_item(
        &mut self,
        item_slot: Option<usize>,
        target_slot: Option<usize>,
        rng: &mut GameRng,
        bus: &mut EventBus,
    ) -> ItemOutcome {
        let Some(slot) = item_slot else {
            bus.push(BattleEvent::ItemCancelled);
            return ItemOutcome::Failed;
        };
        let Some((inventory_index, item)) = self.usable_items().get(slot).copied() else {
            bus.push(BattleEvent::InvalidItemChoice { choice: slot });
            return ItemOutcome::Failed;
        };
        let Some(team_index) = self.select_active_pokemon(target_slot) else {
            bus.push(BattleEvent::NoTargetAvailable);
            return ItemOutcome::Failed;
        };

        let outcome = item.apply(&mut self.team[team_index], rng, bus);
        if outcome.is_consumed() {
            self.inventory.remove(inventory_index);
        }
        outcome
    }

    /// Throw a capture device at a wild Pokemon. On a catch, a copy of the
    /// target joins the end of the team with its battle state cleared.
    pub fn throw_capture_device(
        &mut self,
        target: &mut PokemonInst,
        rng: &mut GameRng,
        bus: &mut EventBus,
    ) -> BattleResult<ItemOutcome> {
        let index = self
            .capture_device_index()
            .ok_or(ActionError::NoCaptureDevice)?;
        let outcome = self.inventory[index].apply(target, rng, bus);
        if outcome.is_consumed() {
            self.inventory.remove(index);
        }
        if outcome == ItemOutcome::Captured {
            let mut caught = target.clone();
            caught.capturable = false;
            caught.end_battle();
            self.add_pokemon(caught);
        }
        Ok(outcome)
    }

    /// Remove a Pokemon from the team, keeping the active selection on a
    /// living Pokemon.
    pub fn remove_pokemon(&mut self, index: usize) -> Option<PokemonInst> {
        if index >= self.team.len() {
            return None;
        }
        let removed = self.team.remove(index);
        self.select_active_pokemon(None);
        Some(removed)
    }

    /// Fully restore every Pokemon on the team.
    pub fn heal_all(&mut self) {
        for pokemon in &mut self.team {
            pokemon.set_hp_to_max();
        }
        if !self.active_pokemon().is_some_and(PokemonInst::is_alive) {
            self.select_active_pokemon(None);
        }
    }

    /// Drop every battle-only modifier on the team.
    pub fn end_battle(&mut self) {
        for pokemon in &mut self.team {
            pokemon.end_battle();
        }
    }

    pub fn team_summary(&self) -> String {
        let mut lines = Vec::with_capacity(self.team.len() + 1);
        lines.push(format!("{}'s team:", self.name));
        for (i, pokemon) in self.team.iter().enumerate() {
            let marker = if Some(i) == self.active_pokemon_index {
                "*"
            } else {
                " "
            };
            lines.push(format!("{} {}. {:#}", marker, i + 1, pokemon));
        }
        lines.join("\n")
    }

    pub fn inventory_summary(&self) -> String {
        if self.inventory.is_empty() {
            return "Your bag is empty.".to_string();
        }
        let mut lines = vec!["Bag:".to_string()];
        for (i, item) in self.inventory.iter().enumerate() {
            lines.push(format!("  {}. {}", i + 1, item));
        }
        lines.join("\n")
    }
}
