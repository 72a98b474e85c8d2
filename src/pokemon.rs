use crate::battle::state::{BattleEvent, EventBus};
use crate::progression::{
    experience_threshold, should_evolve, EVOLUTION_ATTACK_MULTIPLIER,
    EVOLUTION_DEFENSE_MULTIPLIER, EVOLUTION_HP_MULTIPLIER, EVOLUTION_ROLL_MAX,
    EVOLUTION_ROLL_MIN, LEVEL_UP_ATTACK, LEVEL_UP_DEFENSE, LEVEL_UP_HP,
};
use crate::rng::GameRng;
use schema::{format_types, ElementType, PokemonTemplate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Defense gained by the defend action, lost again after the next hit taken.
pub const DEFEND_BONUS: u16 = 2;

/// Bounds of the random bonus added to every attack's damage.
pub const DAMAGE_BONUS_MIN: u32 = 1;
pub const DAMAGE_BONUS_MAX: u32 = 4;

/// Stat boosts from items, rolled back when the battle ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleBoosts {
    pub attack: u16,
    pub defense: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonInst {
    pub name: String,                 // Changes on evolution
    pub types: Vec<ElementType>,      // Informational only
    pub level: u8,
    pub curr_exp: u32,                // Always below exp_to_next_level between calls
    exp_to_next_level: u32,
    curr_hp: u16,
    max_hp: u16,
    attack: u16,
    defense: u16,
    base_defense: u16,                // Defense without the defend bonus
    pub can_evolve: bool,
    pub evolves_into: Option<String>,
    pub capturable: bool,             // Only wild Pokemon can be caught
    boosts: BattleBoosts,
}

impl PokemonInst {
    /// Create a new Pokemon at full health with no experience.
    pub fn new(
        name: impl Into<String>,
        types: Vec<ElementType>,
        level: u8,
        max_hp: u16,
        attack: u16,
        defense: u16,
        evolves_into: Option<String>,
    ) -> Self {
        let level = level.max(1);
        PokemonInst {
            name: name.into(),
            types,
            level,
            curr_exp: 0,
            exp_to_next_level: experience_threshold(level),
            curr_hp: max_hp,
            max_hp,
            attack,
            defense,
            base_defense: defense,
            can_evolve: evolves_into.is_some(),
            evolves_into,
            capturable: false,
            boosts: BattleBoosts::default(),
        }
    }

    /// Create a Pokemon from a data template at the given level.
    pub fn from_template(template: &PokemonTemplate, level: u8) -> Self {
        let level = level.max(1);
        Self::new(
            template.name.clone(),
            template.types.clone(),
            level,
            template.hp.at_level(level),
            template.attack.at_level(level),
            template.defense.at_level(level),
            template.evolves_into.clone(),
        )
    }

    pub fn current_hp(&self) -> u16 {
        self.curr_hp
    }

    pub fn max_hp(&self) -> u16 {
        self.max_hp
    }

    pub fn attack_stat(&self) -> u16 {
        self.attack
    }

    pub fn defense_stat(&self) -> u16 {
        self.defense
    }

    pub fn base_defense(&self) -> u16 {
        self.base_defense
    }

    pub fn exp_to_next_level(&self) -> u32 {
        self.exp_to_next_level
    }

    pub fn boosts(&self) -> BattleBoosts {
        self.boosts
    }

    pub fn is_alive(&self) -> bool {
        self.curr_hp > 0
    }

    pub fn is_fainted(&self) -> bool {
        !self.is_alive()
    }

    /// Set current HP, clamped to max HP.
    pub fn set_hp(&mut self, hp: u16) {
        self.curr_hp = hp.min(self.max_hp);
    }

    pub fn set_hp_to_max(&mut self) {
        self.curr_hp = self.max_hp;
    }

    /// Restore up to `amount` HP. Returns the HP actually restored.
    pub fn heal(&mut self, amount: u16) -> u16 {
        let before = self.curr_hp;
        self.curr_hp = self.curr_hp.saturating_add(amount).min(self.max_hp);
        self.curr_hp - before
    }

    /// Attack `target`: deals `attack - target.defense + 1d4` damage (never negative),
    /// then drops any defend bonus the target was holding. Returns the damage dealt.
    pub fn attack(&self, target: &mut PokemonInst, rng: &mut GameRng, bus: &mut EventBus) -> u16 {
        let bonus = rng.range(DAMAGE_BONUS_MIN, DAMAGE_BONUS_MAX, "damage bonus");
        let damage = calculate_damage(self.attack, target.defense, bonus);

        bus.push(BattleEvent::AttackUsed {
            attacker: self.name.clone(),
            target: target.name.clone(),
            damage,
        });
        target.receive_damage(damage, bus);
        target.reset_defense(bus);
        damage
    }

    /// Raise defense by DEFEND_BONUS until the next hit is taken. Stacks.
    pub fn defend(&mut self, bus: &mut EventBus) {
        self.defense = self.defense.saturating_add(DEFEND_BONUS);
        bus.push(BattleEvent::DefenseRaised {
            pokemon: self.name.clone(),
            defense: self.defense,
        });
    }

    /// Drop any pending defend bonus.
    pub fn reset_defense(&mut self, bus: &mut EventBus) {
        if self.defense != self.base_defense {
            self.defense = self.base_defense;
            bus.push(BattleEvent::DefenseReset {
                pokemon: self.name.clone(),
                defense: self.defense,
            });
        }
    }

    /// Subtract `amount` HP, clamped at 0. Returns the remaining HP.
    pub fn receive_damage(&mut self, amount: u16, bus: &mut EventBus) -> u16 {
        self.curr_hp = self.curr_hp.saturating_sub(amount);
        bus.push(BattleEvent::DamageDealt {
            target: self.name.clone(),
            damage: amount,
            remaining_hp: self.curr_hp,
            max_hp: self.max_hp,
        });
        if self.curr_hp == 0 {
            bus.push(BattleEvent::PokemonFainted {
                pokemon: self.name.clone(),
            });
        }
        self.curr_hp
    }

    /// Add experience, levelling up once per threshold crossed. Returns the
    /// number of levels gained.
    pub fn gain_experience(&mut self, amount: u32, rng: &mut GameRng, bus: &mut EventBus) -> u8 {
        self.curr_exp = self.curr_exp.saturating_add(amount);
        bus.push(BattleEvent::ExperienceGained {
            pokemon: self.name.clone(),
            amount,
        });

        let mut levels_gained = 0;
        while self.curr_exp >= self.exp_to_next_level && self.level < u8::MAX {
            self.level_up(rng, bus);
            levels_gained += 1;
        }
        levels_gained
    }

    /// Advance one level: spend the threshold, grow stats, heal fully, and
    /// evolve when eligible.
    pub fn level_up(&mut self, rng: &mut GameRng, bus: &mut EventBus) {
        self.curr_exp = self.curr_exp.saturating_sub(self.exp_to_next_level);
        self.level = self.level.saturating_add(1);
        self.max_hp = self.max_hp.saturating_add(LEVEL_UP_HP);
        self.attack = self.attack.saturating_add(LEVEL_UP_ATTACK);
        self.defense = self.defense.saturating_add(LEVEL_UP_DEFENSE);
        self.base_defense = self.base_defense.saturating_add(LEVEL_UP_DEFENSE);
        self.curr_hp = self.max_hp;
        self.exp_to_next_level = experience_threshold(self.level);

        bus.push(BattleEvent::LevelUp {
            pokemon: self.name.clone(),
            new_level: self.level,
        });

        if should_evolve(self.can_evolve, self.level) {
            self.evolve(rng, bus);
        }
    }

    /// Evolve into `evolves_into` with randomized stat gains. Happens at most
    /// once. Returns false when there is nothing to evolve into.
    pub fn evolve(&mut self, rng: &mut GameRng, bus: &mut EventBus) -> bool {
        let Some(evolution) = self.evolves_into.take() else {
            return false;
        };

        let hp_roll = rng.range(EVOLUTION_ROLL_MIN, EVOLUTION_ROLL_MAX, "evolution hp") as u16;
        let attack_roll =
            rng.range(EVOLUTION_ROLL_MIN, EVOLUTION_ROLL_MAX, "evolution attack") as u16;
        let defense_roll =
            rng.range(EVOLUTION_ROLL_MIN, EVOLUTION_ROLL_MAX, "evolution defense") as u16;

        let previous_name = std::mem::replace(&mut self.name, evolution);
        self.max_hp = self
            .max_hp
            .saturating_add(EVOLUTION_HP_MULTIPLIER * hp_roll);
        self.attack = self
            .attack
            .saturating_add(EVOLUTION_ATTACK_MULTIPLIER * attack_roll);
        let defense_gain = EVOLUTION_DEFENSE_MULTIPLIER * defense_roll;
        self.defense = self.defense.saturating_add(defense_gain);
        self.base_defense = self.base_defense.saturating_add(defense_gain);
        self.curr_hp = self.max_hp;
        self.can_evolve = false;

        bus.push(BattleEvent::Evolved {
            from: previous_name,
            into: self.name.clone(),
        });
        true
    }

    /// Add an item boost to attack for the rest of the battle.
    pub fn boost_attack(&mut self, amount: u16) -> u16 {
        self.attack = self.attack.saturating_add(amount);
        self.boosts.attack = self.boosts.attack.saturating_add(amount);
        self.attack
    }

    /// Add an item boost to defense for the rest of the battle. The base
    /// defense rises too, so the boost survives the post-hit reset.
    pub fn boost_defense(&mut self, amount: u16) -> u16 {
        self.defense = self.defense.saturating_add(amount);
        self.base_defense = self.base_defense.saturating_add(amount);
        self.boosts.defense = self.boosts.defense.saturating_add(amount);
        self.defense
    }

    /// Clear everything that only lasts for one battle: the defend bonus and
    /// item boosts.
    pub fn end_battle(&mut self) {
        self.attack = self.attack.saturating_sub(self.boosts.attack);
        self.base_defense = self.base_defense.saturating_sub(self.boosts.defense);
        self.defense = self.base_defense;
        self.boosts = BattleBoosts::default();
    }
}

/// `attack - defense + bonus`, floored at 0.
pub fn calculate_damage(attack: u16, defense: u16, bonus: u32) -> u16 {
    let raw = attack as i64 - defense as i64 + bonus as i64;
    raw.clamp(0, u16::MAX as i64) as u16
}

impl fmt::Display for PokemonInst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (Lv. {}) HP: {}/{} ATK: {} DEF: {} XP: {}/{}",
            self.name,
            self.level,
            self.curr_hp,
            self.max_hp,
            self.attack,
            self.defense,
            self.curr_exp,
            self.exp_to_next_level
        )?;
        if f.alternate() {
            write!(f, "\n    Type: {}", format_types(&self.types))?;
            if let Some(evolution) = &self.evolves_into {
                if self.can_evolve {
                    write!(
                        f,
                        "\n    Evolves into {} at level {}",
                        evolution,
                        crate::progression::EVOLUTION_LEVEL
                    )?;
                }
            }
        }
        Ok(())
    }
}
