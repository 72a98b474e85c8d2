use crate::pokemon::PokemonInst;

/// Experience needed for the next level is `level * EXP_THRESHOLD_PER_LEVEL`.
pub const EXP_THRESHOLD_PER_LEVEL: u32 = 10;

/// Level at which a Pokemon that can evolve does so.
pub const EVOLUTION_LEVEL: u8 = 5;

// Stat growth applied on every level up
pub const LEVEL_UP_HP: u16 = 5;
pub const LEVEL_UP_ATTACK: u16 = 2;
pub const LEVEL_UP_DEFENSE: u16 = 1;

// Evolution bonuses: each stat gains `multiplier * roll`,
// with roll in EVOLUTION_ROLL_MIN..=EVOLUTION_ROLL_MAX
pub const EVOLUTION_HP_MULTIPLIER: u16 = 5;
pub const EVOLUTION_ATTACK_MULTIPLIER: u16 = 3;
pub const EVOLUTION_DEFENSE_MULTIPLIER: u16 = 2;
pub const EVOLUTION_ROLL_MIN: u32 = 1;
pub const EVOLUTION_ROLL_MAX: u32 = 5;

/// Experience required to advance from `level` to the next.
pub fn experience_threshold(level: u8) -> u32 {
    level as u32 * EXP_THRESHOLD_PER_LEVEL
}

/// Calculator for experience rewards
pub struct RewardCalculator {
    experience_per_level: u32,
}

impl RewardCalculator {
    pub fn new(experience_per_level: u32) -> Self {
        Self {
            experience_per_level,
        }
    }

    /// Experience awarded for knocking out `defeated`: its level times the per-level rate.
    pub fn experience_for_defeating(&self, defeated: &PokemonInst) -> u32 {
        (defeated.level as u32).saturating_mul(self.experience_per_level)
    }
}

/// Whether a Pokemon at `level` with the given flag should evolve now.
pub fn should_evolve(can_evolve: bool, level: u8) -> bool {
    can_evolve && level >= EVOLUTION_LEVEL
}
