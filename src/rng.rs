use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The single source of randomness for the game. Every randomized rule
/// (damage variance, capture rolls, evolution bonuses, enemy choices,
/// encounter rolls) draws from one of these, passed in explicitly.
#[derive(Debug, Clone)]
pub struct GameRng {
    source: RngSource,
}

#[derive(Debug, Clone)]
enum RngSource {
    Seeded(StdRng),
    Scripted { outcomes: Vec<u32>, index: usize },
}

impl GameRng {
    pub fn new_random() -> Self {
        Self {
            source: RngSource::Seeded(StdRng::from_os_rng()),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            source: RngSource::Seeded(StdRng::seed_from_u64(seed)),
        }
    }

    /// Replays `outcomes` in order, one per draw. Each scripted value must lie
    /// inside the range of the draw that consumes it.
    pub fn new_for_test(outcomes: Vec<u32>) -> Self {
        Self {
            source: RngSource::Scripted { outcomes, index: 0 },
        }
    }

    /// Uniform integer in `low..=high`.
    pub fn range(&mut self, low: u32, high: u32, reason: &str) -> u32 {
        let outcome = match &mut self.source {
            RngSource::Seeded(rng) => rng.random_range(low..=high),
            RngSource::Scripted { outcomes, index } => {
                let Some(&outcome) = outcomes.get(*index) else {
                    panic!(
                        "GameRng exhausted! Tried to get a value for: '{}'.",
                        reason
                    );
                };
                assert!(
                    (low..=high).contains(&outcome),
                    "Scripted value {} for '{}' is outside {}..={}",
                    outcome,
                    reason,
                    low,
                    high
                );
                *index += 1;
                outcome
            }
        };
        debug!("[RNG] {} in {}..={} for: {}", outcome, low, high, reason);
        outcome
    }

    /// True with probability `percent`/100, rolled as 1..=100 <= percent.
    pub fn chance(&mut self, percent: u32, reason: &str) -> bool {
        self.range(1, 100, reason) <= percent
    }

    /// Uniform index into a collection of `len` elements. `len` must be non-zero.
    pub fn index(&mut self, len: usize, reason: &str) -> usize {
        self.range(0, len.saturating_sub(1) as u32, reason) as usize
    }

    /// Number of scripted values not yet consumed; always 0 for a seeded source.
    pub fn remaining_scripted(&self) -> usize {
        match &self.source {
            RngSource::Seeded(_) => 0,
            RngSource::Scripted { outcomes, index } => outcomes.len() - index,
        }
    }
}
