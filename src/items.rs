use crate::battle::catch::{can_attempt_catch, roll_catch_success, CatchFailureReason};
use crate::battle::state::{BattleEvent, EventBus};
use crate::pokemon::PokemonInst;
use crate::rng::GameRng;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_POTION_HEAL: u16 = 20;
pub const DEFAULT_BOOST_AMOUNT: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Item {
    CaptureDevice,
    Potion { heal_amount: u16 },
    AttackBoost { amount: u16 },
    DefenseBoost { amount: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemFailureReason {
    TargetFainted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatType {
    Attack,
    Defense,
}

impl fmt::Display for StatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatType::Attack => write!(f, "attack"),
            StatType::Defense => write!(f, "defense"),
        }
    }
}

/// What happened when an item was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOutcome {
    /// Nothing happened; the item stays in the bag.
    Failed,
    /// The item took effect and is used up.
    Applied,
    /// A capture device caught its target; the caller moves the target into a roster.
    Captured,
}

impl ItemOutcome {
    pub fn is_consumed(self) -> bool {
        !matches!(self, ItemOutcome::Failed)
    }
}

impl Item {
    pub fn potion() -> Self {
        Item::Potion {
            heal_amount: DEFAULT_POTION_HEAL,
        }
    }

    pub fn attack_boost() -> Self {
        Item::AttackBoost {
            amount: DEFAULT_BOOST_AMOUNT,
        }
    }

    pub fn defense_boost() -> Self {
        Item::DefenseBoost {
            amount: DEFAULT_BOOST_AMOUNT,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Item::CaptureDevice => "Poke Ball",
            Item::Potion { .. } => "Potion",
            Item::AttackBoost { .. } => "Attack Boost",
            Item::DefenseBoost { .. } => "Defense Boost",
        }
    }

    pub fn is_capture_device(&self) -> bool {
        matches!(self, Item::CaptureDevice)
    }

    /// Apply the item to `target`. The caller removes the item from its
    /// inventory only when the outcome reports it consumed.
    pub fn apply(
        &self,
        target: &mut PokemonInst,
        rng: &mut GameRng,
        bus: &mut EventBus,
    ) -> ItemOutcome {
        match *self {
            Item::CaptureDevice => throw_capture_device(target, rng, bus),
            Item::Potion { heal_amount } => {
                if target.is_fainted() {
                    bus.push(BattleEvent::ItemFailed {
                        item: self.name().to_string(),
                        target: target.name.clone(),
                        reason: ItemFailureReason::TargetFainted,
                    });
                    return ItemOutcome::Failed;
                }
                let healed = target.heal(heal_amount);
                self.push_used(target, bus);
                bus.push(BattleEvent::PokemonHealed {
                    target: target.name.clone(),
                    amount: healed,
                    new_hp: target.current_hp(),
                    max_hp: target.max_hp(),
                });
                ItemOutcome::Applied
            }
            Item::AttackBoost { amount } => {
                let new_value = target.boost_attack(amount);
                self.push_boosted(target, StatType::Attack, amount, new_value, bus);
                ItemOutcome::Applied
            }
            Item::DefenseBoost { amount } => {
                let new_value = target.boost_defense(amount);
                self.push_boosted(target, StatType::Defense, amount, new_value, bus);
                ItemOutcome::Applied
            }
        }
    }

    fn push_used(&self, target: &PokemonInst, bus: &mut EventBus) {
        bus.push(BattleEvent::ItemUsed {
            item: self.name().to_string(),
            target: target.name.clone(),
        });
    }

    fn push_boosted(
        &self,
        target: &PokemonInst,
        stat: StatType,
        amount: u16,
        new_value: u16,
        bus: &mut EventBus,
    ) {
        self.push_used(target, bus);
        bus.push(BattleEvent::StatBoosted {
            target: target.name.clone(),
            stat,
            amount,
            new_value,
        });
    }
}

fn throw_capture_device(
    target: &mut PokemonInst,
    rng: &mut GameRng,
    bus: &mut EventBus,
) -> ItemOutcome {
    bus.push(BattleEvent::CatchAttempted {
        pokemon: target.name.clone(),
    });

    let failure = match can_attempt_catch(target) {
        Ok(()) => {
            let (roll, caught) = roll_catch_success(target, rng);
            if caught {
                target.capturable = false;
                bus.push(BattleEvent::CatchSucceeded {
                    pokemon: target.name.clone(),
                });
                return ItemOutcome::Captured;
            }
            CatchFailureReason::RollFailed { roll }
        }
        Err(reason) => reason,
    };

    bus.push(BattleEvent::CatchFailed {
        pokemon: target.name.clone(),
        reason: failure,
    });
    ItemOutcome::Failed
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::CaptureDevice => write!(f, "{}", self.name()),
            Item::Potion { heal_amount } => write!(f, "{} (+{} HP)", self.name(), heal_amount),
            Item::AttackBoost { amount } => write!(f, "{} (+{} ATK)", self.name(), amount),
            Item::DefenseBoost { amount } => write!(f, "{} (+{} DEF)", self.name(), amount),
        }
    }
}
