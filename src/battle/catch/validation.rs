use crate::pokemon::PokemonInst;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatchFailureReason {
    /// Target belongs to a trainer
    NotCapturable,
    /// Target has no HP left
    TargetFainted,
    /// Target has more than half of its max HP
    TooHealthy { hp: u16, max_hp: u16 },
    /// Target was weak enough but the capture roll missed
    RollFailed { roll: u32 },
}

/// Check whether a capture device may be thrown at `target` at all.
/// Passing this check only makes the capture roll possible.
pub fn can_attempt_catch(target: &PokemonInst) -> Result<(), CatchFailureReason> {
    if !target.capturable {
        return Err(CatchFailureReason::NotCapturable);
    }
    if target.is_fainted() {
        return Err(CatchFailureReason::TargetFainted);
    }
    if target.current_hp() > target.max_hp() / 2 {
        return Err(CatchFailureReason::TooHealthy {
            hp: target.current_hp(),
            max_hp: target.max_hp(),
        });
    }
    Ok(())
}
