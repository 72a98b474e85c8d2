use crate::pokemon::PokemonInst;
use crate::rng::GameRng;

/// Roll a capture against `target`: draw in `0..=max_hp` and succeed when the
/// target's current HP is strictly below the draw. Returns the draw and
/// whether it succeeded.
pub fn roll_catch_success(target: &PokemonInst, rng: &mut GameRng) -> (u32, bool) {
    let roll = rng.range(0, target.max_hp() as u32, "catch roll");
    (roll, (target.current_hp() as u32) < roll)
}
