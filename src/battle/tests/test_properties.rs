use crate::battle::catch::can_attempt_catch;
use crate::battle::state::EventBus;
use crate::items::{Item, ItemOutcome};
use crate::pokemon::{calculate_damage, PokemonInst};
use crate::rng::GameRng;
use proptest::prelude::*;
use schema::ElementType;

fn pokemon(max_hp: u16, attack: u16, defense: u16, evolves: bool) -> PokemonInst {
    PokemonInst::new(
        "Testmon",
        vec![ElementType::Normal],
        1,
        max_hp,
        attack,
        defense,
        evolves.then(|| "Evomon".to_string()),
    )
}

proptest! {
    #[test]
    fn damage_is_never_negative(attack in 0u16..200, defense in 0u16..200, bonus in 1u32..=4) {
        let damage = calculate_damage(attack, defense, bonus);
        let expected = (attack as i64 - defense as i64 + bonus as i64).max(0);
        prop_assert_eq!(damage as i64, expected);
    }

    #[test]
    fn attack_keeps_target_hp_in_bounds(
        attack in 0u16..100,
        defense in 0u16..100,
        max_hp in 1u16..200,
        roll in 1u32..=4,
    ) {
        let attacker = pokemon(50, attack, 0, false);
        let mut target = pokemon(max_hp, 0, defense, false);
        let mut rng = GameRng::new_for_test(vec![roll]);
        let mut bus = EventBus::new();

        let damage = attacker.attack(&mut target, &mut rng, &mut bus);

        prop_assert!(target.current_hp() <= target.max_hp());
        prop_assert_eq!(target.current_hp(), max_hp.saturating_sub(damage));
        prop_assert_eq!(target.is_alive(), target.current_hp() > 0);
        prop_assert_eq!(target.defense_stat(), target.base_defense());
    }

    #[test]
    fn receive_damage_clamps(max_hp in 1u16..500, hits in prop::collection::vec(0u16..100, 0..10)) {
        let mut target = pokemon(max_hp, 1, 1, false);
        let mut bus = EventBus::new();
        for hit in hits {
            let remaining = target.receive_damage(hit, &mut bus);
            prop_assert!(remaining <= max_hp);
            prop_assert_eq!(remaining, target.current_hp());
        }
    }

    #[test]
    fn experience_stays_below_threshold(awards in prop::collection::vec(0u32..400, 1..8)) {
        let mut creature = pokemon(20, 5, 5, false);
        let mut rng = GameRng::new_for_test(vec![]);
        let mut bus = EventBus::new();
        let mut total_levels = 0u32;

        for award in awards {
            let before = creature.level;
            let gained = creature.gain_experience(award, &mut rng, &mut bus);
            total_levels += gained as u32;
            prop_assert_eq!(creature.level, before + gained);
            prop_assert!(creature.curr_exp < creature.exp_to_next_level());
            prop_assert_eq!(creature.exp_to_next_level(), creature.level as u32 * 10);
        }
        prop_assert_eq!(creature.level as u32, 1 + total_levels);
    }

    #[test]
    fn evolution_happens_at_most_once(levels in 1usize..12, evolves in any::<bool>()) {
        let mut creature = pokemon(20, 5, 5, evolves);
        let mut rng = GameRng::new_for_test(vec![3; 3]);
        let mut bus = EventBus::new();

        for _ in 0..levels {
            creature.level_up(&mut rng, &mut bus);
        }

        let evolved = evolves && creature.level >= 5;
        prop_assert_eq!(creature.name == "Evomon", evolved);
        prop_assert_eq!(creature.can_evolve, evolves && !evolved);
        prop_assert_eq!(rng.remaining_scripted(), if evolved { 0 } else { 3 });
    }

    #[test]
    fn capture_follows_half_hp_rule(
        max_hp in 2u16..100,
        hp_seed in any::<u16>(),
        draw_seed in any::<u32>()
    ) {
        let hp = hp_seed % (max_hp + 1);
        let draw = draw_seed % (max_hp as u32 + 1);
        let mut target = pokemon(max_hp, 1, 1, false);
        target.capturable = true;
        target.set_hp(hp);
        let eligible = can_attempt_catch(&target).is_ok();
        let mut rng = GameRng::new_for_test(vec![draw]);
        let mut bus = EventBus::new();

        let outcome = Item::CaptureDevice.apply(&mut target, &mut rng, &mut bus);

        prop_assert_eq!(eligible, hp > 0 && hp <= max_hp / 2);
        let expected = if eligible && (hp as u32) < draw {
            ItemOutcome::Captured
        } else {
            ItemOutcome::Failed
        };
        prop_assert_eq!(outcome, expected);
    }
}
