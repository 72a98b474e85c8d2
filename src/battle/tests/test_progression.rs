#[cfg(test)]
mod tests {
    use crate::battle::engine::resolve_turn;
    use crate::battle::state::{BattleEvent, GameState};
    use crate::battle::tests::common::{
        assert_ok, create_test_player, create_wild_battle, TestPokemonBuilder,
    };
    use crate::player::PlayerAction;
    use crate::rng::GameRng;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wild_victory_awards_level_times_five_experience() {
        let mut player = create_test_player(vec![TestPokemonBuilder::new("Pikachu", 1).build()]);
        let wild = TestPokemonBuilder::new("Chenipan", 1).capturable().with_hp(2).build();
        let mut battle = create_wild_battle(&mut player, wild);
        let mut rng = GameRng::new_for_test(vec![1]);

        let bus = assert_ok(resolve_turn(&mut battle, PlayerAction::Attack, &mut rng));

        assert_eq!(battle.game_state, GameState::PlayerWon);
        assert!(bus.events().contains(&BattleEvent::ExperienceGained {
            pokemon: "Pikachu".to_string(),
            amount: 5,
        }));
        assert_eq!(battle.player.active_pokemon().unwrap().curr_exp, 5);
    }

    #[test]
    fn test_large_reward_gains_several_levels() {
        let mut player = create_test_player(vec![TestPokemonBuilder::new("Pikachu", 1).build()]);
        let wild = TestPokemonBuilder::new("Chenipan", 6)
            .with_stats(40, 1, 1)
            .capturable()
            .with_hp(1)
            .build();
        let mut battle = create_wild_battle(&mut player, wild);
        let mut rng = GameRng::new_for_test(vec![1]);

        let bus = assert_ok(resolve_turn(&mut battle, PlayerAction::Attack, &mut rng));

        let level_ups: Vec<u8> = bus
            .events()
            .iter()
            .filter_map(|event| match event {
                BattleEvent::LevelUp { new_level, .. } => Some(*new_level),
                _ => None,
            })
            .collect();
        assert_eq!(level_ups, vec![2, 3]);

        let pikachu = battle.player.active_pokemon().unwrap();
        assert_eq!(pikachu.level, 3);
        assert_eq!(pikachu.curr_exp, 0);
        assert_eq!(pikachu.exp_to_next_level(), 30);
    }

    #[test]
    fn test_reaching_level_five_in_battle_evolves() {
        let mut pikachu = TestPokemonBuilder::new("Pikachu", 4).build();
        pikachu.curr_exp = 30;
        let mut player = create_test_player(vec![pikachu]);
        // Chenipan lv2: 14 HP, 5 ATK, 3 DEF
        let wild = TestPokemonBuilder::new("Chenipan", 2).capturable().with_hp(1).build();
        let mut battle = create_wild_battle(&mut player, wild);
        // Damage roll, then the three evolution rolls
        let mut rng = GameRng::new_for_test(vec![1, 1, 1, 1]);

        let bus = assert_ok(resolve_turn(&mut battle, PlayerAction::Attack, &mut rng));

        assert!(bus.events().contains(&BattleEvent::Evolved {
            from: "Pikachu".to_string(),
            into: "Raichu".to_string(),
        }));
        drop(battle);

        let raichu = &player.team[0];
        assert_eq!(raichu.name, "Raichu");
        assert_eq!(raichu.level, 5);
        assert_eq!(raichu.curr_exp, 0);
        assert_eq!(raichu.max_hp(), 20 + 5 + 5);
        assert_eq!(raichu.attack_stat(), 6 + 2 + 3);
        assert_eq!(raichu.defense_stat(), 2 + 1 + 2);
        assert!(!raichu.can_evolve);
    }
}
