#[cfg(test)]
mod tests {
    use crate::battle::engine::resolve_turn;
    use crate::battle::state::{BattleEvent, GameState, Opponent};
    use crate::battle::tests::common::{
        assert_ok, create_test_player, create_test_rival, create_trainer_battle, TestPokemonBuilder,
    };
    use crate::errors::{ActionError, BattleEngineError};
    use crate::items::Item;
    use crate::player::PlayerAction;
    use crate::rng::GameRng;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defeating_last_enemy_pokemon_wins_without_enemy_turn() {
        let mut player = create_test_player(vec![TestPokemonBuilder::new("Pikachu", 1).build()]);
        let rival = create_test_rival(
            "Youngster Joey",
            vec![TestPokemonBuilder::new("Rattata", 1).with_hp(3).build()],
        );
        let mut battle = create_trainer_battle(&mut player, rival);
        // Only the player's damage roll: an enemy turn would exhaust the script
        let mut rng = GameRng::new_for_test(vec![1]);

        let bus = assert_ok(resolve_turn(&mut battle, PlayerAction::Attack, &mut rng));

        assert_eq!(battle.game_state, GameState::PlayerWon);
        assert!(battle.opponent.active_pokemon().is_none());
        assert_eq!(
            bus.events(),
            &[
                BattleEvent::TurnStarted { turn_number: 1 },
                BattleEvent::AttackUsed {
                    attacker: "Pikachu".to_string(),
                    target: "Rattata".to_string(),
                    damage: 5,
                },
                BattleEvent::DamageDealt {
                    target: "Rattata".to_string(),
                    damage: 5,
                    remaining_hp: 0,
                    max_hp: 14,
                },
                BattleEvent::PokemonFainted {
                    pokemon: "Rattata".to_string()
                },
                BattleEvent::TrainerDefeated {
                    trainer: "Youngster Joey".to_string()
                },
                BattleEvent::BattleEnded {
                    outcome: GameState::PlayerWon
                },
            ]
        );
    }

    #[test]
    fn test_knockout_sends_out_next_pokemon_and_skips_enemy_turn() {
        let mut player = create_test_player(vec![TestPokemonBuilder::new("Pikachu", 1).build()]);
        let rival = create_test_rival(
            "Hiker Marcel",
            vec![
                TestPokemonBuilder::new("Rattata", 1).with_hp(1).build(),
                TestPokemonBuilder::new("Racaillou", 1).build(),
            ],
        );
        let mut battle = create_trainer_battle(&mut player, rival);
        let mut rng = GameRng::new_for_test(vec![2]);

        let bus = assert_ok(resolve_turn(&mut battle, PlayerAction::Attack, &mut rng));

        assert_eq!(battle.game_state, GameState::InProgress);
        assert!(bus.events().contains(&BattleEvent::PokemonSentOut {
            trainer: "Hiker Marcel".to_string(),
            pokemon: "Racaillou".to_string(),
        }));
        let Opponent::Trainer(rival) = &battle.opponent else {
            panic!("expected a trainer opponent");
        };
        assert_eq!(rival.team.len(), 1);
        assert_eq!(battle.turn_number, 2);
        assert_eq!(battle.player.active_pokemon().unwrap().current_hp(), 20);
    }

    #[test]
    fn test_trainer_battle_awards_no_experience() {
        let mut player = create_test_player(vec![TestPokemonBuilder::new("Pikachu", 1).build()]);
        let rival = create_test_rival(
            "Camper Liam",
            vec![TestPokemonBuilder::new("Abo", 3).with_hp(1).build()],
        );
        let mut battle = create_trainer_battle(&mut player, rival);
        let mut rng = GameRng::new_for_test(vec![4]);

        let bus = assert_ok(resolve_turn(&mut battle, PlayerAction::Attack, &mut rng));

        assert_eq!(battle.game_state, GameState::PlayerWon);
        assert!(!bus
            .events()
            .iter()
            .any(|event| matches!(event, BattleEvent::ExperienceGained { .. })));
        assert_eq!(battle.player.active_pokemon().unwrap().curr_exp, 0);
    }

    #[test]
    fn test_capture_rejected_in_trainer_battle() {
        let mut player = create_test_player(vec![TestPokemonBuilder::new("Pikachu", 1).build()]);
        player.add_item(Item::CaptureDevice);
        let rival = create_test_rival(
            "Lass Iris",
            vec![TestPokemonBuilder::new("Roucool", 1).with_hp(1).build()],
        );
        let mut battle = create_trainer_battle(&mut player, rival);
        let mut rng = GameRng::new_for_test(vec![]);

        let result = resolve_turn(&mut battle, PlayerAction::ThrowCaptureDevice, &mut rng);

        assert!(matches!(
            result,
            Err(BattleEngineError::Action(ActionError::NotAllowed(_)))
        ));
        assert_eq!(battle.player.inventory, vec![Item::CaptureDevice]);
        assert_eq!(battle.game_state, GameState::InProgress);
    }

    #[test]
    fn test_enemy_trainer_pokemon_attacks_back() {
        let mut player = create_test_player(vec![TestPokemonBuilder::new("Pikachu", 1).build()]);
        let rival = create_test_rival(
            "Bug Catcher Rick",
            vec![TestPokemonBuilder::new("Racaillou", 2).build()],
        );
        let mut battle = create_trainer_battle(&mut player, rival);
        // Racaillou lv2: 16 HP, 5 ATK, 6 DEF.
        // Player roll 1 deals 1; enemy attacks with roll 3 for 6.
        let mut rng = GameRng::new_for_test(vec![1, 1, 3]);

        assert_ok(resolve_turn(&mut battle, PlayerAction::Attack, &mut rng));

        assert_eq!(battle.opponent.active_pokemon().unwrap().current_hp(), 15);
        assert_eq!(battle.player.active_pokemon().unwrap().current_hp(), 14);
    }
}
