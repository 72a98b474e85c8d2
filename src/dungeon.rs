use crate::battle::ai::Behavior;
use crate::battle::runner::run_battle;
use crate::battle::state::{BattleEvent, BattleRules, BattleState, EventBus, GameState, Opponent};
use crate::errors::GameResult;
use crate::factory::PokemonFactory;
use crate::player::Trainer;
use crate::rng::GameRng;
use log::info;

/// A run of trainer battles of rising level ending with a boss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dungeon {
    pub stages: usize,
    pub boss_level_offset: u8,
    pub enemy_team_size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DungeonOutcome {
    Cleared,
    /// Lost, or had nothing able to battle, at `stage` (the boss is stage `stages`).
    Defeated { stage: usize },
}

impl Default for Dungeon {
    fn default() -> Self {
        Self {
            stages: 3,
            boss_level_offset: 3,
            enemy_team_size: 2,
        }
    }
}

impl Dungeon {
    pub fn run(
        &self,
        player: &mut Trainer,
        factory: &PokemonFactory,
        rules: BattleRules,
        controller: &mut dyn Behavior,
        rng: &mut GameRng,
    ) -> GameResult<DungeonOutcome> {
        // Stage levels are measured against the level the player entered with
        let base_level = player.battle_level();
        info!("{} enters a dungeon of {} floors", player.name, self.stages);

        for stage in 0..self.stages {
            let level = base_level.saturating_add(stage.min(u8::MAX as usize) as u8);
            let rival = factory.create_enemy_trainer(level, self.enemy_team_size, rng)?;

            let mut intro = EventBus::new();
            intro.push(BattleEvent::DungeonStageStarted {
                stage,
                total: self.stages,
                trainer: rival.name.clone(),
            });
            controller.observe(&intro)?;

            if !self.fight(player, rival, rules, controller, rng)? {
                return self.fail(stage, controller);
            }
        }

        let boss = factory.create_boss(base_level.saturating_add(self.boss_level_offset), rng)?;
        let mut intro = EventBus::new();
        intro.push(BattleEvent::BossChallenge {
            trainer: boss.name.clone(),
        });
        controller.observe(&intro)?;

        if !self.fight(player, boss, rules, controller, rng)? {
            return self.fail(self.stages, controller);
        }

        let mut bus = EventBus::new();
        bus.push(BattleEvent::DungeonCleared);
        controller.observe(&bus)?;
        info!("{} cleared the dungeon", player.name);
        Ok(DungeonOutcome::Cleared)
    }

    /// Returns whether the player won. A player with nothing able to battle loses.
    fn fight(
        &self,
        player: &mut Trainer,
        rival: Trainer,
        rules: BattleRules,
        controller: &mut dyn Behavior,
        rng: &mut GameRng,
    ) -> GameResult<bool> {
        if !player.ready_for_battle() {
            return Ok(false);
        }
        let mut state = BattleState::new(player, Opponent::Trainer(rival), rules)?;
        Ok(run_battle(&mut state, controller, rng)? == GameState::PlayerWon)
    }

    fn fail(&self, stage: usize, controller: &mut dyn Behavior) -> GameResult<DungeonOutcome> {
        let mut bus = EventBus::new();
        bus.push(BattleEvent::DungeonFailed { stage });
        controller.observe(&bus)?;
        info!("Dungeon failed on stage {}", stage);
        Ok(DungeonOutcome::Defeated { stage })
    }
}
