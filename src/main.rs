use env_logger::Env;
use log::info;
use pokemon_quest::{
    BattleEngineError, Console, Game, GameConfig, GameError, GameResult, GameRng, PokemonFactory,
};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Game text goes to stdout; logs go to stderr.
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    match play() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn play() -> GameResult<()> {
    let config = GameConfig::from_env()?;
    let factory = PokemonFactory::builtin()?;
    let rng = match config.seed {
        Some(seed) => {
            info!("Using RNG seed {}", seed);
            GameRng::from_seed(seed)
        }
        None => GameRng::new_random(),
    };

    let console = Console::new(io::stdin().lock(), io::stdout().lock());
    let mut game = match Game::setup(console, factory, config, rng) {
        Ok(game) => game,
        // Input closed before the adventure began
        Err(GameError::Battle(BattleEngineError::InputClosed)) => return Ok(()),
        Err(e) => return Err(e),
    };
    game.run()
}
