//! First game
//!
//! Runs the demo headlessly. Pass a `.toml` or `.ron` settings file as the
//! first argument to override the defaults (see `first_game.toml`).

mod components;
mod game;

use game_core::config::Config;
use game_core::events::NoEvents;
use game_core::foundation::logging;
use game_core::Engine;

use game::{FirstGame, GameConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load_from_file(&path)?,
        None => GameConfig::default(),
    };

    logging::init_with_level(&config.engine.log_level);
    log::info!("Starting {}", config.engine.title);

    let mut game = FirstGame::new(config.clone());
    let frames = Engine::run(config.engine, &mut game, &mut NoEvents)?;

    log::info!(
        "{} frames played: player ended at x = {:.1}, {}/{} sparks reclaimed, {} entities left",
        frames,
        game.final_player_x().unwrap_or_default(),
        game.sparks_destroyed(),
        game.sparks_spawned(),
        game.final_population()
    );
    Ok(())
}
