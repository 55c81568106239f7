//! Arcade demo runner.
//!
//! Loads the host configuration (default `arcade.toml`, or the path given
//! as the first argument) and runs the ship game on the configured
//! backend. Logs go to stderr; redirect it when using the terminal backend.

mod game;

use std::path::PathBuf;

use arcade_engine::config::Config;
use arcade_engine::foundation::logging;
use arcade_engine::{Host, HostConfig};

use game::ShipGame;

const DEFAULT_CONFIG: &str = "arcade.toml";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init(log::LevelFilter::Warn);

    let config_path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG), PathBuf::from);
    let config = HostConfig::load_or_default(&config_path)?;
    log::info!(
        "Starting arcade demo on {} backend ({})",
        config.backend.name(),
        config_path.display()
    );

    let assets = PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/assets"));
    let game = ShipGame::new(assets, config.render.size);

    let mut host = Host::new(&config, Box::new(game))?;
    host.run()?;
    Ok(())
}
