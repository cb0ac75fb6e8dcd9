//! Collector Bot - Entry Point
//!
//! Reads configuration from the environment, connects to the game server
//! and runs the tick loop until the game ends or an error is fatal.

use std::process::ExitCode;

use collector_bot::api::HttpTransport;
use collector_bot::bot::{seeded_rng, Bot};
use collector_bot::core::config::BotConfig;
use collector_bot::core::error::Result;
use collector_bot::game::RandomSample;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing for logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("collector_bot=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("Stopping: {}", err);
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let config = BotConfig::from_env()?;
    tracing::info!(
        "Collector bot starting against {} ({} units, {:?} interval)",
        config.game_server,
        config.unit_count,
        config.tick_interval
    );

    let transport = HttpTransport::new(&config)?;
    let rng = seeded_rng(&config);
    let mut bot = Bot::new(&config, transport, RandomSample, rng);

    bot.run().await
}
