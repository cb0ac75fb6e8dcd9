//! Resource schedule generator binary
//!
//! resource_gen <seed-file> <config.json> <output.json>

use std::path::PathBuf;

use clap::Parser;
use collector_bot::core::error::Result;
use collector_bot::generator::{generate, Arcfour, GeneratorConfig};

/// Generate a seeded resource schedule for a game
#[derive(Parser, Debug)]
#[command(name = "resource_gen")]
#[command(about = "Generate the resource schedule served during a game")]
struct Args {
    /// 256-byte permutation used as the random state
    seed: PathBuf,

    /// Generator configuration (JSON)
    config: PathBuf,

    /// Where to write the generated schedule
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("collector_bot=info")
        .init();

    let args = Args::parse();

    let seed = std::fs::read(&args.seed)?;
    let mut rng = Arcfour::new(&seed)?;
    let config = GeneratorConfig::from_json(&std::fs::read_to_string(&args.config)?)?;

    let schedule = generate(&config, &mut rng)?;
    std::fs::write(&args.output, serde_json::to_vec(&schedule)?)?;

    println!(
        "Wrote {} resources to {}",
        schedule.resource.len(),
        args.output.display()
    );
    Ok(())
}
