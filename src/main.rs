//! Cell Conquest - Entry Point
//!
//! Loads a game config, runs the simulation headless and writes the
//! final state and chronicle as JSON.

use std::path::PathBuf;

use cell_conquest::core::config::GameConfig;
use cell_conquest::core::error::Result;
use cell_conquest::simulation::simulate;
use clap::Parser;

/// Headless Cell Conquest runner
#[derive(Parser, Debug)]
#[command(name = "cell_conquest")]
#[command(about = "Run a grid conquest simulation and write the outcome as JSON")]
struct Args {
    /// Game config (TOML); built-in defaults when omitted
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Override the number of ticks to run
    #[arg(long)]
    ticks: Option<u32>,

    /// Override the random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the JSON output
    #[arg(long, short = 'o', default_value = "simulation_output.json")]
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("cell_conquest=info")
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(ticks) = args.ticks {
        config.ticks = ticks;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    println!("Starting Cell Conquest");
    println!("======================");
    println!("Map: {}x{} cells", config.map.width, config.map.height);
    println!("Races: {}", config.races.count);
    println!("Simulating {} ticks (seed {})...", config.ticks, config.seed);
    println!();

    let output = simulate(&config)?;
    println!("{}", output.summary());

    std::fs::write(&args.output, output.to_json()?)?;
    println!("\nFull output written to {}", args.output.display());

    Ok(())
}
