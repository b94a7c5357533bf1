//! Simulation driver: world setup, tick phases and output

pub mod output;
pub mod tick;
pub mod world;

use std::time::Instant;

use tracing::info;

use crate::core::config::GameConfig;
use crate::core::error::Result;

pub use output::{RaceSnapshot, SimulationOutput, SimulationStats, WorldSnapshot};
pub use tick::TickReport;
pub use world::Simulation;

/// Build a world from `config` and run it for `config.ticks` ticks
pub fn simulate(config: &GameConfig) -> Result<SimulationOutput> {
    let start = Instant::now();

    let mut sim = Simulation::new(config)?;
    info!(
        seed = config.seed,
        width = config.map.width,
        height = config.map.height,
        races = config.races.count,
        ticks = config.ticks,
        "starting simulation"
    );
    sim.run(config.ticks)?;

    Ok(SimulationOutput::new(sim, start.elapsed()))
}
