//! Simulation output and serialization

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::bus::{HistoryLog, Topic};
use crate::core::error::Result;
use crate::core::types::{CellKind, Color, Coords, Process, RaceId, RaceType, Tick};
use crate::grid::map::Grid;
use crate::grid::resource::Stockpile;
use crate::race::agent::{Intent, Race};
use crate::race::traits::RaceTraits;
use crate::simulation::world::Simulation;

/// Complete simulation output
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub final_state: WorldSnapshot,
    pub history: HistoryLog,
    pub statistics: SimulationStats,
}

/// Serializable snapshot of world state
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: Tick,
    pub grid: Grid,
    pub races: Vec<RaceSnapshot>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RaceSnapshot {
    pub id: RaceId,
    pub race_type: RaceType,
    pub color: Color,
    pub home: Coords,
    pub traits: RaceTraits,
    pub preferences: [Process; 4],
    pub intent: Intent,
    pub cells_owned: usize,
    pub resources: Stockpile,
}

impl RaceSnapshot {
    fn capture(race: &Race, grid: &Grid) -> Self {
        Self {
            id: race.id,
            race_type: race.race_type,
            color: race.color,
            home: race.home,
            traits: race.traits,
            preferences: race.traits.preference_order(),
            intent: race.current_intent(),
            cells_owned: grid.owned_by(race.id).count(),
            resources: race.resources().clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationStats {
    pub ticks_simulated: Tick,
    pub simulation_time_ms: u64,
    pub events_delivered: u64,
    pub processes_completed: u32,
    pub processes_declined: u32,
    pub shadow_cells: u32,
    pub resource_cells: u32,
    pub owned_resource_cells: u32,
}

impl SimulationOutput {
    pub fn new(sim: Simulation, elapsed: Duration) -> Self {
        let races = sim
            .races
            .iter()
            .map(|race| RaceSnapshot::capture(race, &sim.grid))
            .collect();

        let owned_resource_cells = sim
            .grid
            .cells()
            .iter()
            .filter(|c| c.kind() == CellKind::Resource && c.owner().is_some())
            .count() as u32;

        let statistics = SimulationStats {
            ticks_simulated: sim.tick,
            simulation_time_ms: elapsed.as_millis() as u64,
            events_delivered: sim.history.delivered,
            processes_completed: sim.history.count(Topic::ProcessCompleted) as u32,
            processes_declined: sim.history.count(Topic::ProcessDeclined) as u32,
            shadow_cells: sim.grid.count_kind(CellKind::Shadow) as u32,
            resource_cells: sim.grid.count_kind(CellKind::Resource) as u32,
            owned_resource_cells,
        };

        Self {
            final_state: WorldSnapshot {
                tick: sim.tick,
                grid: sim.grid,
                races,
            },
            history: sim.history,
            statistics,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn summary(&self) -> String {
        let s = &self.statistics;
        let mut out = format!(
            "Simulated {} ticks in {}ms\n{} events, {} processes completed, {} declined\n{} shadow cells left, {} of {} resource cells claimed",
            s.ticks_simulated,
            s.simulation_time_ms,
            s.events_delivered,
            s.processes_completed,
            s.processes_declined,
            s.shadow_cells,
            s.owned_resource_cells,
            s.resource_cells,
        );

        for race in &self.final_state.races {
            out.push_str(&format!(
                "\n  {} {} ({}): {} cells, {} resources gathered",
                race.id,
                race.race_type.as_str(),
                race.color,
                race.cells_owned,
                race.resources.total(),
            ));
        }
        out
    }
}
