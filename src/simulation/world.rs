//! Simulation - owns the map, the races and the bus between them

use rand::SeedableRng;
use tracing::info;

use crate::bus::{EventBus, HistoryLog, Subscriber, SubscriberId};
use crate::core::config::GameConfig;
use crate::core::error::Result;
use crate::core::random::{random_cell_in_part, GameRng};
use crate::core::types::Tick;
use crate::grid::map::Grid;
use crate::race::agent::Race;
use crate::race::registry::RaceRegistry;
use crate::race::traits::RaceTraits;

pub struct Simulation {
    pub grid: Grid,
    pub races: RaceRegistry,
    pub history: HistoryLog,
    /// Ticks completed so far
    pub tick: Tick,
    pub(crate) bus: EventBus,
    pub(crate) rng: GameRng,
    pub(crate) resource_yield: u32,
}

impl Simulation {
    /// Build a fresh game: one race per map strip, then resource seeding
    pub fn new(config: &GameConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = GameRng::seed_from_u64(config.seed);
        let mut grid = Grid::new(config.map.width, config.map.height);
        let mut races = RaceRegistry::new();

        for part in 0..config.races.count {
            let id = races.next_id();
            let home = random_cell_in_part(&mut rng, part, config.races.count, grid.width(), grid.height());
            let traits = RaceTraits::random_in(&mut rng, config.races.trait_min..=config.races.trait_max);
            let race = Race::random(id, home, traits, &mut rng);

            grid.cell_mut(home)?
                .convert_to_race_home(id, race.race_type, race.color);
            info!(
                race = %id,
                race_type = race.race_type.as_str(),
                %home,
                preferences = ?race.traits.preference_order(),
                "race placed"
            );
            races.add(race)?;
        }

        let seeded = grid.seed_resources(config.map.resource_fraction, &mut rng);
        info!(seeded, cells = grid.len(), "map seeded");

        Ok(Self::from_parts(grid, races, rng, config.resource_yield_per_tick))
    }

    /// Wire an already built map and registry to a new bus.
    ///
    /// Races subscribe first, in registry order, then cells in row order.
    pub fn from_parts(grid: Grid, races: RaceRegistry, rng: GameRng, resource_yield: u32) -> Self {
        let mut bus = EventBus::new();
        for race in races.iter() {
            bus.register(race);
        }
        for cell in grid.cells() {
            bus.register(cell);
        }

        Self {
            grid,
            races,
            history: HistoryLog::new(),
            tick: 0,
            bus,
            rng,
            resource_yield,
        }
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Deliver queued events until the bus is idle.
    ///
    /// Replies published while handling an event are delivered in the same
    /// call, so every reaction settles before the caller moves on.
    pub fn deliver(&mut self) -> Result<usize> {
        let mut delivered = 0;

        while let Some(event) = self.bus.next_pending() {
            self.history.record(self.tick, &event);
            let targets = self.bus.subscribers(event.topic()).to_vec();

            for target in targets {
                match target {
                    SubscriberId::Race(id) => {
                        let race = self.races.race_mut(id)?;
                        race.on_event(&event, &mut self.bus, &mut self.rng);
                    }
                    SubscriberId::Cell(coords) => {
                        let cell = self.grid.cell_mut(coords)?;
                        cell.on_event(&event, &mut self.bus, &mut self.rng);
                    }
                }
            }
            delivered += 1;
        }

        Ok(delivered)
    }
}
