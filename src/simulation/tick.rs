//! Tick phases
//!
//! One tick runs three publish/deliver rounds:
//! 1. every cell announces itself to every idle race it is eligible for
//! 2. every race picks a target if idle and requests progress; cells answer
//!    and races react to the answers in the same delivery round
//! 3. owned resource cells pay out to their owners

use tracing::{debug, info};

use crate::bus::{GameEvent, Recipient, Topic};
use crate::core::error::Result;
use crate::core::types::Tick;
use crate::simulation::world::Simulation;

/// What happened during one tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub tick: Tick,
    pub events_delivered: usize,
    pub completed: usize,
    pub declined: usize,
}

impl Simulation {
    /// Queue an event from outside the protocol and deliver it
    pub fn publish(&mut self, event: GameEvent) -> Result<usize> {
        self.bus.publish(event);
        self.deliver()
    }

    pub fn run_tick(&mut self) -> Result<TickReport> {
        self.tick += 1;
        let chronicled_before = self.history.entries.len();

        let mut events_delivered = 0;
        self.broadcast_eligibility();
        events_delivered += self.deliver()?;

        self.plan_races();
        events_delivered += self.deliver()?;

        self.yield_resources();
        events_delivered += self.deliver()?;

        let new_entries = &self.history.entries[chronicled_before..];
        let report = TickReport {
            tick: self.tick,
            events_delivered,
            completed: new_entries
                .iter()
                .filter(|e| e.event.topic() == Topic::ProcessCompleted)
                .count(),
            declined: new_entries
                .iter()
                .filter(|e| e.event.topic() == Topic::ProcessDeclined)
                .count(),
        };
        debug!(?report, "tick done");
        Ok(report)
    }

    /// Run `ticks` ticks
    pub fn run(&mut self, ticks: u32) -> Result<()> {
        for _ in 0..ticks {
            self.run_tick()?;
        }
        info!(
            tick = self.tick,
            completed = self.history.count(Topic::ProcessCompleted),
            declined = self.history.count(Topic::ProcessDeclined),
            "run finished"
        );
        Ok(())
    }

    /// Announce cells to idle races only; committed races would drop them
    fn broadcast_eligibility(&mut self) {
        for cell in self.grid.cells() {
            for race in self.races.iter().filter(|r| r.process().is_none()) {
                if cell.is_eligible_for(race.id) {
                    self.bus.publish(GameEvent::CellEligible {
                        from: cell.self_info(),
                        to: Recipient::Race(race.id),
                    });
                }
            }
        }
    }

    fn plan_races(&mut self) {
        for race in self.races.iter_mut() {
            race.plan_tick(&mut self.bus, &mut self.rng);
        }
    }

    fn yield_resources(&mut self) {
        for cell in self.grid.cells() {
            if let Some((owner, pack)) = cell.resource_for_tick(self.resource_yield) {
                self.bus.publish(GameEvent::ResourcesDelivered {
                    to: owner,
                    from: cell.coords(),
                    pack,
                });
            }
        }
    }
}
