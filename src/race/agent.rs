//! Race - an agent competing for cells
//!
//! Each tick a race collects candidate cells from eligibility broadcasts,
//! picks the cheapest one (distance from home weighted by how much it likes
//! the process), commits to it and asks the cell for progress until the
//! cell answers with a completion or a decline.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bus::{CellInfo, EventBus, GameEvent, Recipient, Subscriber, SubscriberId, Topic};
use crate::core::random::{random_color, random_race_type, GameRng};
use crate::core::types::{CellKind, Color, Coords, Process, RaceId, RaceType};
use crate::grid::resource::Stockpile;
use crate::race::traits::{preference_multiplier, RaceTraits};

/// A cell the race could act on this tick
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub coords: Coords,
    pub process: Process,
    pub kind: CellKind,
}

/// What a race is doing, or would like to do next
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Idle { preferences: [Process; 4] },
    Active { process: Process, target: Coords, increment: u32 },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Race {
    pub id: RaceId,
    pub home: Coords,
    pub race_type: RaceType,
    pub color: Color,
    pub traits: RaceTraits,
    resources: Stockpile,
    /// Active process and its target; both or neither
    current: Option<(Process, Coords)>,
    candidates: Vec<Candidate>,
}

impl Race {
    pub fn new(id: RaceId, home: Coords, race_type: RaceType, color: Color, traits: RaceTraits) -> Self {
        Self {
            id,
            home,
            race_type,
            color,
            traits,
            resources: Stockpile::new(),
            current: None,
            candidates: Vec::new(),
        }
    }

    /// A race with rolled type, color and traits
    pub fn random<R: Rng + ?Sized>(id: RaceId, home: Coords, traits: RaceTraits, rng: &mut R) -> Self {
        Self::new(id, home, random_race_type(rng), random_color(rng), traits)
    }

    pub fn process(&self) -> Option<Process> {
        self.current.map(|(process, _)| process)
    }

    pub fn target(&self) -> Option<Coords> {
        self.current.map(|(_, target)| target)
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn resources(&self) -> &Stockpile {
        &self.resources
    }

    pub fn clear_candidates(&mut self) {
        self.candidates.clear();
    }

    /// Start `process` against `target`; the candidate queue starts over
    pub fn commit_to(&mut self, process: Process, target: Coords) {
        debug!(race = %self.id, %process, %target, "committed");
        self.current = Some((process, target));
        self.clear_candidates();
    }

    /// Drop the active process and every queued candidate
    fn reset(&mut self) {
        self.current = None;
        self.clear_candidates();
    }

    pub fn current_intent(&self) -> Intent {
        match self.current {
            Some((process, target)) => Intent::Active {
                process,
                target,
                increment: self.traits.increment_for(process),
            },
            None => Intent::Idle {
                preferences: self.traits.preference_order(),
            },
        }
    }

    /// Process this race would run against a cell of `kind` owned by `owner`
    pub fn classify_process_for_cell(&self, kind: CellKind, owner: Option<RaceId>) -> Option<Process> {
        match (kind, owner) {
            (CellKind::Shadow, _) => Some(Process::ResearchCell),
            (CellKind::Resource, Some(other)) if other != self.id => self
                .traits
                .preference_order()
                .into_iter()
                .find(|p| matches!(p, Process::AttackEnemy | Process::ConnectCell)),
            (CellKind::Resource, None) => Some(Process::BuildFabric),
            _ => None,
        }
    }

    /// Queue a cell that announced itself, if it is meant for us and not ours.
    ///
    /// Nothing is queued while a process is running; the queue is only read
    /// when the race is idle. Returns whether the cell was queued.
    pub fn respond_to_availability(&mut self, from: &CellInfo, to: Recipient) -> bool {
        if self.current.is_some() || !to.includes(self.id) || from.owner == Some(self.id) {
            return false;
        }

        match self.classify_process_for_cell(from.kind, from.owner) {
            Some(process) => {
                self.candidates.push(Candidate { coords: from.coords, process, kind: from.kind });
                true
            }
            None => false,
        }
    }

    /// Cost of acting on `candidate`; lower is better
    pub fn cost_of(&self, candidate: &Candidate, preferences: &[Process]) -> u32 {
        candidate.coords.distance(&self.home) * preference_multiplier(candidate.process, preferences)
    }

    /// Pick the cheapest candidate; exact ties are broken uniformly at random
    pub fn select_target<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Candidate> {
        if self.candidates.is_empty() {
            debug!(race = %self.id, "no candidates");
            return None;
        }

        let preferences = self.traits.preference_order();
        let mut scored: Vec<(u32, &Candidate)> = self
            .candidates
            .iter()
            .map(|c| (self.cost_of(c, &preferences), c))
            .collect();
        scored.sort_by_key(|(cost, _)| *cost);

        let best = scored.first()?.0;
        let tied: Vec<&Candidate> = scored
            .iter()
            .take_while(|(cost, _)| *cost == best)
            .map(|(_, c)| *c)
            .collect();

        let pick = if tied.len() > 1 {
            tied[rng.gen_range(0..tied.len())]
        } else {
            tied[0]
        };
        Some(*pick)
    }

    /// Phase 2 of a tick: choose a target if idle, then request progress on it
    pub fn plan_tick<R: Rng + ?Sized>(&mut self, bus: &mut EventBus, rng: &mut R) {
        if self.current.is_none() {
            if let Some(candidate) = self.select_target(rng) {
                self.commit_to(candidate.process, candidate.coords);
            }
        }

        if let Some((process, target)) = self.current {
            bus.publish(GameEvent::ProgressRequested {
                race: self.id,
                target,
                process,
                increment: self.traits.increment_for(process),
            });
        }
    }
}

impl Subscriber for Race {
    fn subscriber_id(&self) -> SubscriberId {
        SubscriberId::Race(self.id)
    }

    fn topics(&self) -> &'static [Topic] {
        &[
            Topic::CellEligible,
            Topic::ProcessDeclined,
            Topic::ProcessCompleted,
            Topic::ResourcesDelivered,
        ]
    }

    fn on_event(&mut self, event: &GameEvent, _bus: &mut EventBus, _rng: &mut GameRng) {
        match *event {
            GameEvent::CellEligible { from, to } => {
                self.respond_to_availability(&from, to);
            }
            GameEvent::ProcessDeclined { to, target, process } if to == self.id => {
                debug!(race = %self.id, %process, %target, "declined");
                self.reset();
            }
            GameEvent::ProcessCompleted { to, target, process } if to == self.id => {
                debug!(race = %self.id, %process, %target, "completed");
                self.reset();
            }
            GameEvent::ResourcesDelivered { to, pack, .. } if to == self.id => {
                self.resources.add(pack);
            }
            _ => {}
        }
    }
}
