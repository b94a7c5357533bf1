//! Messages exchanged between cells and races

use serde::{Deserialize, Serialize};

use crate::core::types::{CellKind, Coords, Process, RaceId};
use crate::grid::resource::ResourcePack;

/// Who an eligibility broadcast is meant for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recipient {
    Race(RaceId),
    Broadcast,
}

impl Recipient {
    pub fn includes(&self, race: RaceId) -> bool {
        match self {
            Recipient::Race(id) => *id == race,
            Recipient::Broadcast => true,
        }
    }
}

/// Snapshot a cell sends about itself
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellInfo {
    pub coords: Coords,
    pub kind: CellKind,
    pub owner: Option<RaceId>,
}

/// Subscription key, one per event variant
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    CellEligible,
    ProgressRequested,
    ProcessDeclined,
    ProcessCompleted,
    ResourcesDelivered,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A cell announces it can be acted on
    CellEligible { from: CellInfo, to: Recipient },
    /// A race asks its target cell to advance a process
    ProgressRequested { race: RaceId, target: Coords, process: Process, increment: u32 },
    /// The target refused the process
    ProcessDeclined { to: RaceId, target: Coords, process: Process },
    /// The process reached full progress
    ProcessCompleted { to: RaceId, target: Coords, process: Process },
    /// An owned resource cell paid out to its owner
    ResourcesDelivered { to: RaceId, from: Coords, pack: ResourcePack },
}

impl GameEvent {
    pub fn topic(&self) -> Topic {
        match self {
            GameEvent::CellEligible { .. } => Topic::CellEligible,
            GameEvent::ProgressRequested { .. } => Topic::ProgressRequested,
            GameEvent::ProcessDeclined { .. } => Topic::ProcessDeclined,
            GameEvent::ProcessCompleted { .. } => Topic::ProcessCompleted,
            GameEvent::ResourcesDelivered { .. } => Topic::ResourcesDelivered,
        }
    }

    /// Races this event concerns, for history queries
    pub fn involves(&self, race: RaceId) -> bool {
        match self {
            GameEvent::CellEligible { from, to } => to.includes(race) || from.owner == Some(race),
            GameEvent::ProgressRequested { race: id, .. } => *id == race,
            GameEvent::ProcessDeclined { to, .. }
            | GameEvent::ProcessCompleted { to, .. }
            | GameEvent::ResourcesDelivered { to, .. } => *to == race,
        }
    }
}
