//! Chronicle of protocol outcomes

use serde::{Deserialize, Serialize};

use crate::bus::events::{GameEvent, Topic};
use crate::core::types::{RaceId, Tick};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: u32,
    pub tick: Tick,
    pub event: GameEvent,
}

/// Outcome events in delivery order.
///
/// Eligibility broadcasts and progress requests are counted but not kept;
/// they repeat every tick and say nothing the outcomes don't.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HistoryLog {
    pub entries: Vec<HistoryEntry>,
    pub delivered: u64,
    next_entry_id: u32,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_chronicled(topic: Topic) -> bool {
        matches!(
            topic,
            Topic::ProcessCompleted | Topic::ProcessDeclined | Topic::ResourcesDelivered
        )
    }

    /// Count a delivered event, keeping it if it is an outcome
    pub fn record(&mut self, tick: Tick, event: &GameEvent) {
        self.delivered += 1;
        if !Self::is_chronicled(event.topic()) {
            return;
        }

        let id = self.next_entry_id;
        self.next_entry_id += 1;
        self.entries.push(HistoryEntry { id, tick, event: *event });
    }

    pub fn entries_for_tick(&self, tick: Tick) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().filter(move |e| e.tick == tick)
    }

    pub fn entries_for_race(&self, race: RaceId) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().filter(move |e| e.event.involves(race))
    }

    pub fn count(&self, topic: Topic) -> usize {
        self.entries.iter().filter(|e| e.event.topic() == topic).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::events::{CellInfo, Recipient};
    use crate::core::types::{CellKind, Coords, Process};

    #[test]
    fn test_only_outcomes_are_kept() {
        let mut log = HistoryLog::new();
        let eligible = GameEvent::CellEligible {
            from: CellInfo { coords: Coords::new(0, 0), kind: CellKind::Shadow, owner: None },
            to: Recipient::Race(RaceId(0)),
        };
        let completed = GameEvent::ProcessCompleted {
            to: RaceId(0),
            target: Coords::new(0, 0),
            process: Process::ResearchCell,
        };

        log.record(1, &eligible);
        log.record(1, &completed);
        log.record(2, &completed);

        assert_eq!(log.delivered, 3);
        assert_eq!(log.entries.len(), 2);
        assert_eq!(log.entries_for_tick(2).count(), 1);
        assert_eq!(log.entries_for_race(RaceId(0)).count(), 2);
        assert_eq!(log.entries_for_race(RaceId(1)).count(), 0);
        assert_eq!(log.count(Topic::ProcessCompleted), 2);
        assert_eq!(log.entries[1].id, 1);
    }
}
