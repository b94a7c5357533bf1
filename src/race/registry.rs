//! RaceRegistry - every race in the session, addressed by id

use serde::{Deserialize, Serialize};

use crate::core::error::{GameError, Result};
use crate::core::types::RaceId;
use crate::race::agent::Race;

/// Append-only; a race's id is its index, so ids stay valid all session
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RaceRegistry {
    list: Vec<Race>,
}

impl RaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next added race must carry
    pub fn next_id(&self) -> RaceId {
        RaceId(self.list.len() as u32)
    }

    pub fn add(&mut self, race: Race) -> Result<RaceId> {
        let expected = self.next_id();
        if race.id != expected {
            return Err(GameError::RaceIdMismatch { expected, got: race.id });
        }
        self.list.push(race);
        Ok(expected)
    }

    pub fn get(&self, id: RaceId) -> Option<&Race> {
        self.list.get(id.index())
    }

    pub fn get_mut(&mut self, id: RaceId) -> Option<&mut Race> {
        self.list.get_mut(id.index())
    }

    /// Like [`RaceRegistry::get_mut`], but a miss is an error
    pub fn race_mut(&mut self, id: RaceId) -> Result<&mut Race> {
        self.get_mut(id).ok_or(GameError::RaceNotFound(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Race> {
        self.list.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Race> {
        self.list.iter_mut()
    }

    pub fn ids(&self) -> impl Iterator<Item = RaceId> + '_ {
        self.list.iter().map(|r| r.id)
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}
