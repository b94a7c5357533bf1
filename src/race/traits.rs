//! RaceTraits - scalar temperament of a race and the preferences it implies

use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::Process;

/// Default trait roll range
pub const TRAIT_RANGE: RangeInclusive<u32> = 1..=9;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceTraits {
    /// Drives BuildFabric
    pub work_ethic: u32,
    /// Drives ResearchCell
    pub research: u32,
    /// Drives ConnectCell
    pub diplomacy: u32,
    /// Drives AttackEnemy
    pub aggression: u32,
}

impl RaceTraits {
    pub fn new(work_ethic: u32, research: u32, diplomacy: u32, aggression: u32) -> Self {
        Self { work_ethic, research, diplomacy, aggression }
    }

    /// Roll every trait in [`TRAIT_RANGE`]
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::random_in(rng, TRAIT_RANGE)
    }

    pub fn random_in<R: Rng + ?Sized>(rng: &mut R, range: RangeInclusive<u32>) -> Self {
        Self {
            work_ethic: rng.gen_range(range.clone()),
            research: rng.gen_range(range.clone()),
            diplomacy: rng.gen_range(range.clone()),
            aggression: rng.gen_range(range),
        }
    }

    /// Trait/process pairs in fixed pairing order
    fn pairs(&self) -> [(u32, Process); 4] {
        [
            (self.work_ethic, Process::BuildFabric),
            (self.research, Process::ResearchCell),
            (self.diplomacy, Process::ConnectCell),
            (self.aggression, Process::AttackEnemy),
        ]
    }

    /// Processes ordered by ascending trait value.
    ///
    /// The process backed by the lowest trait comes first. The sort is stable,
    /// so equal traits keep pairing order.
    pub fn preference_order(&self) -> [Process; 4] {
        let mut pairs = self.pairs();
        pairs.sort_by_key(|(value, _)| *value);
        pairs.map(|(_, process)| process)
    }

    /// Per-tick progress this race contributes to `process`
    pub fn increment_for(&self, process: Process) -> u32 {
        match process {
            Process::BuildFabric => self.work_ethic,
            Process::ResearchCell => self.research,
            Process::ConnectCell => self.diplomacy,
            Process::AttackEnemy => self.aggression,
        }
    }
}

/// Cost weight of `process` under `preferences`: rank + 1, so the first
/// preference weighs 1 and an unlisted process weighs more than any listed one
pub fn preference_multiplier(process: Process, preferences: &[Process]) -> u32 {
    preferences
        .iter()
        .position(|p| *p == process)
        .unwrap_or(preferences.len()) as u32
        + 1
}
