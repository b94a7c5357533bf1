//! Resource catalog and delivered resource packs

use ahash::AHashMap;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::random::random_int;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Iron,
    Gold,
    Timber,
    Grain,
    Stone,
    Fish,
    Gems,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 7] = [
        ResourceKind::Iron,
        ResourceKind::Gold,
        ResourceKind::Timber,
        ResourceKind::Grain,
        ResourceKind::Stone,
        ResourceKind::Fish,
        ResourceKind::Gems,
    ];

    /// Draw a kind uniformly from the catalog
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[random_int(rng, Self::ALL.len())]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Iron => "iron",
            ResourceKind::Gold => "gold",
            ResourceKind::Timber => "timber",
            ResourceKind::Grain => "grain",
            ResourceKind::Stone => "stone",
            ResourceKind::Fish => "fish",
            ResourceKind::Gems => "gems",
        }
    }
}

/// A quantity of one resource handed from a cell to its owner
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePack {
    pub kind: ResourceKind,
    pub amount: u32,
}

impl ResourcePack {
    pub fn new(kind: ResourceKind, amount: u32) -> Self {
        Self { kind, amount }
    }
}

/// Running per-kind totals of everything a race has been paid
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stockpile {
    amounts: AHashMap<ResourceKind, u32>,
}

impl Stockpile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pack; totals saturate instead of wrapping
    pub fn add(&mut self, pack: ResourcePack) {
        let entry = self.amounts.entry(pack.kind).or_insert(0);
        *entry = entry.saturating_add(pack.amount);
    }

    /// Current amount of a resource
    pub fn get(&self, kind: ResourceKind) -> u32 {
        self.amounts.get(&kind).copied().unwrap_or(0)
    }

    /// Sum over every kind
    pub fn total(&self) -> u32 {
        self.amounts.values().fold(0u32, |sum, v| sum.saturating_add(*v))
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.values().all(|v| *v == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_stockpile_groups_by_kind() {
        let mut stockpile = Stockpile::new();
        assert!(stockpile.is_empty());

        stockpile.add(ResourcePack::new(ResourceKind::Iron, 2));
        stockpile.add(ResourcePack::new(ResourceKind::Gold, 1));
        stockpile.add(ResourcePack::new(ResourceKind::Iron, 3));

        assert_eq!(stockpile.get(ResourceKind::Iron), 5);
        assert_eq!(stockpile.get(ResourceKind::Gold), 1);
        assert_eq!(stockpile.get(ResourceKind::Fish), 0);
        assert_eq!(stockpile.total(), 6);
        assert!(!stockpile.is_empty());
    }

    #[test]
    fn test_stockpile_saturates() {
        let mut stockpile = Stockpile::new();
        stockpile.add(ResourcePack::new(ResourceKind::Grain, u32::MAX));
        stockpile.add(ResourcePack::new(ResourceKind::Grain, 10));
        stockpile.add(ResourcePack::new(ResourceKind::Stone, 1));

        assert_eq!(stockpile.get(ResourceKind::Grain), u32::MAX);
        assert_eq!(stockpile.total(), u32::MAX);
    }

    #[test]
    fn test_random_kind_covers_catalog() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(ResourceKind::random(&mut rng));
        }
        assert_eq!(seen.len(), ResourceKind::ALL.len());
    }
}
