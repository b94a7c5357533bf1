//! Game configuration loaded from TOML
//!
//! Every section has a `Default`, so a config file only needs the keys it
//! wants to change.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{GameError, Result};

/// Largest map `validate` accepts, in cells
pub const MAX_MAP_CELLS: u32 = 1_000_000;

/// Largest trait value `validate` accepts
pub const MAX_TRAIT: u32 = 1_000;

/// Map layout and seeding
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub width: u32,
    pub height: u32,
    /// Chance (0.0-1.0) that a shadow cell is seeded with a resource at setup
    pub resource_fraction: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 12,
            height: 12,
            resource_fraction: 0.15,
        }
    }
}

/// Race slots and trait bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceConfig {
    /// Number of races; each one gets its own vertical strip of the map
    pub count: u32,
    /// Lowest value a trait can roll
    pub trait_min: u32,
    /// Highest value a trait can roll (inclusive)
    pub trait_max: u32,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            count: 4,
            trait_min: 1,
            trait_max: 9,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed for the deterministic RNG
    pub seed: u64,
    /// Ticks to run when no count is given on the command line
    pub ticks: u32,
    /// Units an owned resource cell delivers to its owner each tick
    pub resource_yield_per_tick: u32,
    pub map: MapConfig,
    pub races: RaceConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            ticks: 200,
            resource_yield_per_tick: 1,
            map: MapConfig::default(),
            races: RaceConfig::default(),
        }
    }
}

impl GameConfig {
    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.map.width == 0 || self.map.height == 0 {
            return Err(GameError::InvalidConfig(format!(
                "map must be at least 1x1, got {}x{}",
                self.map.width, self.map.height
            )));
        }

        match self.map.width.checked_mul(self.map.height) {
            Some(cells) if cells <= MAX_MAP_CELLS => {}
            _ => {
                return Err(GameError::InvalidConfig(format!(
                    "map {}x{} exceeds {} cells",
                    self.map.width, self.map.height, MAX_MAP_CELLS
                )));
            }
        }

        if self.races.count > self.map.width {
            return Err(GameError::InvalidConfig(format!(
                "{} races do not fit into {} map columns",
                self.races.count, self.map.width
            )));
        }

        if !(0.0..=1.0).contains(&self.map.resource_fraction) {
            return Err(GameError::InvalidConfig(format!(
                "resource_fraction ({}) must be within 0.0..=1.0",
                self.map.resource_fraction
            )));
        }

        // A zero trait would make a process that never progresses
        if self.races.trait_min == 0 || self.races.trait_min > self.races.trait_max {
            return Err(GameError::InvalidConfig(format!(
                "trait range {}..={} must be non-empty and start at 1 or above",
                self.races.trait_min, self.races.trait_max
            )));
        }

        if self.races.trait_max > MAX_TRAIT {
            return Err(GameError::InvalidConfig(format!(
                "trait_max ({}) must not exceed {}",
                self.races.trait_max, MAX_TRAIT
            )));
        }

        Ok(())
    }
}
