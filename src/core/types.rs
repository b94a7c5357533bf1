//! Core type definitions used throughout the codebase

use std::fmt;

use serde::{Deserialize, Serialize};

/// Simulation tick counter
pub type Tick = u64;

/// Identifier for a race; doubles as its index in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RaceId(pub u32);

impl RaceId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for RaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "race#{}", self.0)
    }
}

/// Grid coordinates of a cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coords {
    pub x: u32,
    pub y: u32,
}

impl Coords {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Grid (taxicab) distance; integral so equal costs compare exactly
    pub fn distance(&self, other: &Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The three states a map cell can be in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Unexplored, neutral territory
    Shadow,
    /// Carries a resource deposit
    Resource,
    /// Home cell of a race
    RaceOccupied,
}

impl CellKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CellKind::Shadow => "shadow",
            CellKind::Resource => "resource",
            CellKind::RaceOccupied => "race",
        }
    }
}

/// Actions a race can run against a target cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Process {
    /// Build a fabric on an unowned resource cell, claiming it
    BuildFabric,
    /// Explore a shadow cell
    ResearchCell,
    /// Link a resource cell into the race's network
    ConnectCell,
    /// Take a cell held by another race by force
    AttackEnemy,
}

impl Process {
    /// All processes in trait-pairing order
    pub const ALL: [Process; 4] = [
        Process::BuildFabric,
        Process::ResearchCell,
        Process::ConnectCell,
        Process::AttackEnemy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Process::BuildFabric => "build-fabric",
            Process::ResearchCell => "research-cell",
            Process::ConnectCell => "connect-cell",
            Process::AttackEnemy => "attack-enemy",
        }
    }
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cosmetic race archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RaceType {
    Bear,
    Troll,
    Tiger,
    Mask,
    Spider,
    Rat,
    Monkey,
    Cat,
    Goose,
    Eagle,
    Bee,
}

impl RaceType {
    pub const ALL: [RaceType; 11] = [
        RaceType::Bear,
        RaceType::Troll,
        RaceType::Tiger,
        RaceType::Mask,
        RaceType::Spider,
        RaceType::Rat,
        RaceType::Monkey,
        RaceType::Cat,
        RaceType::Goose,
        RaceType::Eagle,
        RaceType::Bee,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RaceType::Bear => "bear",
            RaceType::Troll => "troll",
            RaceType::Tiger => "tiger",
            RaceType::Mask => "mask",
            RaceType::Spider => "spider",
            RaceType::Rat => "rat",
            RaceType::Monkey => "monkey",
            RaceType::Cat => "cat",
            RaceType::Goose => "goose",
            RaceType::Eagle => "eagle",
            RaceType::Bee => "bee",
        }
    }
}

/// RGB color used to paint a race's cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
