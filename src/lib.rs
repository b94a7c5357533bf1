//! Cell Conquest - grid territory simulation
//!
//! Races with fixed personality traits compete for the cells of a grid.
//! Cells and races never call each other directly; they talk through the
//! event bus in [`bus`], and [`simulation`] drives the tick phases.

pub mod bus;
pub mod core;
pub mod grid;
pub mod race;
pub mod simulation;
