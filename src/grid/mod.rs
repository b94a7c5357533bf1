//! Map cells and the resources they carry

pub mod cell;
pub mod map;
pub mod resource;

pub use cell::{Cell, CellState, Occupant, ProgressOutcome, PROGRESS_COMPLETE};
pub use map::Grid;
pub use resource::{ResourceKind, ResourcePack, Stockpile};
