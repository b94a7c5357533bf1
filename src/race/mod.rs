//! Races and how they choose what to do

pub mod agent;
pub mod registry;
pub mod traits;

pub use agent::{Candidate, Intent, Race};
pub use registry::RaceRegistry;
pub use traits::{preference_multiplier, RaceTraits, TRAIT_RANGE};
