use thiserror::Error;

use crate::core::types::{Coords, RaceId};

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Race not found: {0}")]
    RaceNotFound(RaceId),

    #[error("No cell at {0}")]
    CellNotFound(Coords),

    #[error("Race registered out of order: expected {expected}, got {got}")]
    RaceIdMismatch { expected: RaceId, got: RaceId },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
