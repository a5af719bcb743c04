use bevy::prelude::*;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VanguardError {
    // Config-related errors
    #[error("Failed to get config directory")]
    ConfigDirNotFound,

    #[error("Failed to create config directory: {0}")]
    ConfigDirCreationFailed(#[from] std::io::Error),

    #[error("Failed to serialize config: {0}")]
    SerializationFailed(#[from] toml::ser::Error),

    #[error("Failed to deserialize config: {0}")]
    DeserializationFailed(#[from] toml::de::Error),

    #[error("Config file not found at path: {path}")]
    ConfigFileNotFound { path: PathBuf },

    // Simulation errors
    #[error(transparent)]
    Pathfind(#[from] PathfindError),
}

/// Result type alias for all operations
pub type VanguardResult<T> = Result<T, VanguardError>;

/// Reasons the pathfinding collaborator can reject a request.
///
/// Callers at the command surface flatten this to a success flag and fall
/// back to direct movement, so every variant is recoverable.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum PathfindError {
    #[error("Position outside the navigation grid: {position:?}")]
    OutOfBounds { position: Vec3 },

    #[error("Position on a blocked cell: {position:?}")]
    Blocked { position: Vec3 },

    #[error("No route between start and goal")]
    NoRoute,
}
