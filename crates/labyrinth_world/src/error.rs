//! Error types for world construction

use labyrinth_maze::MazeError;
use thiserror::Error;

/// World errors
#[derive(Debug, Error)]
pub enum WorldError {
    /// Maze could not be built
    #[error("Maze error: {0}")]
    Maze(#[from] MazeError),

    /// Config file is not valid TOML for [`crate::WorldConfig`]
    #[error("Failed to parse world config: {0}")]
    Config(#[from] toml::de::Error),

    /// Config file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Values parsed but out of range
    #[error("Invalid world configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for world operations
pub type Result<T> = std::result::Result<T, WorldError>;
