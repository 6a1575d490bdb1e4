//! Error types for maze generation

use thiserror::Error;

/// Maze errors
#[derive(Debug, Error)]
pub enum MazeError {
    /// Width or height of zero or above the supported maximum
    #[error(
        "Invalid maze dimensions: {width}x{height} (each must be between 1 and {max})",
        max = crate::cell::MAX_DIMENSION
    )]
    InvalidDimensions { width: usize, height: usize },

    /// Entrance range with min above max
    #[error("Invalid entrance range: {min}..={max}")]
    InvalidEntranceRange { min: u32, max: u32 },

    /// Writing a maze image failed
    #[error("Failed to write maze image: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for maze operations
pub type Result<T> = std::result::Result<T, MazeError>;
