//! Labyrinth Maze - Procedural Maze Generation
//!
//! Builds a perfect maze over a rectangular cell grid, opens a handful of
//! entrances on its border and exports the remaining walls as axis-aligned
//! boxes ready for rendering and collision.
//!
//! # Example
//!
//! ```ignore
//! use labyrinth_maze::prelude::*;
//!
//! let mut maze = MazeGenerator::new(20, 20, Some(42))?;
//! maze.generate_maze();
//!
//! for wall in maze.export_geometry() {
//!     println!("{} at {:?}", wall.name(), wall.center);
//! }
//! ```

pub mod cell;
pub mod config;
pub mod error;
pub mod generator;
pub mod ppm;
pub mod rng;
pub mod walls;

pub use cell::{Cell, CellCoord, CellGrid, Direction, MAX_DIMENSION};
pub use config::MazeConfig;
pub use error::{MazeError, Result};
pub use generator::{MazeGenerator, MazeSummary, MazeView};
pub use rng::MazeRng;
pub use walls::{WallExport, WallVolume};

pub mod prelude {
    pub use crate::cell::{CellCoord, CellGrid, Direction};
    pub use crate::config::MazeConfig;
    pub use crate::error::{MazeError, Result};
    pub use crate::generator::{MazeGenerator, MazeSummary, MazeView};
    pub use crate::rng::MazeRng;
    pub use crate::walls::{WallExport, WallVolume};
}
