//! Labyrinth World - Maze World and Session Loop
//!
//! Ties the maze, the collision layer and the enemy agents together into a
//! playable world, driven one tick at a time by a [`Session`].
//!
//! # Features
//!
//! - Layered configuration (defaults, TOML, environment)
//! - Orbit and free cameras with wall-validated motion
//! - Camera-relative player movement with full rollback on contact
//! - Collectible goals, enemy capture and respawn
//!
//! # Example
//!
//! ```ignore
//! use labyrinth_world::prelude::*;
//!
//! let mut config = WorldConfig::default();
//! config.maze.seed = Some(42);
//!
//! let mut session = Session::new(config)?;
//! let input = FrameInput::moving([MoveIntent::Forward]);
//! for _ in 0..600 {
//!     session.tick(1.0 / 60.0, &input);
//! }
//! println!("{:?}", session.stats());
//! ```

pub mod camera;
pub mod config;
pub mod error;
pub mod goals;
pub mod player;
pub mod session;
pub mod world;

pub mod prelude {
    pub use crate::camera::{Camera, FreeCamera, MoveIntent, OrbitCamera};
    pub use crate::config::{
        CameraConfig, CameraMode, EnemyConfig, GoalConfig, MazeSection, PlayerConfig, WorldConfig,
    };
    pub use crate::error::{Result, WorldError};
    pub use crate::goals::{Goal, GoalSet};
    pub use crate::player::Player;
    pub use crate::session::{FrameInput, Session, SessionStats, TickEvents};
    pub use crate::world::World;
}

pub use prelude::*;
