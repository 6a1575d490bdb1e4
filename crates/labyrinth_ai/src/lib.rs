//! Labyrinth AI - Enemy Behaviour and Grid Navigation
//!
//! This crate provides the enemies that roam the maze.
//!
//! # Features
//!
//! - Generic finite state machines (FSM)
//! - Patrol/chase navigation agents stepping cell to cell
//! - Batch spawning away from the player
//!
//! # Example
//!
//! ```ignore
//! use labyrinth_ai::prelude::*;
//!
//! let mut spawner = AgentSpawner::new(SpawnConfig::default(), AgentConfig::default());
//! let (view, rng) = maze.split_mut();
//! spawner.respawn(player_pos, &view, rng);
//! spawner.update(dt, player_pos, &view, rng);
//! ```

pub mod agent;
pub mod spawner;
pub mod state_machine;

pub mod prelude {
    pub use crate::agent::{AgentConfig, AgentMode, Motion, NavigationAgent, Sensing};
    pub use crate::spawner::{AgentSpawner, SpawnConfig};
    pub use crate::state_machine::{State, StateMachine, Transition, TransitionCondition};
}

pub use prelude::*;
