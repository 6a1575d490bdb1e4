//! Labyrinth Collision - Geometry Tests and Movement Validation
//!
//! This crate provides the collision layer shared by the player, the camera
//! and anything else that moves through the maze.
//!
//! # Features
//!
//! - Plain collision shapes (AABB, Sphere, Plane, Segment)
//! - Exact, boundary-inclusive intersection predicates
//! - Speculative move/rollback validation against static boxes
//! - Radial and angular validation for orbiting cameras
//!
//! # Example
//!
//! ```ignore
//! use labyrinth_collision::prelude::*;
//!
//! let walls = vec![AABB::new(Vec3::new(1.9, 0.0, -1.0), Vec3::new(2.1, 3.0, 1.0))];
//! let validator = MovementValidator::new(MovementConfig::default());
//!
//! // Blocked moves leave the position untouched
//! let pos = validator.try_move(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), &walls);
//! assert_eq!(pos, Vec3::ZERO);
//! ```

pub mod config;
pub mod intersect;
pub mod movement;
pub mod shapes;

pub mod prelude {
    //! Common imports for collision functionality
    pub use crate::config::MovementConfig;
    pub use crate::intersect::{
        aabb_vs_aabb, aabb_vs_plane, aabb_vs_sphere, segment_vs_aabb, sphere_vs_sphere,
    };
    pub use crate::movement::{MovementValidator, OrbitRig};
    pub use crate::shapes::{Plane, Segment, Sphere, AABB};
    pub use glam::Vec3;
}

pub use prelude::*;
