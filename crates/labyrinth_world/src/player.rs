//! The player body

use crate::camera::{combine_intents, MoveIntent};
use crate::config::PlayerConfig;
use glam::Vec3;
use labyrinth_collision::{MovementConfig, MovementValidator, Sphere, AABB};

#[derive(Debug, Clone)]
pub struct Player {
    position: Vec3,
    spawn: Vec3,
    speed: f32,
    validator: MovementValidator,
}

impl Player {
    pub fn new(spawn: Vec3, config: &PlayerConfig) -> Self {
        Self {
            position: spawn,
            spawn,
            speed: config.speed,
            validator: MovementValidator::new(
                MovementConfig::default().with_probe_radius(config.radius),
            ),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn spawn(&self) -> Vec3 {
        self.spawn
    }

    pub fn radius(&self) -> f32 {
        self.validator.config().probe_radius
    }

    pub fn bounds(&self) -> Sphere {
        self.validator.probe(self.position)
    }

    /// Walk on the XZ plane along `forward`/`right` for `dt` seconds.
    ///
    /// The combined direction is normalized so diagonals are not faster.
    /// Vertical intents are ignored. Returns true if the step was taken.
    pub fn walk(
        &mut self,
        intents: &[MoveIntent],
        basis: (Vec3, Vec3),
        dt: f32,
        obstacles: &[AABB],
    ) -> bool {
        let (forward, right) = basis;
        let direction = combine_intents(intents, forward, right, Vec3::ZERO);
        if direction == Vec3::ZERO {
            return false;
        }

        let next = self
            .validator
            .try_move(self.position, direction * self.speed * dt, obstacles);
        let moved = next != self.position;
        self.position = next;
        moved
    }

    /// Put the player back on the spawn point
    pub fn respawn(&mut self) {
        self.position = self.spawn;
    }
}
