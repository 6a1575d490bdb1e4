//! Camera variants
//!
//! Every camera change is validated against the maze walls before it is
//! committed. Orbit zoom uses the radial shrink fallback; rotations and
//! free-flight moves are all-or-nothing.

use crate::config::{CameraConfig, CameraMode};
use glam::{Vec2, Vec3};
use labyrinth_collision::{MovementConfig, MovementValidator, OrbitRig, AABB};
use serde::{Deserialize, Serialize};

/// A discrete movement request, resolved against the active camera's basis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveIntent {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

impl MoveIntent {
    /// Unit direction in a `(forward, right, up)` basis
    pub fn resolve(self, forward: Vec3, right: Vec3, up: Vec3) -> Vec3 {
        match self {
            MoveIntent::Forward => forward,
            MoveIntent::Backward => -forward,
            MoveIntent::Right => right,
            MoveIntent::Left => -right,
            MoveIntent::Up => up,
            MoveIntent::Down => -up,
        }
    }
}

/// Sum intents in a basis and normalize. Zero if they cancel out.
pub fn combine_intents(intents: &[MoveIntent], forward: Vec3, right: Vec3, up: Vec3) -> Vec3 {
    intents
        .iter()
        .map(|intent| intent.resolve(forward, right, up))
        .sum::<Vec3>()
        .normalize_or_zero()
}

/// Third-person camera circling a smoothed target
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    rig: OrbitRig,
    distance: f32,
    phi_limit: f32,
    smoothing: f32,
}

impl OrbitCamera {
    pub fn new(target: Vec3, config: &CameraConfig) -> Self {
        Self {
            rig: OrbitRig::new(target, 0.0, 0.0),
            distance: config.distance.max(f32::EPSILON),
            phi_limit: config.phi_limit,
            smoothing: config.smoothing,
        }
    }

    pub fn rig(&self) -> &OrbitRig {
        &self.rig
    }

    pub fn target(&self) -> Vec3 {
        self.rig.target
    }

    pub fn theta(&self) -> f32 {
        self.rig.theta
    }

    pub fn phi(&self) -> f32 {
        self.rig.phi
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn eye(&self) -> Vec3 {
        self.rig.eye(self.distance)
    }

    /// Horizontal forward and right axes; forward looks from the eye toward the target
    pub fn ground_basis(&self) -> (Vec3, Vec3) {
        let (sin_theta, cos_theta) = self.rig.theta.sin_cos();
        let forward = Vec3::new(-sin_theta, 0.0, -cos_theta);
        (forward, forward.cross(Vec3::Y))
    }

    /// Rotate by `delta` (theta, phi). Phi is clamped first; a blocked eye
    /// reverts both angles. Returns true if the rotation was applied.
    pub fn rotate(
        &mut self,
        delta: Vec2,
        validator: &MovementValidator,
        obstacles: &[AABB],
    ) -> bool {
        let rotated = OrbitRig::new(
            self.rig.target,
            self.rig.theta + delta.x,
            (self.rig.phi + delta.y).clamp(-self.phi_limit, self.phi_limit),
        );
        let next = validator.try_orbit(&self.rig, self.distance, rotated, obstacles);
        let applied = next == rotated;
        self.rig = next;
        applied
    }

    /// Change distance by `delta`, never below `f32::EPSILON`
    pub fn zoom(&mut self, delta: f32, validator: &MovementValidator, obstacles: &[AABB]) {
        let delta = (self.distance + delta).max(f32::EPSILON) - self.distance;
        let next = validator.try_radial_change(&self.rig, self.distance, delta, obstacles);
        self.distance = next.max(f32::EPSILON);
    }

    /// Ease the target toward `point` by the smoothing factor
    pub fn follow(&mut self, point: Vec3) {
        self.rig.target += (point - self.rig.target) * self.smoothing;
    }
}

/// Free-flying camera moved by intents along its own basis
#[derive(Debug, Clone, PartialEq)]
pub struct FreeCamera {
    position: Vec3,
    yaw: f32,
    pitch: f32,
    speed: f32,
    pitch_limit: f32,
}

impl FreeCamera {
    pub fn new(position: Vec3, config: &CameraConfig) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            speed: config.free_speed,
            pitch_limit: config.phi_limit,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// View direction; yaw 0 and pitch 0 look down -Z
    pub fn forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(-sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch)
    }

    pub fn right(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(cos_yaw, 0.0, -sin_yaw)
    }

    /// Horizontal forward and right axes
    pub fn ground_basis(&self) -> (Vec3, Vec3) {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        (Vec3::new(-sin_yaw, 0.0, -cos_yaw), self.right())
    }

    pub fn look(&mut self, delta: Vec2) {
        self.yaw += delta.x;
        self.pitch = (self.pitch + delta.y).clamp(-self.pitch_limit, self.pitch_limit);
    }

    /// Move along the camera basis for `dt` seconds. Returns true if the
    /// move was applied.
    pub fn fly(
        &mut self,
        intents: &[MoveIntent],
        dt: f32,
        validator: &MovementValidator,
        obstacles: &[AABB],
    ) -> bool {
        let direction = combine_intents(intents, self.forward(), self.right(), Vec3::Y);
        if direction == Vec3::ZERO {
            return false;
        }
        let next = validator.try_move(self.position, direction * self.speed * dt, obstacles);
        let moved = next != self.position;
        self.position = next;
        moved
    }
}

/// The active camera
#[derive(Debug, Clone, PartialEq)]
pub enum Camera {
    Orbit(OrbitCamera),
    Free(FreeCamera),
}

impl Camera {
    pub fn from_config(target: Vec3, config: &CameraConfig) -> Self {
        match config.mode {
            CameraMode::Orbit => Camera::Orbit(OrbitCamera::new(target, config)),
            CameraMode::Free => {
                Camera::Free(FreeCamera::new(target + Vec3::new(0.0, 1.0, 0.0), config))
            }
        }
    }

    pub fn mode(&self) -> CameraMode {
        match self {
            Camera::Orbit(_) => CameraMode::Orbit,
            Camera::Free(_) => CameraMode::Free,
        }
    }

    pub fn eye(&self) -> Vec3 {
        match self {
            Camera::Orbit(orbit) => orbit.eye(),
            Camera::Free(free) => free.position(),
        }
    }

    /// Horizontal basis the player moves in
    pub fn ground_basis(&self) -> (Vec3, Vec3) {
        match self {
            Camera::Orbit(orbit) => orbit.ground_basis(),
            Camera::Free(free) => free.ground_basis(),
        }
    }

    /// Apply look input (and zoom, for orbit cameras)
    pub fn apply_look(
        &mut self,
        look: Vec2,
        zoom: f32,
        validator: &MovementValidator,
        obstacles: &[AABB],
    ) {
        match self {
            Camera::Orbit(orbit) => {
                if look != Vec2::ZERO {
                    orbit.rotate(look, validator, obstacles);
                }
                if zoom != 0.0 {
                    orbit.zoom(zoom, validator, obstacles);
                }
            }
            Camera::Free(free) => free.look(look),
        }
    }

    /// Track the player; free cameras stay where they are
    pub fn follow(&mut self, point: Vec3) {
        match self {
            Camera::Orbit(orbit) => orbit.follow(point),
            Camera::Free(_) => {}
        }
    }
}

/// Validator for the camera eye
pub fn camera_validator(config: &CameraConfig) -> MovementValidator {
    MovementValidator::new(
        MovementConfig::default()
            .with_probe_radius(config.probe_radius)
            .with_radial_shrink(config.radial_shrink),
    )
}
