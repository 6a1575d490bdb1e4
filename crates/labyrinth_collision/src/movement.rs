//! Speculative movement validation
//!
//! A move is applied to a copy of the position, the copy is tested against
//! the obstacle set, and the move is either taken whole or dropped whole.
//! There is no sliding along walls and no partially applied step.
//!
//! The mover's own box, if it has one, must not be in the obstacle slice;
//! filtering it out is up to the caller.

use crate::config::MovementConfig;
use crate::intersect::aabb_vs_sphere;
use crate::shapes::{Sphere, AABB};
use glam::Vec3;

/// Spherical rig around a target point, used by orbit cameras.
///
/// `theta` is the angle in the ZX plane measured from +Z, `phi` the elevation
/// above the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitRig {
    pub target: Vec3,
    pub theta: f32,
    pub phi: f32,
}

impl OrbitRig {
    pub fn new(target: Vec3, theta: f32, phi: f32) -> Self {
        Self { target, theta, phi }
    }

    /// World position of the eye at `distance` from the target
    pub fn eye(&self, distance: f32) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        self.target
            + Vec3::new(
                distance * cos_phi * sin_theta,
                distance * sin_phi,
                distance * cos_phi * cos_theta,
            )
    }
}

/// Validates candidate positions against a set of static boxes
#[derive(Debug, Clone, Copy, Default)]
pub struct MovementValidator {
    config: MovementConfig,
}

impl MovementValidator {
    pub fn new(config: MovementConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    /// Bounding sphere used for a body at `position`
    #[inline]
    pub fn probe(&self, position: Vec3) -> Sphere {
        Sphere::new(position, self.config.probe_radius)
    }

    /// True if the probe sphere at `position` touches any obstacle
    pub fn is_blocked(&self, position: Vec3, obstacles: &[AABB]) -> bool {
        let probe = self.probe(position);
        obstacles.iter().any(|aabb| aabb_vs_sphere(aabb, &probe))
    }

    /// Apply `displacement` if the destination is free.
    ///
    /// Returns either `current + displacement` or `current`, nothing in
    /// between.
    pub fn try_move(&self, current: Vec3, displacement: Vec3, obstacles: &[AABB]) -> Vec3 {
        let candidate = current + displacement;
        if self.is_blocked(candidate, obstacles) {
            log::trace!("move to {:?} blocked, staying at {:?}", candidate, current);
            current
        } else {
            candidate
        }
    }

    /// Change an orbit distance by `delta`.
    ///
    /// The new distance is kept if its eye position is free, exactly as
    /// [`Self::try_move`] would decide. Otherwise the new distance is shrunk
    /// once by the configured fraction and retested; if that also collides
    /// the previous distance is returned.
    pub fn try_radial_change(
        &self,
        rig: &OrbitRig,
        distance: f32,
        delta: f32,
        obstacles: &[AABB],
    ) -> f32 {
        let proposed = distance + delta;
        if !self.is_blocked(rig.eye(proposed), obstacles) {
            return proposed;
        }

        let shrunk = proposed * (1.0 - self.config.radial_shrink);
        if !self.is_blocked(rig.eye(shrunk), obstacles) {
            log::trace!("radial change shrunk from {} to {}", proposed, shrunk);
            return shrunk;
        }

        distance
    }

    /// Apply an angular change to an orbit rig.
    ///
    /// Same all-or-nothing rule as [`Self::try_move`], with no shrink retry:
    /// on rollback the current rig is returned unchanged.
    pub fn try_orbit(
        &self,
        rig: &OrbitRig,
        distance: f32,
        rotated: OrbitRig,
        obstacles: &[AABB],
    ) -> OrbitRig {
        if self.is_blocked(rotated.eye(distance), obstacles) {
            *rig
        } else {
            rotated
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn wall() -> Vec<AABB> {
        // Thin wall across the X axis at x = 2
        vec![AABB::new(Vec3::new(1.9, 0.0, -5.0), Vec3::new(2.1, 3.0, 5.0))]
    }

    fn validator() -> MovementValidator {
        MovementValidator::new(MovementConfig::default().with_probe_radius(0.5))
    }

    #[test]
    fn test_move_into_open_space() {
        let v = validator();
        let start = Vec3::new(0.0, 1.0, 0.0);
        let step = Vec3::new(0.25, 0.0, 0.125);
        assert_eq!(v.try_move(start, step, &wall()), start + step);
    }

    #[test]
    fn test_move_into_wall_rolls_back() {
        let v = validator();
        let start = Vec3::new(0.0, 1.0, 0.0);
        let result = v.try_move(start, Vec3::new(1.5, 0.0, 0.0), &wall());
        assert_eq!(result, start);
    }

    #[test]
    fn test_move_through_wall_is_allowed() {
        // Only the destination is probed; tunnelling through is the caller's problem.
        let v = validator();
        let start = Vec3::new(0.0, 1.0, 0.0);
        let step = Vec3::new(4.0, 0.0, 0.0);
        assert_eq!(v.try_move(start, step, &wall()), start + step);
    }

    #[test]
    fn test_no_obstacles() {
        let v = validator();
        let start = Vec3::new(2.0, 1.0, 0.0);
        assert_eq!(v.try_move(start, Vec3::X, &[]), Vec3::new(3.0, 1.0, 0.0));
    }

    #[test]
    fn test_orbit_eye() {
        let rig = OrbitRig::new(Vec3::ZERO, 0.0, 0.0);
        let eye = rig.eye(3.0);
        assert_relative_eq!(eye.x, 0.0);
        assert_relative_eq!(eye.y, 0.0);
        assert_relative_eq!(eye.z, 3.0);
    }

    #[test]
    fn test_radial_change_free() {
        let v = validator();
        let rig = OrbitRig::new(Vec3::new(0.0, 1.0, 0.0), std::f32::consts::FRAC_PI_2, 0.0);
        // Eye moves along +X; wall face is at 1.9, probe radius 0.5
        let d = v.try_radial_change(&rig, 0.5, 0.5, &wall());
        assert_eq!(d, 1.0);
    }

    #[test]
    fn test_radial_change_shrinks() {
        let v = validator();
        let rig = OrbitRig::new(Vec3::new(0.0, 1.0, 0.0), std::f32::consts::FRAC_PI_2, 0.0);
        // 1.42 collides (1.42 + 0.5 > 1.9), 1.42 * 0.95 = 1.349 does not
        let d = v.try_radial_change(&rig, 1.0, 0.42, &wall());
        assert_relative_eq!(d, 1.42 * 0.95, epsilon = 1e-5);
    }

    #[test]
    fn test_radial_change_reverts() {
        let v = validator();
        let rig = OrbitRig::new(Vec3::new(0.0, 1.0, 0.0), std::f32::consts::FRAC_PI_2, 0.0);
        let d = v.try_radial_change(&rig, 1.0, 1.0, &wall());
        assert_eq!(d, 1.0);
    }

    #[test]
    fn test_orbit_rollback_keeps_angles() {
        let v = validator();
        let rig = OrbitRig::new(Vec3::new(0.0, 1.0, 0.0), 0.0, 0.0);
        let rotated = OrbitRig { theta: std::f32::consts::FRAC_PI_2, ..rig };
        // Distance 1.6 puts the rotated eye at x = 1.6, inside the probe range of the wall
        let result = v.try_orbit(&rig, 1.6, rotated, &wall());
        assert_eq!(result, rig);

        let result = v.try_orbit(&rig, 1.0, rotated, &wall());
        assert_eq!(result, rotated);
    }
}
