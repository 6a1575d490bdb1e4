//! Intersection tests
//!
//! Boolean overlap predicates between the shapes in [`crate::shapes`]:
//! - AABB vs Sphere (closest point)
//! - AABB vs AABB (separating axis)
//! - Segment vs AABB (slab method)
//! - Sphere vs Sphere
//! - AABB vs Plane (positive/negative vertex)
//!
//! Every test is exact and counts touching boundaries as a hit. None of them
//! can fail for finite input.

use crate::shapes::{Plane, Segment, Sphere, AABB};
use glam::Vec3;

/// Inverse used for a zero direction component in the slab test.
///
/// Finite on purpose: `0.0 * SLAB_SENTINEL` stays `0.0`, so a segment lying
/// exactly on a slab boundary never produces NaN.
pub const SLAB_SENTINEL: f32 = f32::MAX;

/// AABB-Sphere overlap
///
/// Clamps the sphere center into the box to find the closest point, then
/// compares squared distance against the squared radius.
#[inline]
pub fn aabb_vs_sphere(aabb: &AABB, sphere: &Sphere) -> bool {
    let closest = aabb.closest_point(sphere.center);
    (closest - sphere.center).length_squared() <= sphere.radius * sphere.radius
}

/// AABB-AABB overlap
#[inline]
pub fn aabb_vs_aabb(a: &AABB, b: &AABB) -> bool {
    if a.max.x < b.min.x || a.min.x > b.max.x {
        return false;
    }
    if a.max.y < b.min.y || a.min.y > b.max.y {
        return false;
    }
    if a.max.z < b.min.z || a.min.z > b.max.z {
        return false;
    }
    true
}

/// Segment-AABB intersection using the slab method
///
/// Unlike a ray test the parametric interval is clipped to `[0, 1]`, so only
/// the finite segment counts.
pub fn segment_vs_aabb(segment: &Segment, aabb: &AABB) -> bool {
    let dir = segment.direction();
    let inv = Vec3::new(
        inverse_or_sentinel(dir.x),
        inverse_or_sentinel(dir.y),
        inverse_or_sentinel(dir.z),
    );
    let origin = segment.start;

    let t1 = (aabb.min.x - origin.x) * inv.x;
    let t2 = (aabb.max.x - origin.x) * inv.x;
    let t3 = (aabb.min.y - origin.y) * inv.y;
    let t4 = (aabb.max.y - origin.y) * inv.y;
    let t5 = (aabb.min.z - origin.z) * inv.z;
    let t6 = (aabb.max.z - origin.z) * inv.z;

    let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
    let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

    tmin <= tmax && tmax >= 0.0 && tmin <= 1.0
}

#[inline]
fn inverse_or_sentinel(component: f32) -> f32 {
    if component != 0.0 {
        1.0 / component
    } else {
        SLAB_SENTINEL
    }
}

/// Sphere-Sphere overlap
#[inline]
pub fn sphere_vs_sphere(a: &Sphere, b: &Sphere) -> bool {
    a.center.distance(b.center) <= a.radius + b.radius
}

/// AABB-Plane straddle test
///
/// True when the box's positive and negative vertices (relative to the plane
/// normal) are on opposite sides of the plane, or either touches it.
pub fn aabb_vs_plane(aabb: &AABB, plane: &Plane) -> bool {
    let (positive, negative) = aabb.extreme_vertices(plane.normal);
    plane.signed_distance(positive) * plane.signed_distance(negative) <= 0.0
}
