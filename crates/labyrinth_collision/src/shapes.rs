//! Collision shapes
//!
//! Plain value types used by the intersection predicates. None of them own
//! anything beyond their fields; they are built on the caller's stack and
//! thrown away after the test.

use glam::Vec3;

/// Axis-Aligned Bounding Box
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

impl AABB {
    /// Create from min and max points
    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create from center and full size
    #[inline]
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Get the center point
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the size (full extents)
    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Check if a point is inside (boundary included)
    #[inline]
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Closest point on (or in) the box to `point`, clamped per axis
    #[inline]
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.min(self.max).max(self.min)
    }

    /// Vertex furthest along `normal`, and the one opposite to it.
    pub fn extreme_vertices(&self, normal: Vec3) -> (Vec3, Vec3) {
        let pick = |n: f32, lo: f32, hi: f32| if n >= 0.0 { (hi, lo) } else { (lo, hi) };
        let (px, nx) = pick(normal.x, self.min.x, self.max.x);
        let (py, ny) = pick(normal.y, self.min.y, self.max.y);
        let (pz, nz) = pick(normal.z, self.min.z, self.max.z);
        (Vec3::new(px, py, pz), Vec3::new(nx, ny, nz))
    }
}

/// Bounding sphere, the collision proxy for anything that moves
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    #[inline]
    pub const fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Plane given by a normal and its offset from the origin along that normal.
///
/// A point `p` lies on the plane when `normal.dot(p) == distance`. The normal
/// is stored as given; predicates only use the sign of the signed distance,
/// so it does not need to be unit length.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plane {
    pub normal: Vec3,
    pub distance: f32,
}

impl Plane {
    #[inline]
    pub const fn new(normal: Vec3, distance: f32) -> Self {
        Self { normal, distance }
    }

    /// Plane through `point` with the given normal
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        Self {
            normal,
            distance: normal.dot(point),
        }
    }

    /// Signed distance (scaled by the normal's length)
    ///
    /// Positive = in front, negative = behind, zero = on the plane.
    #[inline]
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) - self.distance
    }
}

impl Default for Plane {
    fn default() -> Self {
        Self {
            normal: Vec3::Y,
            distance: 0.0,
        }
    }
}

/// Finite line segment between two points
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub start: Vec3,
    pub end: Vec3,
}

impl Segment {
    #[inline]
    pub const fn new(start: Vec3, end: Vec3) -> Self {
        Self { start, end }
    }

    /// Unnormalized direction; `start + direction * t` for t in [0, 1]
    /// covers the segment.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.end - self.start
    }

    /// Point at parameter `t`
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.start + self.direction() * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_from_center_size() {
        let aabb = AABB::from_center_size(Vec3::new(1.0, 1.5, 0.0), Vec3::new(2.0, 3.0, 0.2));
        assert_eq!(aabb.min, Vec3::new(0.0, 0.0, -0.1));
        assert_eq!(aabb.max, Vec3::new(2.0, 3.0, 0.1));
        assert_eq!(aabb.center(), Vec3::new(1.0, 1.5, 0.0));
    }

    #[test]
    fn test_extreme_vertices() {
        let aabb = AABB::new(Vec3::ZERO, Vec3::ONE);
        let (pos, neg) = aabb.extreme_vertices(Vec3::new(1.0, -1.0, 0.0));
        assert_eq!(pos, Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(neg, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_plane_signed_distance() {
        let plane = Plane::from_point_normal(Vec3::new(0.0, 2.0, 0.0), Vec3::Y);
        assert_eq!(plane.distance, 2.0);
        assert_eq!(plane.signed_distance(Vec3::new(5.0, 3.0, -1.0)), 1.0);
        assert_eq!(plane.signed_distance(Vec3::new(0.0, 1.0, 0.0)), -1.0);
    }

    #[test]
    fn test_segment_direction() {
        let seg = Segment::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(seg.direction(), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(seg.at(0.5), Vec3::new(2.0, 0.0, 0.0));
    }
}
