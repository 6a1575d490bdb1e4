//! Movement validation configuration

/// Tunables for [`crate::movement::MovementValidator`]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovementConfig {
    /// Radius of the bounding sphere placed at every candidate position
    pub probe_radius: f32,

    /// Fraction removed from a blocked radial distance before the single retry
    pub radial_shrink: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            probe_radius: 0.3,
            radial_shrink: 0.05,
        }
    }
}

impl MovementConfig {
    /// Set probe radius
    pub fn with_probe_radius(mut self, radius: f32) -> Self {
        self.probe_radius = radius;
        self
    }

    /// Set radial shrink fraction
    pub fn with_radial_shrink(mut self, shrink: f32) -> Self {
        self.radial_shrink = shrink;
        self
    }
}
