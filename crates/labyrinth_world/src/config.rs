//! World configuration
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Built-in defaults
//! 2. TOML file (`--config labyrinth.toml`)
//! 3. Environment variables: `LABYRINTH_SEED`, `LABYRINTH_WIDTH`, `LABYRINTH_HEIGHT`
//! 4. Command line flags (applied by the runtime binary)
//!
//! # Example Config File
//!
//! ```toml
//! [maze]
//! width = 20
//! height = 20
//! seed = 42
//! cell_size = 2.0
//! wall_export = "per_cell_flag"   # or "deduplicated"
//!
//! [player]
//! speed = 6.0
//!
//! [camera]
//! mode = "orbit"                  # orbit, free
//! distance = 3.5
//!
//! [enemies]
//! max_agents = 8
//! detection_radius = 8.0
//!
//! [goals]
//! count = 5
//! ```

use crate::error::{Result, WorldError};
use labyrinth_ai::{AgentConfig, SpawnConfig};
use labyrinth_maze::{CellCoord, MazeConfig};
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;
use std::path::Path;

/// Maze size, seed and geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeSection {
    pub width: usize,
    pub height: usize,
    /// Fixed seed; drawn from entropy when absent
    pub seed: Option<u64>,
    #[serde(flatten)]
    pub geometry: MazeConfig,
}

impl Default for MazeSection {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            seed: None,
            geometry: MazeConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Bounding sphere radius for wall and pickup tests
    pub radius: f32,
    /// World units per second
    pub speed: f32,
    /// Spawn cell; the maze centre when absent
    pub spawn: Option<CellCoord>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            radius: 0.3,
            speed: 6.0,
            spawn: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraMode {
    #[default]
    Orbit,
    Free,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub mode: CameraMode,
    /// Initial orbit distance
    pub distance: f32,
    /// Elevation bound, applied as `[-phi_limit, phi_limit]`
    pub phi_limit: f32,
    /// Fraction a blocked zoom is shrunk by before giving up
    pub radial_shrink: f32,
    /// Per-tick easing of the orbit target toward the player
    pub smoothing: f32,
    /// Collision probe radius of the eye
    pub probe_radius: f32,
    /// Free camera speed in world units per second
    pub free_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            mode: CameraMode::Orbit,
            distance: 3.5,
            phi_limit: FRAC_PI_2,
            radial_shrink: 0.05,
            smoothing: 0.1,
            probe_radius: 0.1,
            free_speed: 4.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    #[serde(flatten)]
    pub agent: AgentConfig,
    #[serde(flatten)]
    pub spawn: SpawnConfig,
    /// Agent sphere radius for capture tests
    pub catch_radius: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            agent: AgentConfig::default(),
            spawn: SpawnConfig::default(),
            catch_radius: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalConfig {
    pub count: usize,
    pub radius: f32,
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self {
            count: 5,
            radius: 0.5,
        }
    }
}

/// Complete world configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub maze: MazeSection,
    pub player: PlayerConfig,
    pub camera: CameraConfig,
    pub enemies: EnemyConfig,
    pub goals: GoalConfig,
}

impl WorldConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load from a TOML file. Missing keys fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        log::info!("Loaded world config from {}", path.display());
        Ok(config)
    }

    /// Override from `LABYRINTH_*` environment variables
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Override from any key lookup. Unparsable values are ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(seed) = parse_override::<u64, _>(&lookup, "LABYRINTH_SEED") {
            self.maze.seed = Some(seed);
            log::info!("Seed from env: {}", seed);
        }
        if let Some(width) = parse_override::<usize, _>(&lookup, "LABYRINTH_WIDTH") {
            self.maze.width = width;
            log::info!("Width from env: {}", width);
        }
        if let Some(height) = parse_override::<usize, _>(&lookup, "LABYRINTH_HEIGHT") {
            self.maze.height = height;
            log::info!("Height from env: {}", height);
        }
    }

    /// Reject values the world cannot be built from
    pub fn validate(&self) -> Result<()> {
        if self.maze.width == 0 || self.maze.height == 0 {
            return Err(invalid(format!(
                "maze dimensions must be at least 1x1, got {}x{}",
                self.maze.width, self.maze.height
            )));
        }

        let geometry = &self.maze.geometry;
        if geometry.min_entrances > geometry.max_entrances {
            return Err(invalid(format!(
                "min_entrances ({}) exceeds max_entrances ({})",
                geometry.min_entrances, geometry.max_entrances
            )));
        }

        let positive = [
            ("maze.cell_size", geometry.cell_size),
            ("maze.wall_height", geometry.wall_height),
            ("maze.wall_thickness", geometry.wall_thickness),
            ("player.radius", self.player.radius),
            ("player.speed", self.player.speed),
            ("camera.distance", self.camera.distance),
            ("camera.phi_limit", self.camera.phi_limit),
            ("camera.probe_radius", self.camera.probe_radius),
            ("camera.free_speed", self.camera.free_speed),
            ("enemies.move_speed", self.enemies.agent.move_speed),
            ("enemies.chase_speed", self.enemies.agent.chase_speed),
            ("enemies.detection_radius", self.enemies.agent.detection_radius),
            ("enemies.catch_radius", self.enemies.catch_radius),
            ("goals.radius", self.goals.radius),
        ];
        for (name, value) in positive {
            // Also catches NaN
            if !(value > 0.0) {
                return Err(invalid(format!("{} must be positive, got {}", name, value)));
            }
        }

        if !(0.0..1.0).contains(&self.camera.radial_shrink) {
            return Err(invalid(format!(
                "camera.radial_shrink must be in [0, 1), got {}",
                self.camera.radial_shrink
            )));
        }
        if !(0.0..=1.0).contains(&self.camera.smoothing) {
            return Err(invalid(format!(
                "camera.smoothing must be in [0, 1], got {}",
                self.camera.smoothing
            )));
        }

        if let Some(spawn) = self.player.spawn {
            let inside = spawn.x >= 0
                && spawn.y >= 0
                && (spawn.x as usize) < self.maze.width
                && (spawn.y as usize) < self.maze.height;
            if !inside {
                return Err(invalid(format!(
                    "player.spawn ({}, {}) is outside the maze",
                    spawn.x, spawn.y
                )));
            }
        }

        Ok(())
    }

    /// Log the effective configuration
    pub fn print_summary(&self) {
        log::info!("World Configuration:");
        log::info!(
            "  Maze: {}x{} seed={}",
            self.maze.width,
            self.maze.height,
            self.maze
                .seed
                .map_or_else(|| "entropy".to_string(), |s| s.to_string())
        );
        log::info!("  Walls: {:?}", self.maze.geometry.wall_export);
        log::info!("  Camera: {:?}", self.camera.mode);
        log::info!(
            "  Enemies: up to {} (detect {}m)",
            self.enemies.spawn.max_agents,
            self.enemies.agent.detection_radius
        );
        log::info!("  Goals: {}", self.goals.count);
    }
}

fn invalid(message: String) -> WorldError {
    WorldError::InvalidConfig(message)
}

fn parse_override<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Ignoring {}={:?}: not a valid number", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labyrinth_maze::WallExport;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_are_valid() {
        let config = WorldConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!((config.maze.width, config.maze.height), (20, 20));
        assert_eq!(config.camera.mode, CameraMode::Orbit);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = WorldConfig::from_toml_str(
            r#"
            [maze]
            width = 12
            seed = 7
            wall_export = "deduplicated"

            [camera]
            mode = "free"

            [enemies]
            max_agents = 3
            chase_speed = 0.25
            "#,
        )
        .unwrap();

        assert_eq!(config.maze.width, 12);
        assert_eq!(config.maze.height, 20);
        assert_eq!(config.maze.seed, Some(7));
        assert_eq!(config.maze.geometry.wall_export, WallExport::Deduplicated);
        assert_eq!(config.maze.geometry.cell_size, 2.0);
        assert_eq!(config.camera.mode, CameraMode::Free);
        assert_eq!(config.enemies.spawn.max_agents, 3);
        assert_eq!(config.enemies.agent.chase_speed, 0.25);
        assert_eq!(config.enemies.agent.move_speed, 1.0);
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let err = WorldConfig::from_toml_str("[maze]\nwidth = \"wide\"").unwrap_err();
        assert!(matches!(err, WorldError::Config(_)));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("LABYRINTH_SEED", "99"),
            ("LABYRINTH_WIDTH", "31"),
            ("LABYRINTH_HEIGHT", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut config = WorldConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.maze.seed, Some(99));
        assert_eq!(config.maze.width, 31);
        assert_eq!(config.maze.height, 20);
    }

    #[test]
    fn test_validate_rejects_zero_dimensions() {
        let mut config = WorldConfig::default();
        config.maze.height = 0;
        assert!(matches!(config.validate(), Err(WorldError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_non_positive_values() {
        let mut config = WorldConfig::default();
        config.enemies.agent.chase_speed = 0.0;
        assert!(config.validate().is_err());

        let mut config = WorldConfig::default();
        config.player.radius = -1.0;
        assert!(config.validate().is_err());

        let mut config = WorldConfig::default();
        config.goals.radius = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_spawn_bounds() {
        let mut config = WorldConfig::default();
        config.player.spawn = Some(CellCoord::new(20, 0));
        assert!(config.validate().is_err());
        config.player.spawn = Some(CellCoord::new(19, 19));
        assert!(config.validate().is_ok());
    }
}
