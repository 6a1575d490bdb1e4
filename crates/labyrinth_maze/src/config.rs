//! Maze generation settings

use crate::error::{MazeError, Result};
use crate::walls::WallExport;
use serde::{Deserialize, Serialize};

/// Geometry and entrance settings for a generated maze
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    /// World-space edge length of one cell
    pub cell_size: f32,
    pub wall_height: f32,
    pub wall_thickness: f32,
    /// Inclusive lower bound on entrance draws
    pub min_entrances: u32,
    /// Inclusive upper bound on entrance draws
    pub max_entrances: u32,
    pub wall_export: WallExport,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            cell_size: 2.0,
            wall_height: 3.0,
            wall_thickness: 0.2,
            min_entrances: 8,
            max_entrances: 16,
            wall_export: WallExport::PerCellFlag,
        }
    }
}

impl MazeConfig {
    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn with_entrances(mut self, min: u32, max: u32) -> Self {
        self.min_entrances = min;
        self.max_entrances = max;
        self
    }

    pub fn with_wall_export(mut self, mode: WallExport) -> Self {
        self.wall_export = mode;
        self
    }

    pub(crate) fn check(&self) -> Result<()> {
        if self.min_entrances > self.max_entrances {
            return Err(MazeError::InvalidEntranceRange {
                min: self.min_entrances,
                max: self.max_entrances,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MazeConfig::default();
        assert_eq!(config.cell_size, 2.0);
        assert_eq!((config.min_entrances, config.max_entrances), (8, 16));
        assert_eq!(config.wall_export, WallExport::PerCellFlag);
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_inverted_entrance_range() {
        let config = MazeConfig::default().with_entrances(5, 2);
        assert!(matches!(
            config.check(),
            Err(MazeError::InvalidEntranceRange { min: 5, max: 2 })
        ));
    }
}
