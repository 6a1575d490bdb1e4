//! Wall geometry export
//!
//! Turns the standing wall flags of a finished grid into axis-aligned boxes.
//! A flag on the north side of cell (x, y) becomes a slab centred half a
//! cell towards -Z from the cell's world centre, spanning the full cell
//! along X, `wall_height` tall and `wall_thickness` deep.

use crate::cell::{CellCoord, CellGrid, Direction};
use crate::config::MazeConfig;
use glam::Vec3;
use labyrinth_collision::AABB;
use serde::{Deserialize, Serialize};

/// How shared interior edges are exported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallExport {
    /// One volume per standing flag. A closed interior edge is seen from both
    /// of its cells, so it yields two coincident volumes.
    #[default]
    PerCellFlag,
    /// One volume per closed edge. North and west flags of interior cells
    /// are skipped; the neighbour's south/east flag covers them.
    Deduplicated,
}

/// A single exported wall slab
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallVolume {
    pub center: Vec3,
    pub size: Vec3,
    pub id: u32,
}

impl WallVolume {
    /// Stable geometry name, `wall_<id>`
    pub fn name(&self) -> String {
        format!("wall_{}", self.id)
    }

    pub fn aabb(&self) -> AABB {
        AABB::from_center_size(self.center, self.size)
    }
}

/// Build wall volumes for every standing flag, handing out ids from
/// `next_id` (pre-incremented, so the first id is `*next_id + 1`).
pub(crate) fn export_walls(
    grid: &CellGrid,
    config: &MazeConfig,
    next_id: &mut u32,
) -> Vec<WallVolume> {
    let mut walls = Vec::new();
    let half_cell = config.cell_size * 0.5;

    for cell in grid.cells() {
        let coord = CellCoord::new(cell.x, cell.y);
        let base = Vec3::new(
            cell.x as f32 * config.cell_size,
            config.wall_height * 0.5,
            cell.y as f32 * config.cell_size,
        );

        for dir in Direction::ALL {
            if !cell.has_wall(dir) || skip_shared(grid, coord, dir, config.wall_export) {
                continue;
            }

            let (dx, dz) = dir.offset();
            let normal = Vec3::new(dx as f32, 0.0, dz as f32);
            let size = if dx != 0 {
                Vec3::new(config.wall_thickness, config.wall_height, config.cell_size)
            } else {
                Vec3::new(config.cell_size, config.wall_height, config.wall_thickness)
            };

            *next_id += 1;
            walls.push(WallVolume {
                center: base + normal * half_cell,
                size,
                id: *next_id,
            });
        }
    }

    walls
}

fn skip_shared(grid: &CellGrid, coord: CellCoord, dir: Direction, mode: WallExport) -> bool {
    match mode {
        WallExport::PerCellFlag => false,
        WallExport::Deduplicated => {
            matches!(dir, Direction::North | Direction::West) && grid.neighbor(coord, dir).is_some()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(mode: WallExport) -> MazeConfig {
        MazeConfig {
            wall_export: mode,
            ..MazeConfig::default()
        }
    }

    #[test]
    fn test_single_cell_walls() {
        let grid = CellGrid::new(1, 1);
        let cfg = config(WallExport::PerCellFlag);
        let mut next = 0;
        let walls = export_walls(&grid, &cfg, &mut next);

        assert_eq!(walls.len(), 4);
        assert_eq!(walls.iter().map(|w| w.id).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(next, 4);

        // North, South, East, West with the default 2.0 cell, 3.0 height, 0.2 thickness
        assert_eq!(walls[0].center, Vec3::new(0.0, 1.5, -1.0));
        assert_eq!(walls[0].size, Vec3::new(2.0, 3.0, 0.2));
        assert_eq!(walls[1].center, Vec3::new(0.0, 1.5, 1.0));
        assert_eq!(walls[2].center, Vec3::new(1.0, 1.5, 0.0));
        assert_eq!(walls[2].size, Vec3::new(0.2, 3.0, 2.0));
        assert_eq!(walls[3].center, Vec3::new(-1.0, 1.5, 0.0));
        assert_eq!(walls[3].name(), "wall_4");
    }

    #[test]
    fn test_shared_edges_export_twice_by_default() {
        let grid = CellGrid::new(2, 1);
        let mut next = 0;
        let walls = export_walls(&grid, &config(WallExport::PerCellFlag), &mut next);
        assert_eq!(walls.len(), 8);

        let east_of_first = walls[2];
        let west_of_second = walls[7];
        assert_eq!(east_of_first.center, west_of_second.center);
        assert_ne!(east_of_first.id, west_of_second.id);
    }

    #[test]
    fn test_deduplicated_export() {
        let grid = CellGrid::new(2, 2);
        let mut next = 0;
        let walls = export_walls(&grid, &config(WallExport::Deduplicated), &mut next);
        // 8 border edges + 4 interior edges
        assert_eq!(walls.len(), 12);
    }

    #[test]
    fn test_ids_continue_from_counter() {
        let grid = CellGrid::new(1, 1);
        let mut next = 10;
        let walls = export_walls(&grid, &config(WallExport::PerCellFlag), &mut next);
        assert_eq!(walls[0].id, 11);
        assert_eq!(next, 14);
    }

    #[test]
    fn test_volume_aabb() {
        let wall = WallVolume {
            center: Vec3::new(0.0, 1.5, -1.0),
            size: Vec3::new(2.0, 3.0, 0.2),
            id: 1,
        };
        let aabb = wall.aabb();
        assert_eq!(aabb.min.x, -1.0);
        assert_eq!(aabb.max.y, 3.0);
        assert!(aabb.contains_point(Vec3::new(0.5, 1.0, -1.05)));
    }
}
