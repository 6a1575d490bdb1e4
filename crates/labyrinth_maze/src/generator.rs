//! Randomized depth-first maze generation
//!
//! Generation runs in three phases:
//!
//! 1. **Spanning tree** - iterative DFS from the centre cell with an explicit
//!    stack. Unvisited in-bounds neighbours are collected in N, S, E, W order
//!    and one is picked uniformly from the shared stream.
//! 2. **Entrances** - a count is drawn from the configured inclusive range;
//!    each entrance draws a side, then an index along it, and clears that
//!    border flag. Index 0 is never opened.
//! 3. **Export** - standing flags become [`WallVolume`]s.
//!
//! The same `(width, height, seed)` always yields the same walls.

use crate::cell::{CellCoord, CellGrid, Direction, MAX_DIMENSION};
use crate::config::MazeConfig;
use crate::error::{MazeError, Result};
use crate::ppm;
use crate::rng::MazeRng;
use crate::walls::{export_walls, WallVolume};
use glam::Vec3;
use labyrinth_collision::AABB;
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Border sides in entrance-draw order
const ENTRANCE_SIDES: [Direction; 4] = [
    Direction::North,
    Direction::South,
    Direction::East,
    Direction::West,
];

/// Post-generation statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeSummary {
    pub width: usize,
    pub height: usize,
    pub wall_count: usize,
    /// Border flags actually cleared by entrance carving
    pub entrances_opened: usize,
    pub seed: u64,
}

impl fmt::Display for MazeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "maze {}x{} (seed {}): {} walls, {} entrances",
            self.width, self.height, self.seed, self.wall_count, self.entrances_opened
        )
    }
}

/// Read-only window onto a finished grid, for anything that walks the maze
#[derive(Debug, Clone, Copy)]
pub struct MazeView<'a> {
    grid: &'a CellGrid,
    cell_size: f32,
}

impl<'a> MazeView<'a> {
    pub fn new(grid: &'a CellGrid, cell_size: f32) -> Self {
        Self { grid, cell_size }
    }

    pub fn grid(&self) -> &'a CellGrid {
        self.grid
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// `(x * cell_size, y * cell_size)`, the world X/Z of a cell centre
    pub fn cell_to_world_coords(&self, coord: CellCoord) -> (f32, f32) {
        (coord.x as f32 * self.cell_size, coord.y as f32 * self.cell_size)
    }

    /// Cell centre on the floor plane
    pub fn cell_center(&self, coord: CellCoord) -> Vec3 {
        let (x, z) = self.cell_to_world_coords(coord);
        Vec3::new(x, 0.0, z)
    }

    pub fn is_valid_position(&self, coord: CellCoord) -> bool {
        self.grid.is_valid_position(coord)
    }

    pub fn valid_positions(&self) -> Vec<CellCoord> {
        self.grid.valid_positions()
    }

    pub fn valid_neighbors(&self, coord: CellCoord) -> Vec<CellCoord> {
        self.grid.valid_neighbors(coord)
    }
}

/// Owns the grid, the shared random stream and the exported walls
#[derive(Debug, Clone)]
pub struct MazeGenerator {
    config: MazeConfig,
    grid: CellGrid,
    rng: MazeRng,
    walls: Vec<WallVolume>,
    wall_counter: u32,
    entrances_opened: usize,
}

impl MazeGenerator {
    /// Create a generator with default geometry.
    ///
    /// `seed = None` draws one from entropy. Fails on a zero dimension.
    pub fn new(width: usize, height: usize, seed: Option<u64>) -> Result<Self> {
        Self::with_config(width, height, seed, MazeConfig::default())
    }

    pub fn with_config(
        width: usize,
        height: usize,
        seed: Option<u64>,
        config: MazeConfig,
    ) -> Result<Self> {
        let dims = 1..=MAX_DIMENSION;
        if !dims.contains(&width) || !dims.contains(&height) {
            return Err(MazeError::InvalidDimensions { width, height });
        }
        config.check()?;

        let rng = match seed {
            Some(seed) => MazeRng::from_seed(seed),
            None => MazeRng::from_entropy(),
        };
        debug!("Maze generator {}x{} seeded with {}", width, height, rng.seed());

        Ok(Self {
            config,
            grid: CellGrid::new(width, height),
            rng,
            walls: Vec::new(),
            wall_counter: 0,
            entrances_opened: 0,
        })
    }

    /// Run all three phases and log the summary
    pub fn generate_maze(&mut self) {
        self.carve_spanning_tree();
        self.carve_entrances();
        self.export_walls();
        info!("Generated {}", self.summary());
    }

    /// Phase 1: randomized DFS from the centre cell
    pub fn carve_spanning_tree(&mut self) {
        let start = self.grid.center();
        self.grid.mark_visited(start);
        let mut stack = vec![start];
        let mut candidates = Vec::with_capacity(4);

        while let Some(&current) = stack.last() {
            candidates.clear();
            candidates.extend(Direction::ALL.into_iter().filter(|&dir| {
                self.grid
                    .neighbor(current, dir)
                    .is_some_and(|next| !self.grid.is_visited(next))
            }));

            match candidates.choose(&mut self.rng) {
                Some(&dir) => {
                    let next = current.step(dir);
                    self.grid.carve(current, dir);
                    self.grid.mark_visited(next);
                    stack.push(next);
                }
                None => {
                    stack.pop();
                }
            }
        }

        debug!(
            "Spanning tree carved: {} open edges over {} cells",
            self.grid.open_edge_count(),
            self.grid.len()
        );
    }

    /// Phase 2: open border walls. Returns the number of flags cleared.
    pub fn carve_entrances(&mut self) -> usize {
        let count = self
            .rng
            .gen_range(self.config.min_entrances..=self.config.max_entrances);
        let (width, height) = (self.grid.width() as i32, self.grid.height() as i32);
        let mut opened = 0;

        for _ in 0..count {
            let side = ENTRANCE_SIDES[self.rng.gen_range(0..ENTRANCE_SIDES.len())];
            let coord = match side {
                Direction::North => CellCoord::new(self.rng.gen_range(0..width), 0),
                Direction::South => CellCoord::new(self.rng.gen_range(0..width), height - 1),
                Direction::East => CellCoord::new(width - 1, self.rng.gen_range(0..height)),
                Direction::West => CellCoord::new(0, self.rng.gen_range(0..height)),
            };

            let index = match side {
                Direction::North | Direction::South => coord.x,
                Direction::East | Direction::West => coord.y,
            };
            if index > 0 && self.grid.open_wall(coord, side) {
                opened += 1;
            }
        }

        debug!("Entrance carving: {} draws, {} walls opened", count, opened);
        self.entrances_opened += opened;
        opened
    }

    /// Phase 3: rebuild the wall list. Ids keep counting from previous exports.
    pub fn export_walls(&mut self) {
        self.walls = export_walls(&self.grid, &self.config, &mut self.wall_counter);
    }

    /// Exported wall volumes, in cell-major N, S, E, W order
    pub fn export_geometry(&self) -> &[WallVolume] {
        &self.walls
    }

    /// Wall boxes for collision queries
    pub fn obstacles(&self) -> Vec<AABB> {
        self.walls.iter().map(WallVolume::aabb).collect()
    }

    pub fn wall_names(&self) -> Vec<String> {
        self.walls.iter().map(WallVolume::name).collect()
    }

    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    pub fn summary(&self) -> MazeSummary {
        MazeSummary {
            width: self.grid.width(),
            height: self.grid.height(),
            wall_count: self.wall_count(),
            entrances_opened: self.entrances_opened,
            seed: self.rng.seed(),
        }
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn view(&self) -> MazeView<'_> {
        MazeView::new(&self.grid, self.config.cell_size)
    }

    /// Borrow the grid view and the shared stream at the same time, so
    /// gameplay draws continue the generation sequence.
    pub fn split_mut(&mut self) -> (MazeView<'_>, &mut MazeRng) {
        (MazeView::new(&self.grid, self.config.cell_size), &mut self.rng)
    }

    pub fn rng_mut(&mut self) -> &mut MazeRng {
        &mut self.rng
    }

    pub fn cell_to_world_coords(&self, x: i32, y: i32) -> (f32, f32) {
        self.view().cell_to_world_coords(CellCoord::new(x, y))
    }

    pub fn is_valid_position(&self, x: i32, y: i32) -> bool {
        self.grid.is_valid_position(CellCoord::new(x, y))
    }

    pub fn valid_positions(&self) -> Vec<CellCoord> {
        self.grid.valid_positions()
    }

    pub fn valid_neighbors(&self, x: i32, y: i32) -> Vec<CellCoord> {
        self.grid.valid_neighbors(CellCoord::new(x, y))
    }

    /// Write the grid as a P3 image
    pub fn write_ppm<W: Write>(&self, out: W) -> Result<()> {
        ppm::write_ppm(&self.grid, out)?;
        Ok(())
    }

    pub fn save_ppm(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        self.write_ppm(BufWriter::new(file))?;
        info!("Maze image written to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walls::WallExport;
    use approx::assert_relative_eq;

    fn generated(width: usize, height: usize, seed: u64) -> MazeGenerator {
        let mut maze = MazeGenerator::new(width, height, Some(seed)).unwrap();
        maze.generate_maze();
        maze
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            MazeGenerator::new(0, 5, Some(1)),
            Err(MazeError::InvalidDimensions { width: 0, height: 5 })
        ));
        assert!(MazeGenerator::new(5, 0, None).is_err());
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        let huge = i32::MAX as usize + 1;
        assert!(matches!(
            MazeGenerator::new(huge, 4, Some(1)),
            Err(MazeError::InvalidDimensions { .. })
        ));
        assert!(MazeGenerator::new(4, MAX_DIMENSION + 1, Some(1)).is_err());
        assert!(MazeGenerator::new(MAX_DIMENSION, 1, Some(1)).is_ok());
    }

    #[test]
    fn test_spanning_tree_visits_everything() {
        let mut maze = MazeGenerator::new(7, 5, Some(3)).unwrap();
        maze.carve_spanning_tree();

        let grid = maze.grid();
        assert!(grid.cells().all(|c| c.visited));
        assert_eq!(grid.open_edge_count(), 7 * 5 - 1);
        assert_eq!(grid.reachable_count(grid.center()), 35);
        assert!(grid.is_symmetric());
    }

    #[test]
    fn test_single_cell_maze() {
        let mut maze = MazeGenerator::new(1, 1, Some(9)).unwrap();
        maze.carve_spanning_tree();
        assert_eq!(maze.grid().open_edge_count(), 0);

        // Every entrance index is 0 on a 1x1 grid, so nothing opens
        assert_eq!(maze.carve_entrances(), 0);
        maze.export_walls();
        assert_eq!(maze.wall_count(), 4);
        assert!(maze.valid_positions().is_empty());
    }

    #[test]
    fn test_entrances_only_open_border_flags() {
        let mut maze = MazeGenerator::new(6, 6, Some(11)).unwrap();
        maze.carve_spanning_tree();
        let before = maze.grid().clone();
        let opened = maze.carve_entrances();

        assert!(opened <= 16);
        assert_eq!(maze.grid().open_edge_count(), before.open_edge_count());
        for (old, new) in before.cells().zip(maze.grid().cells()) {
            for dir in Direction::ALL {
                // Never closes a wall
                if !old.has_wall(dir) {
                    assert!(!new.has_wall(dir));
                }
            }
        }
        // Index 0 on each side stays closed
        let corner = maze.grid().cell(CellCoord::new(0, 0)).unwrap();
        assert!(corner.has_wall(Direction::North));
        assert!(corner.has_wall(Direction::West));
    }

    #[test]
    fn test_wall_count_matches_flags() {
        let maze = generated(8, 6, 21);
        let cells = 8 * 6;
        let expected = 4 * cells - 2 * (cells - 1) - maze.summary().entrances_opened;
        assert_eq!(maze.wall_count(), expected);
        assert_eq!(maze.wall_names().len(), expected);
    }

    #[test]
    fn test_deduplicated_wall_count() {
        let config = MazeConfig::default().with_wall_export(WallExport::Deduplicated);
        let mut maze = MazeGenerator::with_config(8, 6, Some(21), config).unwrap();
        maze.generate_maze();

        let cells = 8 * 6;
        let edges = 2 * 8 * 6 + 8 + 6;
        let expected = edges - (cells - 1) - maze.summary().entrances_opened;
        assert_eq!(maze.wall_count(), expected);
    }

    #[test]
    fn test_same_seed_same_walls() {
        let a = generated(12, 9, 1234);
        let b = generated(12, 9, 1234);
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.export_geometry(), b.export_geometry());
        assert_eq!(a.wall_names(), b.wall_names());
    }

    #[test]
    fn test_wall_ids_unique_and_increasing() {
        let mut maze = generated(5, 5, 2);
        let ids: Vec<u32> = maze.export_geometry().iter().map(|w| w.id).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(maze.wall_names()[0], "wall_1");

        let last = *ids.last().unwrap();
        maze.export_walls();
        assert_eq!(maze.export_geometry()[0].id, last + 1);
    }

    #[test]
    fn test_world_coords() {
        let maze = generated(4, 4, 5);
        assert_eq!(maze.cell_to_world_coords(3, 1), (6.0, 2.0));
        assert_eq!(maze.view().cell_center(CellCoord::new(1, 2)), Vec3::new(2.0, 0.0, 4.0));
    }

    #[test]
    fn test_world_coords_scale_with_cell_size() {
        let config = MazeConfig::default().with_cell_size(1.1);
        let maze = MazeGenerator::with_config(4, 4, Some(5), config).unwrap();

        let (x, z) = maze.cell_to_world_coords(3, 2);
        assert_relative_eq!(x, 3.3, epsilon = 1e-5);
        assert_relative_eq!(z, 2.2, epsilon = 1e-5);
    }

    #[test]
    fn test_neighbors_are_mutual_after_generation() {
        let maze = generated(10, 10, 77);
        for coord in maze.valid_positions() {
            for next in maze.valid_neighbors(coord.x, coord.y) {
                assert!(maze.is_valid_position(next.x, next.y));
                let back = maze.valid_neighbors(next.x, next.y);
                assert!(back.contains(&coord));
            }
        }
    }

    #[test]
    fn test_summary() {
        let maze = generated(20, 20, 42);
        let summary = maze.summary();
        assert_eq!((summary.width, summary.height, summary.seed), (20, 20, 42));
        assert_eq!(summary.wall_count, maze.wall_count());
        assert!(summary.to_string().contains("20x20"));
    }

    #[test]
    fn test_split_mut_shares_stream() {
        let mut a = generated(6, 6, 8);
        let mut b = generated(6, 6, 8);
        let (_, rng) = a.split_mut();
        let x: u32 = rng.gen();
        let y: u32 = b.rng_mut().gen();
        assert_eq!(x, y);
    }
}
