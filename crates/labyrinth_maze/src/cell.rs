//! Maze connectivity grid
//!
//! Cells are stored row-major. Each cell carries four wall flags indexed by
//! [`Direction`]; an edge between two neighbours is open when both sides
//! have their matching flag cleared. Flags only ever go from closed to open,
//! and only while the maze is being generated.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One of the four grid directions, in wall-flag order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// All directions in wall-flag (and neighbour enumeration) order
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Index into [`Cell::walls`]
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
        }
    }

    /// Grid step. North is -y, which maps to -Z in world space.
    #[inline]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    #[inline]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }
}

/// Integer cell coordinate; may point outside the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CellCoord {
    pub x: i32,
    pub y: i32,
}

impl CellCoord {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Coordinate one step away in `dir`, without bounds checking
    #[inline]
    pub const fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.offset();
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(i32, i32)> for CellCoord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// A single grid cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub visited: bool,
    /// Wall flags in [`Direction::ALL`] order; `true` means standing
    pub walls: [bool; 4],
}

impl Cell {
    fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            visited: false,
            walls: [true; 4],
        }
    }

    #[inline]
    pub fn has_wall(&self, dir: Direction) -> bool {
        self.walls[dir.index()]
    }

    /// True if at least one wall has been removed
    #[inline]
    pub fn has_opening(&self) -> bool {
        self.walls.iter().any(|&wall| !wall)
    }
}

/// Largest accepted width or height; keeps `width * height` within `i32`
pub const MAX_DIMENSION: usize = 1 << 15;

/// Rectangular grid of cells with fixed dimensions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellGrid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl CellGrid {
    /// Fresh grid with every wall standing and nothing visited.
    ///
    /// Callers guarantee both dimensions lie in `1..=MAX_DIMENSION`.
    pub fn new(width: usize, height: usize) -> Self {
        let (width, height) = (width as i32, height as i32);
        let mut cells = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell::new(x, y));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width as usize
    }

    pub fn height(&self) -> usize {
        self.height as usize
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The generation start cell, `(width / 2, height / 2)`
    pub fn center(&self) -> CellCoord {
        CellCoord::new(self.width / 2, self.height / 2)
    }

    #[inline]
    pub fn contains(&self, coord: CellCoord) -> bool {
        coord.x >= 0 && coord.x < self.width && coord.y >= 0 && coord.y < self.height
    }

    #[inline]
    fn index(&self, coord: CellCoord) -> usize {
        (coord.y * self.width + coord.x) as usize
    }

    pub fn cell(&self, coord: CellCoord) -> Option<&Cell> {
        if self.contains(coord) {
            Some(&self.cells[self.index(coord)])
        } else {
            None
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// In-bounds neighbour of `coord` in `dir`
    #[inline]
    pub fn neighbor(&self, coord: CellCoord, dir: Direction) -> Option<CellCoord> {
        let next = coord.step(dir);
        self.contains(next).then_some(next)
    }

    pub fn is_visited(&self, coord: CellCoord) -> bool {
        self.cell(coord).is_some_and(|cell| cell.visited)
    }

    pub(crate) fn mark_visited(&mut self, coord: CellCoord) {
        let idx = self.index(coord);
        self.cells[idx].visited = true;
    }

    /// Remove the wall between `from` and its neighbour in `dir`.
    ///
    /// Only called with directions produced by neighbour enumeration, so the
    /// neighbour is always in bounds.
    pub(crate) fn carve(&mut self, from: CellCoord, dir: Direction) {
        let to = from.step(dir);
        let (a, b) = (self.index(from), self.index(to));
        self.cells[a].walls[dir.index()] = false;
        self.cells[b].walls[dir.opposite().index()] = false;
    }

    /// Clear a single wall flag on a border cell. Returns true if the wall
    /// was standing.
    pub(crate) fn open_wall(&mut self, coord: CellCoord, dir: Direction) -> bool {
        let idx = self.index(coord);
        let flag = &mut self.cells[idx].walls[dir.index()];
        std::mem::replace(flag, false)
    }

    /// True if `coord` is in bounds and the wall on side `dir` is gone
    pub fn is_open(&self, coord: CellCoord, dir: Direction) -> bool {
        self.cell(coord).is_some_and(|cell| !cell.has_wall(dir))
    }

    /// In bounds and at least one wall flag cleared
    pub fn is_valid_position(&self, coord: CellCoord) -> bool {
        self.cell(coord).is_some_and(Cell::has_opening)
    }

    /// Every cell satisfying [`Self::is_valid_position`], row-major
    pub fn valid_positions(&self) -> Vec<CellCoord> {
        self.cells
            .iter()
            .filter(|cell| cell.has_opening())
            .map(|cell| CellCoord::new(cell.x, cell.y))
            .collect()
    }

    /// In-bounds neighbours reachable from `coord` through an open wall,
    /// in [`Direction::ALL`] order
    pub fn valid_neighbors(&self, coord: CellCoord) -> Vec<CellCoord> {
        let Some(cell) = self.cell(coord) else {
            return Vec::new();
        };
        Direction::ALL
            .iter()
            .filter(|&&dir| !cell.has_wall(dir))
            .map(|&dir| coord.step(dir))
            .filter(|&next| self.is_valid_position(next))
            .collect()
    }

    /// Interior edges open on both sides, each counted once
    pub fn open_edge_count(&self) -> usize {
        self.cells
            .iter()
            .map(|cell| {
                let here = CellCoord::new(cell.x, cell.y);
                [Direction::South, Direction::East]
                    .into_iter()
                    .filter(|&dir| {
                        self.neighbor(here, dir).is_some()
                            && !cell.has_wall(dir)
                            && self.is_open(here.step(dir), dir.opposite())
                    })
                    .count()
            })
            .sum()
    }

    /// Number of cells reachable from `start` through open interior edges
    pub fn reachable_count(&self, start: CellCoord) -> usize {
        if !self.contains(start) {
            return 0;
        }
        let mut seen = vec![false; self.cells.len()];
        let mut queue = VecDeque::new();
        seen[self.index(start)] = true;
        queue.push_back(start);
        let mut count = 0;

        while let Some(here) = queue.pop_front() {
            count += 1;
            for next in self.valid_neighbors(here) {
                let idx = self.index(next);
                if !seen[idx] {
                    seen[idx] = true;
                    queue.push_back(next);
                }
            }
        }
        count
    }

    /// True if every open flag has a matching open flag on the other side.
    /// Border flags have no partner and are ignored.
    pub fn is_symmetric(&self) -> bool {
        self.cells.iter().all(|cell| {
            let here = CellCoord::new(cell.x, cell.y);
            Direction::ALL.iter().all(|&dir| match self.neighbor(here, dir) {
                Some(next) => self.is_open(here, dir) == self.is_open(next, dir.opposite()),
                None => true,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_closed() {
        let grid = CellGrid::new(3, 2);
        assert_eq!(grid.len(), 6);
        assert!(grid.cells().all(|c| c.walls == [true; 4] && !c.visited));
        assert!(grid.valid_positions().is_empty());
        assert_eq!(grid.center(), CellCoord::new(1, 1));
    }

    #[test]
    fn test_cell_coordinates_match_layout() {
        let grid = CellGrid::new(4, 3);
        let cell = grid.cell(CellCoord::new(3, 2)).unwrap();
        assert_eq!((cell.x, cell.y), (3, 2));
        assert!(grid.cell(CellCoord::new(4, 0)).is_none());
        assert!(grid.cell(CellCoord::new(0, -1)).is_none());
    }

    #[test]
    fn test_carve_clears_both_sides() {
        let mut grid = CellGrid::new(2, 2);
        let origin = CellCoord::new(0, 0);
        grid.carve(origin, Direction::South);

        assert!(!grid.cell(origin).unwrap().has_wall(Direction::South));
        assert!(!grid.cell(CellCoord::new(0, 1)).unwrap().has_wall(Direction::North));
        assert!(grid.is_symmetric());
        assert_eq!(grid.open_edge_count(), 1);
    }

    #[test]
    fn test_valid_neighbors_follow_open_walls() {
        let mut grid = CellGrid::new(3, 3);
        let mid = CellCoord::new(1, 1);
        grid.carve(mid, Direction::East);
        grid.carve(mid, Direction::North);

        let neighbors = grid.valid_neighbors(mid);
        assert_eq!(neighbors, vec![CellCoord::new(1, 0), CellCoord::new(2, 1)]);
        assert_eq!(grid.valid_neighbors(CellCoord::new(2, 1)), vec![mid]);
        assert!(grid.valid_neighbors(CellCoord::new(0, 0)).is_empty());
        assert!(grid.valid_neighbors(CellCoord::new(-1, 5)).is_empty());
    }

    #[test]
    fn test_open_border_wall_is_not_a_neighbor() {
        let mut grid = CellGrid::new(2, 1);
        let corner = CellCoord::new(1, 0);
        assert!(grid.open_wall(corner, Direction::East));
        assert!(!grid.open_wall(corner, Direction::East));

        assert!(grid.is_valid_position(corner));
        assert!(grid.valid_neighbors(corner).is_empty());
        assert!(grid.is_symmetric());
    }

    #[test]
    fn test_reachable_count() {
        let mut grid = CellGrid::new(3, 1);
        grid.carve(CellCoord::new(0, 0), Direction::East);
        assert_eq!(grid.reachable_count(CellCoord::new(0, 0)), 2);
        assert_eq!(grid.reachable_count(CellCoord::new(2, 0)), 1);
        assert_eq!(grid.reachable_count(CellCoord::new(3, 0)), 0);
    }

    #[test]
    fn test_direction_roundtrip() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            let (dx, dy) = dir.offset();
            let (ox, oy) = dir.opposite().offset();
            assert_eq!((dx + ox, dy + oy), (0, 0));
            assert_eq!(Direction::ALL[dir.index()], dir);
        }
    }
}
