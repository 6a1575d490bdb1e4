//! Plain-text (P3) maze image dump
//!
//! Each cell is a 10x10 pixel block. Border pixels whose wall flag is set are
//! black, everything else is white. A corner pixel is black if either of the
//! two edges meeting there still has its wall.

use crate::cell::{CellCoord, CellGrid, Direction};
use std::io::{self, Write};

/// Pixels per cell edge
pub const CELL_PIXELS: usize = 10;

const WALL_RGB: &str = "0 0 0";
const PATH_RGB: &str = "255 255 255";

pub fn write_ppm<W: Write>(grid: &CellGrid, mut out: W) -> io::Result<()> {
    let image_width = grid.width() * CELL_PIXELS;
    let image_height = grid.height() * CELL_PIXELS;

    writeln!(out, "P3")?;
    writeln!(out, "{} {}", image_width, image_height)?;
    writeln!(out, "255")?;

    for py in 0..image_height {
        for px in 0..image_width {
            let coord = CellCoord::new((px / CELL_PIXELS) as i32, (py / CELL_PIXELS) as i32);
            let rgb = if is_wall_pixel(grid, coord, px % CELL_PIXELS, py % CELL_PIXELS) {
                WALL_RGB
            } else {
                PATH_RGB
            };
            write!(out, "{} ", rgb)?;
        }
        writeln!(out)?;
    }

    out.flush()
}

fn is_wall_pixel(grid: &CellGrid, coord: CellCoord, px: usize, py: usize) -> bool {
    let Some(cell) = grid.cell(coord) else {
        return false;
    };
    let last = CELL_PIXELS - 1;

    (py == 0 && cell.has_wall(Direction::North))
        || (py == last && cell.has_wall(Direction::South))
        || (px == 0 && cell.has_wall(Direction::West))
        || (px == last && cell.has_wall(Direction::East))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(grid: &CellGrid) -> String {
        let mut buf = Vec::new();
        write_ppm(grid, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_header_and_size() {
        let grid = CellGrid::new(3, 2);
        let text = render(&grid);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("P3"));
        assert_eq!(lines.next(), Some("30 20"));
        assert_eq!(lines.next(), Some("255"));

        let rows: Vec<&str> = lines.collect();
        assert_eq!(rows.len(), 20);
        assert_eq!(rows[0].split_whitespace().count(), 30 * 3);
    }

    #[test]
    fn test_closed_cell_outline() {
        let grid = CellGrid::new(1, 1);
        let text = render(&grid);
        let rows: Vec<Vec<u32>> = text
            .lines()
            .skip(3)
            .map(|row| row.split_whitespace().map(|v| v.parse().unwrap()).collect())
            .collect();

        // Top row entirely black, interior pixel white, left edge black
        assert!(rows[0].iter().all(|&v| v == 0));
        assert_eq!(&rows[5][15..18], &[255, 255, 255]);
        assert_eq!(&rows[5][0..3], &[0, 0, 0]);
    }

    #[test]
    fn test_open_wall_is_white() {
        let mut grid = CellGrid::new(1, 1);
        grid.open_wall(CellCoord::new(0, 0), Direction::North);
        let text = render(&grid);
        let top = text.lines().nth(3).unwrap();
        assert!(top.split_whitespace().skip(3).take(24).all(|v| v == "255"));
    }

    #[test]
    fn test_corner_keeps_standing_side_wall() {
        let mut grid = CellGrid::new(1, 1);
        grid.open_wall(CellCoord::new(0, 0), Direction::North);
        grid.open_wall(CellCoord::new(0, 0), Direction::South);
        let text = render(&grid);
        let rows: Vec<Vec<&str>> = text
            .lines()
            .skip(3)
            .map(|row| row.split_whitespace().collect())
            .collect();

        // West and east still stand, so all four corners stay black
        let last = (CELL_PIXELS - 1) * 3;
        for row in [0, CELL_PIXELS - 1] {
            assert_eq!(&rows[row][0..3], &["0", "0", "0"]);
            assert_eq!(&rows[row][last..last + 3], &["0", "0", "0"]);
            assert_eq!(&rows[row][15..18], &["255", "255", "255"]);
        }
    }

    #[test]
    fn test_fully_open_cell_is_white() {
        let mut grid = CellGrid::new(1, 1);
        for dir in Direction::ALL {
            grid.open_wall(CellCoord::new(0, 0), dir);
        }
        let text = render(&grid);
        assert!(text.lines().skip(3).flat_map(str::split_whitespace).all(|v| v == "255"));
    }
}
