//! Grid primitives: cell types, bounds-checked coordinates, and Bresenham
//! line rasterization shared by the environment, planners, and SLAM.

use serde::{Deserialize, Serialize};

/// Type of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellType {
    Free,
    Obstacle,
    Cliff,
    Dock,
    Dirty,
}

impl CellType {
    pub fn is_traversable(self) -> bool {
        matches!(self, CellType::Free | CellType::Dock | CellType::Dirty)
    }

    pub fn is_blocking(self) -> bool {
        matches!(self, CellType::Obstacle | CellType::Cliff)
    }
}

/// Integer grid coordinate. `y` increases downward, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for GridPos {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// A fixed-size rectangular array of cells with defined out-of-bounds
/// semantics: reads return `Obstacle`, writes are silently ignored.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellType>,
}

impl Grid {
    pub fn new(width: usize, height: usize, fill: CellType) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn get(&self, x: i32, y: i32) -> CellType {
        if !self.in_bounds(x, y) {
            return CellType::Obstacle;
        }
        self.cells[y as usize * self.width + x as usize]
    }

    pub fn set(&mut self, x: i32, y: i32, cell: CellType) {
        if !self.in_bounds(x, y) {
            return;
        }
        self.cells[y as usize * self.width + x as usize] = cell;
    }

    pub fn is_valid_position(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), CellType::Free | CellType::Dock | CellType::Dirty)
    }

    /// Iterate all (x, y) cells in row-major order.
    pub fn iter_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let width = self.width;
        let height = self.height;
        (0..height).flat_map(move |y| (0..width).map(move |x| (x as i32, y as i32)))
    }
}

/// Bresenham's line algorithm, inclusive of both endpoints.
pub fn bresenham_line(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
    let mut cells = Vec::new();

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        cells.push((x, y));

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;

        if e2 > -dy {
            err -= dy;
            x += sx;
        }

        if e2 < dx {
            err += dx;
            y += sy;
        }
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_reads_as_obstacle() {
        let grid = Grid::new(5, 5, CellType::Free);
        assert_eq!(grid.get(-1, 0), CellType::Obstacle);
        assert_eq!(grid.get(0, -1), CellType::Obstacle);
        assert_eq!(grid.get(5, 0), CellType::Obstacle);
        assert_eq!(grid.get(0, 5), CellType::Obstacle);
    }

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut grid = Grid::new(3, 3, CellType::Free);
        grid.set(10, 10, CellType::Obstacle);
        assert_eq!(grid.get(1, 1), CellType::Free);
    }

    #[test]
    fn set_and_get_roundtrip() {
        let mut grid = Grid::new(3, 3, CellType::Free);
        grid.set(1, 1, CellType::Obstacle);
        assert_eq!(grid.get(1, 1), CellType::Obstacle);
    }

    #[test]
    fn is_valid_position_excludes_obstacle_and_cliff() {
        let mut grid = Grid::new(3, 3, CellType::Free);
        grid.set(0, 0, CellType::Obstacle);
        grid.set(1, 0, CellType::Cliff);
        grid.set(2, 0, CellType::Dock);
        assert!(!grid.is_valid_position(0, 0));
        assert!(!grid.is_valid_position(1, 0));
        assert!(grid.is_valid_position(2, 0));
        assert!(grid.is_valid_position(2, 2));
    }

    #[test]
    fn bresenham_horizontal_line() {
        let line = bresenham_line(0, 0, 4, 0);
        assert_eq!(line, vec![(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);
    }

    #[test]
    fn bresenham_diagonal_line() {
        let line = bresenham_line(0, 0, 3, 3);
        assert_eq!(line, vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn bresenham_single_point() {
        let line = bresenham_line(2, 2, 2, 2);
        assert_eq!(line, vec![(2, 2)]);
    }
}
