//! Zigzag (boustrophedon) coverage planner.

use crate::grid::Grid;

/// Sweep the grid row-by-row (or column-by-column), alternating direction,
/// emitting every traversable cell. `start` is unused by the sweep itself
/// (the full grid is always covered) but kept in the signature to mirror
/// the other coverage planners' shared entry point.
pub fn generate_zigzag_path(grid: &Grid, _start: (i32, i32), horizontal: bool) -> Vec<(i32, i32)> {
    let width = grid.width() as i32;
    let height = grid.height() as i32;
    let mut path = Vec::new();

    if horizontal {
        for y in 0..height {
            if y % 2 == 0 {
                for x in 0..width {
                    if grid.is_valid_position(x, y) {
                        path.push((x, y));
                    }
                }
            } else {
                for x in (0..width).rev() {
                    if grid.is_valid_position(x, y) {
                        path.push((x, y));
                    }
                }
            }
        }
    } else {
        for x in 0..width {
            if x % 2 == 0 {
                for y in 0..height {
                    if grid.is_valid_position(x, y) {
                        path.push((x, y));
                    }
                }
            } else {
                for y in (0..height).rev() {
                    if grid.is_valid_position(x, y) {
                        path.push((x, y));
                    }
                }
            }
        }
    }

    path
}
