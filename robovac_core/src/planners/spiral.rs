//! Spiral coverage planner.

use crate::grid::Grid;

/// Generate an outward spiral path starting at `start`. Non-traversable
/// cells are skipped but still advance the abstract spiral index.
pub fn generate_spiral_path(grid: &Grid, start: (i32, i32), max_radius: Option<i32>) -> Vec<(i32, i32)> {
    let max_radius = max_radius.unwrap_or_else(|| grid.width().max(grid.height()) as i32);

    let mut path = vec![start];
    let (mut x, mut y) = start;

    let (mut dx, mut dy) = (1, 0);
    let mut steps_in_direction = 1;
    let mut steps_taken = 0;
    let mut direction_changes = 0;

    for _ in 0..(max_radius as i64 * max_radius as i64) {
        x += dx;
        y += dy;

        if grid.is_valid_position(x, y) {
            path.push((x, y));
        }

        steps_taken += 1;

        if steps_taken == steps_in_direction {
            steps_taken = 0;
            direction_changes += 1;

            let (ndx, ndy) = (-dy, dx);
            dx = ndx;
            dy = ndy;

            if direction_changes % 2 == 0 {
                steps_in_direction += 1;
            }
        }

        if (x - start.0).abs() > max_radius && (y - start.1).abs() > max_radius {
            break;
        }
    }

    path
}
