//! Wall-following coverage planner, right-hand rule.

use crate::grid::Grid;
use std::collections::HashSet;

const DIRECTIONS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

pub fn follow_wall(grid: &Grid, start: (i32, i32), max_steps: u32) -> Vec<(i32, i32)> {
    let mut path = vec![start];
    let (mut x, mut y) = start;
    let mut direction_idx: usize = 0;
    let mut visited: HashSet<(i32, i32)> = HashSet::from([start]);

    for _ in 0..max_steps {
        let right_direction = (direction_idx + 1) % 4;
        let (dx, dy) = DIRECTIONS[right_direction];
        let (right_x, right_y) = (x + dx, y + dy);

        if grid.is_valid_position(right_x, right_y) {
            x = right_x;
            y = right_y;
            direction_idx = right_direction;
        } else {
            let (dx, dy) = DIRECTIONS[direction_idx];
            let (forward_x, forward_y) = (x + dx, y + dy);

            if grid.is_valid_position(forward_x, forward_y) {
                x = forward_x;
                y = forward_y;
            } else {
                direction_idx = (direction_idx + 3) % 4;
                continue;
            }
        }

        if visited.insert((x, y)) {
            path.push((x, y));
        }

        if (x, y) == start && path.len() > 10 {
            break;
        }
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellType;

    #[test]
    fn wall_follow_stays_on_traversable_cells() {
        let mut grid = Grid::new(10, 10, CellType::Free);
        for i in 0..10 {
            grid.set(0, i, CellType::Obstacle);
            grid.set(9, i, CellType::Obstacle);
            grid.set(i, 0, CellType::Obstacle);
            grid.set(i, 9, CellType::Obstacle);
        }
        let path = follow_wall(&grid, (1, 1), 200);
        assert!(path.iter().all(|&(x, y)| grid.is_valid_position(x, y)));
        assert!(path.len() > 10);
    }

    #[test]
    fn wall_follow_respects_max_steps_budget() {
        let grid = Grid::new(10, 10, CellType::Free);
        let path = follow_wall(&grid, (5, 5), 3);
        assert!(path.len() <= 4);
    }
}
