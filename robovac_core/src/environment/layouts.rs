//! Predefined layout generators. Dimensions and obstacle placement
//! are bit-exact with the distilled system's generators so round-trip
//! tests over a fixed seed are meaningful.

use crate::grid::{CellType, Grid};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Closed set of recognized room-layout generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomType {
    Empty,
    Furnished,
    MultiRoom,
    Corridor,
    ObstacleCourse,
    StairsTest,
}

impl RoomType {
    pub fn as_str(self) -> &'static str {
        match self {
            RoomType::Empty => "empty",
            RoomType::Furnished => "furnished",
            RoomType::MultiRoom => "multi_room",
            RoomType::Corridor => "corridor",
            RoomType::ObstacleCourse => "obstacle_course",
            RoomType::StairsTest => "stairs_test",
        }
    }

    pub fn all() -> &'static [RoomType] {
        &[
            RoomType::Empty,
            RoomType::Furnished,
            RoomType::MultiRoom,
            RoomType::Corridor,
            RoomType::ObstacleCourse,
            RoomType::StairsTest,
        ]
    }
}

pub fn generate(room_type: RoomType, rng: &mut ChaCha8Rng) -> Grid {
    match room_type {
        RoomType::Empty => empty_room(50, 50),
        RoomType::Furnished => room_with_furniture(50, 50, 5, rng),
        RoomType::MultiRoom => multi_room(80, 60, rng),
        RoomType::Corridor => narrow_corridor(60, 8, rng),
        RoomType::ObstacleCourse => obstacle_course(60, 60),
        RoomType::StairsTest => stairs_test(50, 50),
    }
}

fn fill_rect(grid: &mut Grid, x0: i32, x1: i32, y0: i32, y1: i32, cell: CellType) {
    for y in y0..y1 {
        for x in x0..x1 {
            grid.set(x, y, cell);
        }
    }
}

fn empty_room(width: usize, height: usize) -> Grid {
    let mut grid = Grid::new(width, height, CellType::Free);
    let w = width as i32;
    let h = height as i32;
    fill_rect(&mut grid, 0, w, 0, 1, CellType::Obstacle);
    fill_rect(&mut grid, 0, w, h - 1, h, CellType::Obstacle);
    fill_rect(&mut grid, 0, 1, 0, h, CellType::Obstacle);
    fill_rect(&mut grid, w - 1, w, 0, h, CellType::Obstacle);
    grid
}

fn room_with_furniture(width: usize, height: usize, num_obstacles: usize, rng: &mut ChaCha8Rng) -> Grid {
    let mut grid = empty_room(width, height);
    let w = width as i32;
    let h = height as i32;

    for _ in 0..num_obstacles {
        let furn_width = rng.gen_range(2..6);
        let furn_height = rng.gen_range(2..6);
        let x = rng.gen_range(5..(w - furn_width - 5));
        let y = rng.gen_range(5..(h - furn_height - 5));
        fill_rect(&mut grid, x, x + furn_width, y, y + furn_height, CellType::Obstacle);
    }

    grid
}

fn multi_room(width: usize, height: usize, rng: &mut ChaCha8Rng) -> Grid {
    let mut grid = empty_room(width, height);
    let w = width as i32;
    let h = height as i32;
    let mid_x = w / 2;
    let mid_y = h / 2;

    fill_rect(&mut grid, 5, w - 5, mid_y, mid_y + 1, CellType::Obstacle);
    let doorway_x = mid_x + rng.gen_range(-5..6);
    fill_rect(&mut grid, doorway_x - 2, doorway_x + 2, mid_y, mid_y + 1, CellType::Free);

    fill_rect(&mut grid, mid_x, mid_x + 1, 5, h - 5, CellType::Obstacle);
    let doorway_y = mid_y + rng.gen_range(-5..6);
    fill_rect(&mut grid, mid_x, mid_x + 1, doorway_y - 2, doorway_y + 2, CellType::Free);

    let centers = [
        (mid_x / 2, mid_y / 2),
        (mid_x + mid_x / 2, mid_y / 2),
        (mid_x / 2, mid_y + mid_y / 2),
        (mid_x + mid_x / 2, mid_y + mid_y / 2),
    ];
    for (room_x, room_y) in centers {
        fill_rect(&mut grid, room_x - 1, room_x + 2, room_y - 1, room_y + 2, CellType::Obstacle);
    }

    grid
}

fn narrow_corridor(length: usize, width: usize, rng: &mut ChaCha8Rng) -> Grid {
    // Matches the source's `create_narrow_corridor(length, width)`: the
    // resulting grid is `length` cells wide and `width` cells tall.
    let mut grid = Grid::new(length, width, CellType::Obstacle);
    let l = length as i32;
    let w = width as i32;

    let corridor_start = 1;
    let corridor_end = w - 1;
    fill_rect(&mut grid, 1, l - 1, corridor_start, corridor_end, CellType::Free);

    for _ in 0..5 {
        let x = rng.gen_range(5..(l - 5));
        let y = corridor_start + rng.gen_range(0..(corridor_end - corridor_start));
        grid.set(x, y, CellType::Obstacle);
    }

    grid
}

fn obstacle_course(width: usize, height: usize) -> Grid {
    let mut grid = empty_room(width, height);
    let w = width as i32;
    let h = height as i32;

    // L-shaped obstacle.
    fill_rect(&mut grid, 10, 15, 10, 20, CellType::Obstacle);
    fill_rect(&mut grid, 10, 20, 15, 20, CellType::Obstacle);

    // U-shaped obstacle.
    fill_rect(&mut grid, 25, 28, 25, 35, CellType::Obstacle);
    fill_rect(&mut grid, 35, 38, 25, 35, CellType::Obstacle);
    fill_rect(&mut grid, 25, 38, 32, 35, CellType::Obstacle);

    // Scattered 4x4 blocks.
    for (x, y) in [(15, 30), (30, 15), (40, 40), (20, 45), (45, 20)] {
        fill_rect(&mut grid, x - 2, x + 2, y - 2, y + 2, CellType::Obstacle);
    }

    // Narrow passage with a central gap.
    fill_rect(&mut grid, 5, w - 10, h / 2 - 1, h / 2 + 2, CellType::Obstacle);
    fill_rect(&mut grid, w / 2 - 2, w / 2 + 2, h / 2, h / 2 + 1, CellType::Free);

    grid
}

fn stairs_test(width: usize, height: usize) -> Grid {
    let mut grid = empty_room(width, height);
    let w = width as i32;
    let h = height as i32;

    fill_rect(&mut grid, 10, w - 10, h / 3, h / 3 + 5, CellType::Cliff);
    fill_rect(&mut grid, 10, w - 10, 2 * h / 3, 2 * h / 3 + 5, CellType::Cliff);

    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn empty_room_dimensions_and_border() {
        let grid = empty_room(50, 50);
        assert_eq!(grid.width(), 50);
        assert_eq!(grid.height(), 50);
        for x in 0..50 {
            assert_eq!(grid.get(x, 0), CellType::Obstacle);
            assert_eq!(grid.get(x, 49), CellType::Obstacle);
        }
        assert_eq!(grid.get(25, 25), CellType::Free);
    }

    #[test]
    fn furnished_room_dimensions() {
        let grid = room_with_furniture(50, 50, 5, &mut rng());
        assert_eq!(grid.width(), 50);
        assert_eq!(grid.height(), 50);
    }

    #[test]
    fn multi_room_dimensions_and_doorways_free() {
        let grid = multi_room(80, 60, &mut rng());
        assert_eq!(grid.width(), 80);
        assert_eq!(grid.height(), 60);
        // The doorway center cell is always punched free regardless of the
        // randomized offset (offset range is ±5, gap half-width 2).
        assert_eq!(grid.get(40, 30), CellType::Free);
    }

    #[test]
    fn corridor_dimensions() {
        let grid = narrow_corridor(60, 8, &mut rng());
        assert_eq!(grid.width(), 60);
        assert_eq!(grid.height(), 8);
        assert_eq!(grid.get(30, 3), CellType::Free);
    }

    #[test]
    fn obstacle_course_dimensions_and_gap() {
        let grid = obstacle_course(60, 60);
        assert_eq!(grid.width(), 60);
        assert_eq!(grid.height(), 60);
        assert_eq!(grid.get(30, 30), CellType::Free);
    }

    #[test]
    fn stairs_test_has_two_cliff_bands() {
        let grid = stairs_test(50, 50);
        assert_eq!(grid.get(20, 50 / 3), CellType::Cliff);
        assert_eq!(grid.get(20, 2 * 50 / 3), CellType::Cliff);
    }
}
