//! Environment: the static map, the dirt bitmap, and simulated time.

mod layouts;

use crate::error::{SimError, SimResult};
use crate::grid::{CellType, Grid};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub use layouts::RoomType;

/// Snapshot of environment-level statistics, surfaced through the
/// `environment_info` query verb.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentStats {
    pub width: usize,
    pub height: usize,
    pub total_free_cells: usize,
    pub cleaned_free_cells: usize,
    pub sim_time: f64,
}

/// Owns the static map, the dirt bitmap, dock position, and sim-time.
#[derive(Debug, Clone)]
pub struct Environment {
    original: Grid,
    map: Grid,
    dirt: Vec<bool>,
    dock_position: Option<(i32, i32)>,
    sim_time: f64,
    tick_rate: f64,
    room_type: RoomType,
}

impl Environment {
    /// Build a predefined layout and place a dock.
    pub fn create(room_type: RoomType, rng: &mut ChaCha8Rng) -> Self {
        let map = layouts::generate(room_type, rng);
        let mut env = Self::from_map(map, room_type);
        let dock = env.find_dock_position(rng);
        env.place_dock(dock);
        env
    }

    fn from_map(map: Grid, room_type: RoomType) -> Self {
        let dirt = map
            .iter_positions()
            .map(|(x, y)| map.get(x, y) == CellType::Free)
            .collect();
        Self {
            original: map.clone(),
            map,
            dirt,
            dock_position: None,
            sim_time: 0.0,
            tick_rate: 1.0,
            room_type,
        }
    }

    fn find_dock_position(&self, rng: &mut ChaCha8Rng) -> (i32, i32) {
        use rand::seq::SliceRandom;

        let candidates: Vec<(i32, i32)> = self
            .map
            .iter_positions()
            .filter(|&(x, y)| {
                self.map.get(x, y) == CellType::Free
                    && [(0, -1), (0, 1), (-1, 0), (1, 0)]
                        .iter()
                        .any(|&(dx, dy)| self.map.get(x + dx, y + dy) == CellType::Obstacle)
            })
            .collect();

        if let Some(&pos) = candidates.choose(rng) {
            return pos;
        }

        let free: Vec<(i32, i32)> = self
            .map
            .iter_positions()
            .filter(|&(x, y)| self.map.get(x, y) == CellType::Free)
            .collect();
        if let Some(&pos) = free.choose(rng) {
            return pos;
        }

        (self.width() as i32 / 2, self.height() as i32 / 2)
    }

    fn place_dock(&mut self, pos: (i32, i32)) {
        self.map.set(pos.0, pos.1, CellType::Dock);
        self.original.set(pos.0, pos.1, CellType::Dock);
        self.dock_position = Some(pos);
    }

    pub fn width(&self) -> usize {
        self.map.width()
    }

    pub fn height(&self) -> usize {
        self.map.height()
    }

    pub fn room_type(&self) -> RoomType {
        self.room_type
    }

    pub fn dock_position(&self) -> Option<(i32, i32)> {
        self.dock_position
    }

    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn get_cell_type(&self, x: i32, y: i32) -> CellType {
        self.map.get(x, y)
    }

    /// Read-only access to the live map, for sensor rays and planners.
    pub fn grid(&self) -> &Grid {
        &self.map
    }

    pub fn is_valid_position(&self, x: i32, y: i32) -> bool {
        self.map.is_valid_position(x, y)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.map.in_bounds(x, y) {
            Some(y as usize * self.width() + x as usize)
        } else {
            None
        }
    }

    pub fn is_dirty(&self, x: i32, y: i32) -> bool {
        self.index(x, y).map(|i| self.dirt[i]).unwrap_or(false)
    }

    /// Mark a cell clean. Only free cells can carry dirt (invariant i);
    /// marking an obstacle/cliff/dock cell is a no-op.
    pub fn clean_cell(&mut self, x: i32, y: i32) {
        if let Some(i) = self.index(x, y) {
            self.dirt[i] = false;
        }
    }

    /// `cleaned free cells / total free cells`, 100% if there are none.
    pub fn cleaning_percentage(&self) -> f64 {
        let total = self.total_free_cells();
        if total == 0 {
            return 100.0;
        }
        let cleaned = total - self.dirty_free_cells();
        (cleaned as f64 / total as f64) * 100.0
    }

    fn total_free_cells(&self) -> usize {
        self.map
            .iter_positions()
            .filter(|&(x, y)| self.map.get(x, y) == CellType::Free)
            .count()
    }

    fn dirty_free_cells(&self) -> usize {
        self.map
            .iter_positions()
            .filter(|&(x, y)| self.map.get(x, y) == CellType::Free && self.is_dirty(x, y))
            .count()
    }

    pub fn step(&mut self, delta_time: Option<f64>) {
        self.sim_time += delta_time.unwrap_or(self.tick_rate);
    }

    /// Restore the original map's dirt state and reset sim-time. The
    /// static map itself is untouched (it is immutable post-construction).
    pub fn reset(&mut self) {
        self.map = self.original.clone();
        self.dirt = self
            .map
            .iter_positions()
            .map(|(x, y)| self.map.get(x, y) == CellType::Free)
            .collect();
        self.sim_time = 0.0;
    }

    pub fn statistics(&self) -> EnvironmentStats {
        EnvironmentStats {
            width: self.width(),
            height: self.height(),
            total_free_cells: self.total_free_cells(),
            cleaned_free_cells: self.total_free_cells() - self.dirty_free_cells(),
            sim_time: self.sim_time,
        }
    }
}

impl FromStr for RoomType {
    type Err = SimError;

    fn from_str(s: &str) -> SimResult<Self> {
        match s {
            "empty" => Ok(RoomType::Empty),
            "furnished" => Ok(RoomType::Furnished),
            "multi_room" => Ok(RoomType::MultiRoom),
            "corridor" => Ok(RoomType::Corridor),
            "obstacle_course" => Ok(RoomType::ObstacleCourse),
            "stairs_test" => Ok(RoomType::StairsTest),
            other => Err(SimError::InvalidRoomType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn empty_room_has_dock_and_is_traversable() {
        let env = Environment::create(RoomType::Empty, &mut rng());
        assert_eq!(env.width(), 50);
        assert_eq!(env.height(), 50);
        assert!(env.dock_position().is_some());
        let (dx, dy) = env.dock_position().unwrap();
        assert!(env.is_valid_position(dx, dy));
    }

    #[test]
    fn clean_cell_and_percentage() {
        let mut env = Environment::create(RoomType::Empty, &mut rng());
        let before = env.cleaning_percentage();
        // Interior free cell, away from border walls and dock.
        env.clean_cell(25, 25);
        assert!(env.cleaning_percentage() >= before);
    }

    #[test]
    fn reset_restores_dirt_and_time() {
        let mut env = Environment::create(RoomType::Empty, &mut rng());
        env.clean_cell(25, 25);
        env.step(Some(5.0));
        env.reset();
        assert_eq!(env.sim_time(), 0.0);
        assert!(env.is_dirty(25, 25));
    }

    #[test]
    fn cleaning_percentage_is_100_with_no_free_cells() {
        let map = Grid::new(2, 2, CellType::Obstacle);
        let env = Environment::from_map(map, RoomType::Empty);
        assert_eq!(env.cleaning_percentage(), 100.0);
    }

    #[test]
    fn obstacle_and_cliff_cells_are_never_dirty() {
        let env = Environment::create(RoomType::StairsTest, &mut rng());
        for (x, y) in env.map.iter_positions() {
            let cell = env.get_cell_type(x, y);
            if matches!(cell, CellType::Obstacle | CellType::Cliff) {
                assert!(!env.is_dirty(x, y));
            }
        }
    }

    #[test]
    fn room_type_parses_known_strings() {
        assert_eq!("empty".parse::<RoomType>().unwrap(), RoomType::Empty);
        assert!("nonsense".parse::<RoomType>().is_err());
    }
}
