//! Log-odds occupancy grid mapping.

use crate::grid::bresenham_line;

const LOG_ODDS_MAX: f64 = 3.5;
const LOG_ODDS_MIN: f64 = -3.5;

/// W×H log-odds map with a companion "observed" mask. `ln(p/(1-p))`
/// representation: 0 = unknown, positive = more likely occupied.
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    width: usize,
    height: usize,
    log_odds: Vec<f64>,
    observed: Vec<bool>,
    log_odds_occupied: f64,
    log_odds_free: f64,
}

impl OccupancyGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            log_odds: vec![0.0; width * height],
            observed: vec![false; width * height],
            log_odds_occupied: (0.7_f64 / 0.3).ln(),
            log_odds_free: (0.3_f64 / 0.7).ln(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    fn index(&self, x: i32, y: i32) -> usize {
        y as usize * self.width + x as usize
    }

    /// Adjust a cell's log-odds by the occupied/free increment, clamped
    /// to [-L_max, +L_max]; out-of-bounds updates are silently ignored.
    pub fn update_cell(&mut self, x: i32, y: i32, is_occupied: bool) {
        if !self.in_bounds(x, y) {
            return;
        }

        let i = self.index(x, y);
        if is_occupied {
            self.log_odds[i] = (self.log_odds[i] + self.log_odds_occupied).min(LOG_ODDS_MAX);
        } else {
            self.log_odds[i] = (self.log_odds[i] + self.log_odds_free).max(LOG_ODDS_MIN);
        }
        self.observed[i] = true;
    }

    /// Probability a cell is occupied; 0.5 if out of bounds or never
    /// observed.
    pub fn get_probability(&self, x: i32, y: i32) -> f64 {
        if !self.in_bounds(x, y) {
            return 0.5;
        }

        let i = self.index(x, y);
        if !self.observed[i] {
            return 0.5;
        }

        let odds = self.log_odds[i].exp();
        odds / (1.0 + odds)
    }

    pub fn is_occupied(&self, x: i32, y: i32, threshold: f64) -> bool {
        self.get_probability(x, y) > threshold
    }

    /// Rasterize a ray from the robot to each scan point; every cell on
    /// the ray except the endpoint is marked free, the endpoint occupied.
    pub fn update_from_scan(&mut self, robot: (i32, i32), scan_points: &[(i32, i32)]) {
        for &(point_x, point_y) in scan_points {
            let ray = bresenham_line(robot.0, robot.1, point_x, point_y);

            for &(x, y) in ray.iter().take(ray.len().saturating_sub(1)) {
                self.update_cell(x, y, false);
            }

            self.update_cell(point_x, point_y, true);
        }
    }

    /// Discretize to {-1 unknown, 0 free, 1 occupied} using threshold 0.6.
    pub fn get_map_array(&self, unknown_value: i8) -> Vec<i8> {
        let mut result = vec![unknown_value; self.width * self.height];
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let i = self.index(x, y);
                if self.observed[i] {
                    result[i] = if self.is_occupied(x, y, 0.6) { 1 } else { 0 };
                }
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn unobserved_cell_is_half_probability() {
        let grid = OccupancyGrid::new(10, 10);
        assert_relative_eq!(grid.get_probability(5, 5), 0.5);
    }

    #[test]
    fn out_of_bounds_is_half_probability() {
        let grid = OccupancyGrid::new(10, 10);
        assert_relative_eq!(grid.get_probability(-1, 5), 0.5);
        assert_relative_eq!(grid.get_probability(20, 5), 0.5);
    }

    #[test]
    fn occupied_update_increases_probability_above_half() {
        let mut grid = OccupancyGrid::new(10, 10);
        grid.update_cell(5, 5, true);
        assert!(grid.get_probability(5, 5) > 0.5);
    }

    #[test]
    fn free_update_decreases_probability_below_half() {
        let mut grid = OccupancyGrid::new(10, 10);
        grid.update_cell(5, 5, false);
        assert!(grid.get_probability(5, 5) < 0.5);
    }

    #[test]
    fn log_odds_clamped_within_bounds() {
        let mut grid = OccupancyGrid::new(5, 5);
        for _ in 0..100 {
            grid.update_cell(2, 2, true);
        }
        assert!(grid.log_odds[grid.index(2, 2)] <= LOG_ODDS_MAX);
    }

    #[test]
    fn update_from_scan_marks_ray_free_and_endpoint_occupied() {
        let mut grid = OccupancyGrid::new(10, 10);
        grid.update_from_scan((0, 0), &[(4, 0)]);
        assert!(grid.get_probability(2, 0) < 0.5);
        assert!(grid.is_occupied(4, 0, 0.6));
    }

    #[test]
    fn out_of_bounds_update_is_ignored() {
        let mut grid = OccupancyGrid::new(5, 5);
        grid.update_cell(100, 100, true);
        assert_relative_eq!(grid.get_probability(100, 100), 0.5);
    }
}
