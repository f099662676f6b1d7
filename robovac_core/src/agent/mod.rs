//! Agent: pose, battery, sensor snapshot, and running statistics.

use crate::error::{SimError, SimResult};
use crate::grid::{CellType, Grid};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// Operational state of the agent, driven by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentState {
    Idle,
    Cleaning,
    ReturningToDock,
    Charging,
    Error,
    Stuck,
}

/// Closed set of recognized cleaning modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CleaningMode {
    Auto,
    Spot,
    Edge,
    Spiral,
    Zigzag,
    WallFollow,
    Random,
}

impl CleaningMode {
    pub fn as_str(self) -> &'static str {
        match self {
            CleaningMode::Auto => "auto",
            CleaningMode::Spot => "spot",
            CleaningMode::Edge => "edge",
            CleaningMode::Spiral => "spiral",
            CleaningMode::Zigzag => "zigzag",
            CleaningMode::WallFollow => "wall_follow",
            CleaningMode::Random => "random",
        }
    }

    pub fn all() -> &'static [CleaningMode] {
        &[
            CleaningMode::Auto,
            CleaningMode::Spot,
            CleaningMode::Edge,
            CleaningMode::Spiral,
            CleaningMode::Zigzag,
            CleaningMode::WallFollow,
            CleaningMode::Random,
        ]
    }
}

impl FromStr for CleaningMode {
    type Err = SimError;

    fn from_str(s: &str) -> SimResult<Self> {
        match s {
            "auto" => Ok(CleaningMode::Auto),
            "spot" => Ok(CleaningMode::Spot),
            "edge" => Ok(CleaningMode::Edge),
            "spiral" => Ok(CleaningMode::Spiral),
            "zigzag" => Ok(CleaningMode::Zigzag),
            "wall_follow" => Ok(CleaningMode::WallFollow),
            "random" => Ok(CleaningMode::Random),
            other => Err(SimError::InvalidCleaningMode(other.to_string())),
        }
    }
}

/// Continuous-space pose. Grid coordinates are obtained by floor truncation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn to_grid(&self) -> (i32, i32) {
        (self.x as i32, self.y as i32)
    }
}

/// Per-direction obstacle flags/distances plus cliff and bumper flags.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorData {
    pub obstacle_front: bool,
    pub obstacle_back: bool,
    pub obstacle_left: bool,
    pub obstacle_right: bool,
    pub cliff_detected: bool,
    pub bumper_triggered: bool,
    pub distance_front: f64,
    pub distance_back: f64,
    pub distance_left: f64,
    pub distance_right: f64,
}

impl Default for SensorData {
    fn default() -> Self {
        Self {
            obstacle_front: false,
            obstacle_back: false,
            obstacle_left: false,
            obstacle_right: false,
            cliff_detected: false,
            bumper_triggered: false,
            distance_front: f64::INFINITY,
            distance_back: f64::INFINITY,
            distance_left: f64::INFINITY,
            distance_right: f64::INFINITY,
        }
    }
}

/// Monotonically non-decreasing running statistics for the current run.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AgentStats {
    pub total_distance: f64,
    pub area_cleaned: usize,
    pub cleaning_time: f64,
    pub battery_cycles: u32,
    pub errors_encountered: u32,
    pub stuck_count: u32,
}

/// The mobile cleaning agent: pose, battery, sensors, and stats.
#[derive(Debug, Clone)]
pub struct Agent {
    pub position: Position,
    pub heading: f64,
    pub state: AgentState,
    pub mode: CleaningMode,
    battery_capacity: f64,
    pub battery_level: f64,
    cleaning_width: f64,
    speed: f64,
    sensor_range: f64,
    dock_position: Option<Position>,
    pub sensor_data: SensorData,
    pub stats: AgentStats,
    cleaned_cells: HashSet<(i32, i32)>,
    visited_cells: HashSet<(i32, i32)>,
    pub path_history: Vec<Position>,
    charging_episode_completed: bool,
}

impl Agent {
    pub fn new(
        position: Position,
        battery_capacity: f64,
        cleaning_width: f64,
        speed: f64,
        sensor_range: f64,
    ) -> Self {
        Self {
            position,
            heading: 0.0,
            state: AgentState::Idle,
            mode: CleaningMode::Auto,
            battery_capacity,
            battery_level: battery_capacity,
            cleaning_width,
            speed,
            sensor_range,
            dock_position: None,
            sensor_data: SensorData::default(),
            stats: AgentStats::default(),
            cleaned_cells: HashSet::new(),
            visited_cells: HashSet::new(),
            path_history: vec![position],
            charging_episode_completed: false,
        }
    }

    pub fn set_dock_position(&mut self, position: Position) {
        self.dock_position = Some(position);
    }

    pub fn dock_position(&self) -> Option<Position> {
        self.dock_position
    }

    pub fn cleaning_width(&self) -> f64 {
        self.cleaning_width
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Reset and refresh the sensor snapshot against the static map.
    pub fn update_sensors(&mut self, map: &Grid) {
        let (x, y) = self.position.to_grid();
        self.sensor_data = SensorData::default();

        let directions: [(&str, (i32, i32)); 4] = [
            ("front", (0, -1)),
            ("back", (0, 1)),
            ("left", (-1, 0)),
            ("right", (1, 0)),
        ];

        for (name, (dx, dy)) in directions {
            let check_x = x + dx;
            let check_y = y + dy;

            if map.in_bounds(check_x, check_y) {
                match map.get(check_x, check_y) {
                    CellType::Obstacle => self.set_obstacle(name, true, 1.0),
                    CellType::Cliff => self.sensor_data.cliff_detected = true,
                    _ => {
                        let distance = self.ray_distance(map, x, y, dx, dy);
                        self.set_distance(name, distance);
                    }
                }
            } else {
                self.set_obstacle(name, true, 0.0);
            }
        }
    }

    fn set_obstacle(&mut self, direction: &str, obstacle: bool, distance: f64) {
        match direction {
            "front" => {
                self.sensor_data.obstacle_front = obstacle;
                self.sensor_data.distance_front = distance;
            }
            "back" => {
                self.sensor_data.obstacle_back = obstacle;
                self.sensor_data.distance_back = distance;
            }
            "left" => {
                self.sensor_data.obstacle_left = obstacle;
                self.sensor_data.distance_left = distance;
            }
            "right" => {
                self.sensor_data.obstacle_right = obstacle;
                self.sensor_data.distance_right = distance;
            }
            _ => unreachable!("fixed four-direction record"),
        }
    }

    fn set_distance(&mut self, direction: &str, distance: f64) {
        match direction {
            "front" => self.sensor_data.distance_front = distance,
            "back" => self.sensor_data.distance_back = distance,
            "left" => self.sensor_data.distance_left = distance,
            "right" => self.sensor_data.distance_right = distance,
            _ => unreachable!("fixed four-direction record"),
        }
    }

    fn ray_distance(&self, map: &Grid, x: i32, y: i32, dx: i32, dy: i32) -> f64 {
        let mut cx = x;
        let mut cy = y;
        let mut distance = 0.0;

        while distance < self.sensor_range {
            cx += dx;
            cy += dy;
            distance += 1.0;

            if !map.in_bounds(cx, cy) {
                return distance;
            }

            if matches!(map.get(cx, cy), CellType::Obstacle | CellType::Cliff) {
                return distance;
            }
        }

        self.sensor_range
    }

    /// Move by (dx, dy). Returns false (and transitions to error) if the
    /// battery is already depleted; otherwise always succeeds.
    pub fn move_by(&mut self, dx: f64, dy: f64) -> bool {
        if self.battery_level <= 0.0 {
            self.state = AgentState::Error;
            return false;
        }

        let new_position = Position::new(self.position.x + dx, self.position.y + dy);
        self.position = new_position;
        self.path_history.push(new_position);

        let distance = (dx * dx + dy * dy).sqrt();
        self.stats.total_distance += distance;

        let consumption = distance * 0.1;
        self.battery_level = (self.battery_level - consumption).max(0.0);

        let grid_pos = self.position.to_grid();
        self.visited_cells.insert(grid_pos);
        self.cleaned_cells.insert(grid_pos);
        self.stats.area_cleaned = self.cleaned_cells.len();

        true
    }

    pub fn should_return_to_dock(&self) -> bool {
        if self.battery_level < 20.0 {
            return true;
        }

        if let Some(dock) = self.dock_position {
            let distance_to_dock = self.position.distance_to(&dock);
            let estimated_needed = distance_to_dock * 0.1 * 1.5;
            if self.battery_level < estimated_needed + 10.0 {
                return true;
            }
        }

        false
    }

    /// Charge by `charge_rate`, clamped at capacity. Increments the
    /// battery-cycle counter only when capacity is first reached in this
    /// charging episode (a correction over the distilled source).
    pub fn charge(&mut self, charge_rate: f64) -> bool {
        if self.state != AgentState::Charging {
            self.state = AgentState::Charging;
            self.charging_episode_completed = false;
        }

        self.battery_level = (self.battery_level + charge_rate).min(self.battery_capacity);

        if self.battery_level >= self.battery_capacity {
            if !self.charging_episode_completed {
                self.stats.battery_cycles += 1;
                self.charging_episode_completed = true;
            }
            return true;
        }

        false
    }

    pub fn reset_stats(&mut self) {
        self.stats = AgentStats::default();
        self.cleaned_cells.clear();
        self.visited_cells.clear();
        self.path_history = vec![self.position];
    }

    pub fn cleaned_cells(&self) -> &HashSet<(i32, i32)> {
        &self.cleaned_cells
    }
}
