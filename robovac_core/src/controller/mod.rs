//! Simulation controller: the step-driven state machine that ties the
//! environment, agent, planners, and SLAM together. Grounded directly
//! on the distilled system's per-tick control loop.

use crate::agent::{Agent, AgentState, Position};
use crate::config::SimConfig;
use crate::environment::Environment;
use crate::error::SimResult;
use crate::planners::{astar, generate_coverage_path, optimizer};
use crate::slam::Slam;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Order in which candidate start positions around the dock are tried:
/// cardinal neighbors first, then diagonals.
const START_POSITION_OFFSETS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
];

/// Consecutive invalid-move attempts against the current coverage path
/// before it is discarded and stats.stuck_count is incremented.
const MAX_STUCK_ATTEMPTS: u32 = 10;

/// Snapshot of the controller's run-level counters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RunStats {
    pub steps: u32,
    pub max_steps: u32,
}

/// Orchestrates one simulation run: construction wires up the environment,
/// agent, planners, and (optionally) SLAM from a `SimConfig`; `step()`
/// advances exactly one tick.
pub struct Controller {
    environment: Environment,
    agent: Agent,
    slam: Option<Slam>,
    current_path: Vec<(i32, i32)>,
    path_index: usize,
    steps: u32,
    max_steps: u32,
    stuck_counter: u32,
    charge_rate: f64,
    rng: ChaCha8Rng,
}

impl Controller {
    /// Build a controller from a fully-resolved config. `config.random_seed`
    /// must already be `Some`: the core never draws from process-wide
    /// randomness, so callers (the CLI front end) are responsible for
    /// picking a seed — from the OS RNG if the user didn't supply one —
    /// before constructing a `Controller`.
    pub fn new(config: &SimConfig) -> SimResult<Self> {
        config.validate()?;

        let seed = config
            .random_seed
            .expect("random_seed must be resolved by the caller before constructing a Controller");
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let room_type = config.room_type()?;
        let mode = config.cleaning_mode()?;

        let environment = Environment::create(room_type, &mut rng);
        let dock = environment
            .dock_position()
            .expect("Environment::create always places a dock");

        let start = find_start_position(&environment, dock, &mut rng);

        let mut agent = Agent::new(
            Position::new(start.0 as f64, start.1 as f64),
            config.battery_capacity,
            config.cleaning_width,
            config.speed,
            config.sensor_range,
        );
        agent.set_dock_position(Position::new(dock.0 as f64, dock.1 as f64));
        agent.mode = mode;
        agent.state = AgentState::Idle;

        let slam = if config.enable_slam {
            Some(Slam::new(
                environment.width(),
                environment.height(),
                config.slam_num_particles,
                config.slam_motion_noise,
                &mut rng,
            ))
        } else {
            None
        };

        Ok(Self {
            environment,
            agent,
            slam,
            current_path: Vec::new(),
            path_index: 0,
            steps: 0,
            max_steps: config.max_steps,
            stuck_counter: 0,
            charge_rate: config.charge_rate,
            rng,
        })
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn slam(&self) -> Option<&Slam> {
        self.slam.as_ref()
    }

    pub fn stats(&self) -> RunStats {
        RunStats {
            steps: self.steps,
            max_steps: self.max_steps,
        }
    }

    /// Advance the simulation by one tick. Returns `false` once the run
    /// should stop (cliff error, or the step budget is exhausted).
    pub fn step(&mut self) -> bool {
        self.steps += 1;
        self.environment.step(None);
        self.agent.update_sensors(self.environment.grid());

        if self.agent.sensor_data.cliff_detected {
            self.agent.state = AgentState::Error;
            self.agent.stats.errors_encountered += 1;
            return false;
        }

        if self.agent.should_return_to_dock() && self.agent.state != AgentState::ReturningToDock {
            self.agent.state = AgentState::ReturningToDock;
            self.begin_path_to_dock();
        }

        let keep_going = match self.agent.state {
            AgentState::Charging => self.tick_charging(),
            AgentState::ReturningToDock => self.tick_returning_to_dock(),
            AgentState::Cleaning | AgentState::Stuck => self.tick_cleaning(),
            AgentState::Idle => {
                self.agent.state = AgentState::Cleaning;
                true
            }
            AgentState::Error => false,
        };

        if !keep_going || self.agent.state == AgentState::Error {
            return false;
        }

        self.steps < self.max_steps
    }

    pub fn run(&mut self) {
        while self.step() {}
    }

    fn begin_path_to_dock(&mut self) {
        let current = self.agent.position.to_grid();
        let dock = self
            .agent
            .dock_position()
            .expect("controller always assigns a dock position")
            .to_grid();

        self.current_path = astar::find_path(self.environment.grid(), current, dock, true).unwrap_or_default();
        self.path_index = 0;
    }

    fn tick_charging(&mut self) -> bool {
        let fully_charged = self.agent.charge(self.charge_rate);
        if fully_charged {
            self.agent.state = AgentState::Cleaning;
            self.current_path.clear();
            self.path_index = 0;
        }
        true
    }

    fn tick_returning_to_dock(&mut self) -> bool {
        if self.path_index >= self.current_path.len() {
            self.agent.state = AgentState::Charging;
            return true;
        }

        self.advance_along_path(false);
        true
    }

    fn tick_cleaning(&mut self) -> bool {
        if self.path_index >= self.current_path.len() {
            let start = self.agent.position.to_grid();
            let raw = generate_coverage_path(self.environment.grid(), self.agent.mode, start, &mut self.rng);
            self.current_path = optimizer::remove_redundant_moves(&raw);
            self.path_index = 0;

            if self.current_path.is_empty() {
                return false;
            }
        }

        self.advance_along_path(true);
        true
    }

    /// Step one cell along `current_path`, optionally validating the
    /// target cell first. On a successful move: clean the destination
    /// cell and, if SLAM is enabled, feed it the odometry delta plus a
    /// fresh 5x5 sensor scan. On an invalid target (cleaning only): skip
    /// it and count toward the stuck threshold.
    fn advance_along_path(&mut self, validate: bool) {
        let next = self.current_path[self.path_index];

        if validate && !self.environment.is_valid_position(next.0, next.1) {
            self.path_index += 1;
            self.stuck_counter += 1;

            if self.stuck_counter >= MAX_STUCK_ATTEMPTS {
                tracing::warn!(stuck_count = self.agent.stats.stuck_count + 1, "coverage path abandoned after repeated invalid moves");
                self.agent.stats.stuck_count += 1;
                self.current_path.clear();
                self.path_index = 0;
                self.stuck_counter = 0;
            }
            return;
        }

        let current = self.agent.position.to_grid();
        let dx = (next.0 - current.0) as f64;
        let dy = (next.1 - current.1) as f64;

        if self.agent.move_by(dx, dy) {
            self.path_index += 1;
            self.stuck_counter = 0;
            self.environment.clean_cell(next.0, next.1);

            if let Some(slam) = &mut self.slam {
                let points = sensor_points(&self.environment, next);
                slam.update(dx, dy, 0.0, &points, &mut self.rng);
            }
        }
    }
}

/// Cardinal-then-diagonal search around the dock, falling back to any
/// free cell and finally the grid center.
fn find_start_position(environment: &Environment, dock: (i32, i32), rng: &mut ChaCha8Rng) -> (i32, i32) {
    for (dx, dy) in START_POSITION_OFFSETS {
        let candidate = (dock.0 + dx, dock.1 + dy);
        if environment.is_valid_position(candidate.0, candidate.1) {
            return candidate;
        }
    }

    let free: Vec<(i32, i32)> = environment
        .grid()
        .iter_positions()
        .filter(|&(x, y)| environment.is_valid_position(x, y))
        .collect();
    if let Some(&pos) = free.choose(rng) {
        return pos;
    }

    (environment.width() as i32 / 2, environment.height() as i32 / 2)
}

/// Obstacle cells within a 5x5 window centered on `center`, used as the
/// simulated scan fed into SLAM each tick.
fn sensor_points(environment: &Environment, center: (i32, i32)) -> Vec<(i32, i32)> {
    use crate::grid::CellType;

    let mut points = Vec::new();
    for dy in -2..=2 {
        for dx in -2..=2 {
            let (x, y) = (center.0 + dx, center.1 + dy);
            if environment.get_cell_type(x, y) == CellType::Obstacle {
                points.push((x, y));
            }
        }
    }
    points
}
