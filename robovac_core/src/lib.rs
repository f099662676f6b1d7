//! Deterministic simulation core for a grid-based cleaning robot:
//! environment, agent, coverage planners, occupancy-grid SLAM, and the
//! controller state machine that drives them tick by tick.

pub mod agent;
pub mod config;
pub mod controller;
pub mod environment;
pub mod error;
pub mod grid;
pub mod planners;
pub mod slam;

pub use agent::{Agent, AgentState, CleaningMode};
pub use config::SimConfig;
pub use controller::Controller;
pub use environment::{Environment, RoomType};
pub use error::{SimError, SimResult};
pub use grid::{CellType, Grid};
