//! Simulation configuration, loadable from TOML or built from defaults
//! matching the distilled system's hardcoded constants.

use crate::agent::CleaningMode;
use crate::environment::RoomType;
use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// All tunables for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimConfig {
    #[serde(default = "default_room_type")]
    pub room_type: String,
    #[serde(default = "default_cleaning_mode")]
    pub cleaning_mode: String,
    #[serde(default = "default_max_steps")]
    pub max_steps: u32,
    #[serde(default = "default_true")]
    pub enable_slam: bool,
    #[serde(default)]
    pub random_seed: Option<u64>,

    #[serde(default = "default_battery_capacity")]
    pub battery_capacity: f64,
    #[serde(default = "default_cleaning_width")]
    pub cleaning_width: f64,
    #[serde(default = "default_speed")]
    pub speed: f64,
    #[serde(default = "default_sensor_range")]
    pub sensor_range: f64,
    #[serde(default = "default_charge_rate")]
    pub charge_rate: f64,

    #[serde(default = "default_slam_resolution")]
    pub slam_resolution: f64,
    #[serde(default = "default_slam_num_particles")]
    pub slam_num_particles: usize,
    #[serde(default = "default_slam_motion_noise")]
    pub slam_motion_noise: f64,
}

fn default_room_type() -> String {
    "furnished".to_string()
}
fn default_cleaning_mode() -> String {
    "auto".to_string()
}
fn default_max_steps() -> u32 {
    10_000
}
fn default_true() -> bool {
    true
}
fn default_battery_capacity() -> f64 {
    100.0
}
fn default_cleaning_width() -> f64 {
    0.3
}
fn default_speed() -> f64 {
    0.2
}
fn default_sensor_range() -> f64 {
    2.0
}
fn default_charge_rate() -> f64 {
    10.0
}
fn default_slam_resolution() -> f64 {
    0.05
}
fn default_slam_num_particles() -> usize {
    100
}
fn default_slam_motion_noise() -> f64 {
    0.1
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            room_type: default_room_type(),
            cleaning_mode: default_cleaning_mode(),
            max_steps: default_max_steps(),
            enable_slam: true,
            random_seed: None,
            battery_capacity: default_battery_capacity(),
            cleaning_width: default_cleaning_width(),
            speed: default_speed(),
            sensor_range: default_sensor_range(),
            charge_rate: default_charge_rate(),
            slam_resolution: default_slam_resolution(),
            slam_num_particles: default_slam_num_particles(),
            slam_motion_noise: default_slam_motion_noise(),
        }
    }
}

impl SimConfig {
    pub fn from_toml_str(s: &str) -> SimResult<Self> {
        let config: SimConfig = toml::from_str(s).map_err(|e| SimError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> SimResult<String> {
        toml::to_string_pretty(self).map_err(|e| SimError::Config(e.to_string()))
    }

    /// Reject unrecognized room types / cleaning modes up front, rather
    /// than discovering them mid-run when the controller constructs the
    /// environment and planners.
    pub fn validate(&self) -> SimResult<()> {
        RoomType::from_str(&self.room_type)?;
        CleaningMode::from_str(&self.cleaning_mode)?;

        if self.battery_capacity <= 0.0 {
            return Err(SimError::Config("battery_capacity must be positive".to_string()));
        }
        if self.slam_num_particles == 0 {
            return Err(SimError::Config("slam_num_particles must be at least 1".to_string()));
        }

        Ok(())
    }

    pub fn room_type(&self) -> SimResult<RoomType> {
        RoomType::from_str(&self.room_type)
    }

    pub fn cleaning_mode(&self) -> SimResult<CleaningMode> {
        CleaningMode::from_str(&self.cleaning_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_distilled_hardcoded_constants() {
        let config = SimConfig::default();
        assert_eq!(config.room_type, "furnished");
        assert_eq!(config.cleaning_mode, "auto");
        assert_eq!(config.max_steps, 10_000);
        assert!(config.enable_slam);
        assert_eq!(config.random_seed, None);
    }

    #[test]
    fn toml_round_trip_preserves_values() {
        let config = SimConfig {
            room_type: "corridor".to_string(),
            random_seed: Some(42),
            ..SimConfig::default()
        };
        let serialized = config.to_toml_string().unwrap();
        let parsed = SimConfig::from_toml_str(&serialized).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config = SimConfig::from_toml_str("room_type = \"empty\"\n").unwrap();
        assert_eq!(config.room_type, "empty");
        assert_eq!(config.max_steps, 10_000);
    }

    #[test]
    fn unknown_room_type_is_rejected() {
        let config = SimConfig {
            room_type: "not_a_room".to_string(),
            ..SimConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_toml_field_is_rejected() {
        let result = SimConfig::from_toml_str("bogus_field = 1\n");
        assert!(result.is_err());
    }
}
