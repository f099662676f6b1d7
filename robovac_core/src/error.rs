//! Error types for the simulation core.

use thiserror::Error;

/// Errors the core can report to a caller across the config/command boundary.
///
/// Unrecoverable-run and recoverable-local failures are not modeled
/// here; they surface through agent/controller state and step return
/// values instead, per the core's no-panic-on-bad-state contract.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("unknown room type '{0}'")]
    InvalidRoomType(String),

    #[error("unknown cleaning mode '{0}'")]
    InvalidCleaningMode(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("slam error: {0}")]
    Slam(String),
}

/// Convenience alias used throughout the crate.
pub type SimResult<T> = Result<T, SimError>;
