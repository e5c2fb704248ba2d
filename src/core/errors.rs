use super::types::{RideId, StationId, Timestamp};
use thiserror::Error;

/// Invalid simulation configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("step must be positive, got {0} seconds")]
    NonPositiveStep(i64),
    #[error("step must be a whole number of seconds, got {0} ms")]
    FractionalStep(i64),
}

/// Fatal conditions raised by the simulation core.
///
/// These indicate a broken invariant or misuse of the API, never bad ride
/// data: occupancy overflow and underflow are clamped inside `Station`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    #[error("event queue is empty")]
    EmptyQueue,
    #[error("unknown station '{0}'")]
    UnknownStation(StationId),
    #[error("duplicate station '{0}'")]
    DuplicateStation(StationId),
    #[error("unknown ride {0}")]
    UnknownRide(RideId),
    #[error("{0} is already active")]
    RideAlreadyActive(RideId),
    #[error("{0} is not active")]
    RideNotActive(RideId),
    #[error("ride must start before it ends (start {start}, end {end})")]
    InvalidRide { start: Timestamp, end: Timestamp },
    #[error("run window ends ({end}) before it starts ({start})")]
    InvalidWindow { start: Timestamp, end: Timestamp },
    #[error("simulation has already been run")]
    AlreadyRun,
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Failure reported by a renderer; logged by the driver and otherwise ignored
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("render failed: {0}")]
pub struct RenderError(pub String);
