use super::errors::SimulationError;
use super::types::{Location, StationId, Timestamp};

/// A single station-to-station trip. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ride {
    start_station: StationId,
    end_station: StationId,
    start_time: Timestamp,
    end_time: Timestamp,
}

impl Ride {
    /// Build a ride, rejecting one that does not start strictly before it ends
    pub fn new(
        start_station: impl Into<StationId>,
        end_station: impl Into<StationId>,
        start_time: Timestamp,
        end_time: Timestamp,
    ) -> Result<Self, SimulationError> {
        if start_time >= end_time {
            return Err(SimulationError::InvalidRide {
                start: start_time,
                end: end_time,
            });
        }

        Ok(Self {
            start_station: start_station.into(),
            end_station: end_station.into(),
            start_time,
            end_time,
        })
    }

    pub fn start_station(&self) -> &StationId {
        &self.start_station
    }

    pub fn end_station(&self) -> &StationId {
        &self.end_station
    }

    pub fn start_time(&self) -> Timestamp {
        self.start_time
    }

    pub fn end_time(&self) -> Timestamp {
        self.end_time
    }

    /// Where a renderer should draw this ride at `time`, assuming straight-line
    /// travel at constant speed between the two station locations.
    /// Times outside the ride snap to the nearer endpoint.
    pub fn position_at(&self, from: Location, to: Location, time: Timestamp) -> Location {
        if time <= self.start_time {
            return from;
        }
        if time >= self.end_time {
            return to;
        }

        let total = (self.end_time - self.start_time).num_milliseconds() as f64;
        let elapsed = (time - self.start_time).num_milliseconds() as f64;
        from.lerp(&to, elapsed / total)
    }
}
