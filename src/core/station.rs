use super::types::{Location, StationId};
use log::{debug, warn};
use serde::Serialize;

/// Running counters kept for every station over a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StationStats {
    /// Rides that actually departed with a bike from this station
    pub started: u64,
    /// Rides that actually docked a bike at this station
    pub ended: u64,
    /// Seconds spent with few bikes available
    pub minutes_low_availability: u64,
    /// Seconds spent with few free docks
    pub minutes_low_unoccupied: u64,
}

/// A docking station with bounded capacity.
///
/// Occupancy only changes through [`Station::apply_start`] and
/// [`Station::apply_end`], both of which keep `0 <= bike_count <= capacity`.
/// Requests that would break that bound are dropped rather than reported,
/// because ride feeds are not guaranteed to be saturation free.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    id: StationId,
    name: String,
    location: Location,
    capacity: u32,
    bike_count: u32,
    stats: StationStats,
}

impl Station {
    /// Create a station. A `bike_count` above `capacity` is clamped.
    pub fn new(
        id: impl Into<StationId>,
        name: impl Into<String>,
        location: Location,
        capacity: u32,
        bike_count: u32,
    ) -> Self {
        let id = id.into();
        if bike_count > capacity {
            warn!(
                "Station '{}' created with {} bikes but capacity {}; clamping",
                id, bike_count, capacity
            );
        }

        Self {
            id,
            name: name.into(),
            location,
            capacity,
            bike_count: bike_count.min(capacity),
            stats: StationStats::default(),
        }
    }

    pub fn id(&self) -> &StationId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn bike_count(&self) -> u32 {
        self.bike_count
    }

    /// Free docks at this station
    pub fn free_docks(&self) -> u32 {
        self.capacity - self.bike_count
    }

    pub fn stats(&self) -> &StationStats {
        &self.stats
    }

    /// A bike leaves the station. Returns whether a bike was actually taken.
    pub fn apply_start(&mut self) -> bool {
        if self.bike_count == 0 {
            debug!("Station '{}' has no bikes; start not recorded", self.id);
            return false;
        }
        self.bike_count -= 1;
        self.stats.started += 1;
        true
    }

    /// A bike docks at the station. Returns whether the bike was actually docked.
    pub fn apply_end(&mut self) -> bool {
        if self.bike_count >= self.capacity {
            debug!("Station '{}' is full; end not recorded", self.id);
            return false;
        }
        self.bike_count += 1;
        self.stats.ended += 1;
        true
    }

    /// Credit `seconds` to each low-occupancy counter whose condition holds.
    /// Both counters may advance in the same tick.
    pub fn tick_statistics(
        &mut self,
        low_availability_threshold: u32,
        low_unoccupied_threshold: u32,
        seconds: u64,
    ) {
        if self.bike_count <= low_availability_threshold {
            self.stats.minutes_low_availability += seconds;
        }
        if self.free_docks() <= low_unoccupied_threshold {
            self.stats.minutes_low_unoccupied += seconds;
        }
    }
}
