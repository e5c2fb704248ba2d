use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Simulated wall-clock time. No time zone is attached.
pub type Timestamp = NaiveDateTime;

/// Opaque station key assigned by whatever produced the station data
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StationId(pub(crate) String);

impl StationId {
    /// Create a new station ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StationId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for StationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for StationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position of a ride in the simulation's ride sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RideId(pub(crate) usize);

impl RideId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for RideId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ride#{}", self.0)
    }
}

/// Geographic position, longitude first
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    pub longitude: f64,
    pub latitude: f64,
}

impl Location {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Point `fraction` of the way from `self` to `other`
    pub fn lerp(&self, other: &Location, fraction: f64) -> Location {
        Location {
            longitude: self.longitude + (other.longitude - self.longitude) * fraction,
            latitude: self.latitude + (other.latitude - self.latitude) * fraction,
        }
    }
}

impl From<(f64, f64)> for Location {
    fn from((longitude, latitude): (f64, f64)) -> Self {
        Self::new(longitude, latitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_id_ordering() {
        let a = StationId::new("6023");
        let b = StationId::from("6134");
        assert!(a < b);
        assert_eq!(a.as_str(), "6023");
        assert_eq!(b.to_string(), "6134");
    }

    #[test]
    fn test_location_lerp() {
        let start = Location::new(-73.5, 45.5);
        let end = Location::new(-73.6, 45.7);

        assert_eq!(start.lerp(&end, 0.0), start);
        let mid = start.lerp(&end, 0.5);
        assert!((mid.longitude - -73.55).abs() < 1e-9);
        assert!((mid.latitude - 45.6).abs() < 1e-9);
    }
}
