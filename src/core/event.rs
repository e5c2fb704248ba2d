use super::errors::SimulationError;
use super::ride::Ride;
use super::simulation::RideNetwork;
use super::types::{RideId, Timestamp};
use log::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    RideStart,
    RideEnd,
}

/// A scheduled change to the network, applied once its timestamp is reached.
///
/// A ride goes through exactly two events: its start, which spawns its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub timestamp: Timestamp,
    pub kind: EventKind,
    pub ride: RideId,
}

impl Event {
    /// Start event for `ride`, stamped with its start time
    pub fn ride_start(id: RideId, ride: &Ride) -> Self {
        Self {
            timestamp: ride.start_time(),
            kind: EventKind::RideStart,
            ride: id,
        }
    }

    /// End event for `ride`, stamped with its end time
    pub fn ride_end(id: RideId, ride: &Ride) -> Self {
        Self {
            timestamp: ride.end_time(),
            kind: EventKind::RideEnd,
            ride: id,
        }
    }

    /// Apply this event to `network` and return the events it spawns
    pub fn process(&self, network: &mut RideNetwork) -> Result<Vec<Event>, SimulationError> {
        trace!("Processing {:?} for {} at {}", self.kind, self.ride, self.timestamp);

        match self.kind {
            EventKind::RideStart => {
                if network.is_active(self.ride) {
                    return Err(SimulationError::RideAlreadyActive(self.ride));
                }
                let ride = network.ride(self.ride)?;
                let station_id = ride.start_station().clone();
                let follow_on = Event::ride_end(self.ride, ride);

                network.station_mut(&station_id)?.apply_start();
                network.activate(self.ride);
                Ok(vec![follow_on])
            }
            EventKind::RideEnd => {
                if !network.is_active(self.ride) {
                    return Err(SimulationError::RideNotActive(self.ride));
                }
                let station_id = network.ride(self.ride)?.end_station().clone();

                network.station_mut(&station_id)?.apply_end();
                network.deactivate(self.ride);
                Ok(Vec::new())
            }
        }
    }
}
