use super::config::SimulationConfig;
use super::errors::SimulationError;
use super::event::Event;
use super::event_queue::EventQueue;
use super::renderer::{Frame, Renderer};
use super::ride::Ride;
use super::station::Station;
use super::statistics::StatisticsReport;
use super::types::{RideId, StationId, Timestamp};
use log::{debug, info, warn};
use std::collections::{BTreeMap, BTreeSet};

/// Stations, rides and the set of rides in progress.
///
/// This is the state events mutate. Only the owning [`Simulation`] hands out
/// mutable access to it.
#[derive(Debug, Clone)]
pub struct RideNetwork {
    stations: BTreeMap<StationId, Station>,
    rides: Vec<Ride>,
    active_rides: BTreeSet<RideId>,
}

impl RideNetwork {
    /// Build a network, checking station ids are unique and every ride
    /// references a known station.
    pub fn new(
        stations: impl IntoIterator<Item = Station>,
        rides: impl IntoIterator<Item = Ride>,
    ) -> Result<Self, SimulationError> {
        let mut by_id = BTreeMap::new();
        for station in stations {
            let id = station.id().clone();
            if by_id.insert(id.clone(), station).is_some() {
                return Err(SimulationError::DuplicateStation(id));
            }
        }

        let rides: Vec<Ride> = rides.into_iter().collect();
        for ride in &rides {
            for id in [ride.start_station(), ride.end_station()] {
                if !by_id.contains_key(id) {
                    return Err(SimulationError::UnknownStation(id.clone()));
                }
            }
        }

        Ok(Self {
            stations: by_id,
            rides,
            active_rides: BTreeSet::new(),
        })
    }

    pub fn station(&self, id: &StationId) -> Result<&Station, SimulationError> {
        self.stations
            .get(id)
            .ok_or_else(|| SimulationError::UnknownStation(id.clone()))
    }

    pub(crate) fn station_mut(&mut self, id: &StationId) -> Result<&mut Station, SimulationError> {
        self.stations
            .get_mut(id)
            .ok_or_else(|| SimulationError::UnknownStation(id.clone()))
    }

    /// Stations in id order
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    pub fn ride(&self, id: RideId) -> Result<&Ride, SimulationError> {
        self.rides
            .get(id.index())
            .ok_or(SimulationError::UnknownRide(id))
    }

    pub fn rides(&self) -> &[Ride] {
        &self.rides
    }

    pub fn is_active(&self, id: RideId) -> bool {
        self.active_rides.contains(&id)
    }

    /// Rides in progress, in ride id order
    pub fn active_rides(&self) -> impl Iterator<Item = (RideId, &Ride)> {
        self.active_rides
            .iter()
            .filter_map(|id| self.rides.get(id.index()).map(|ride| (*id, ride)))
    }

    pub fn active_ride_count(&self) -> usize {
        self.active_rides.len()
    }

    pub(crate) fn activate(&mut self, id: RideId) {
        self.active_rides.insert(id);
    }

    pub(crate) fn deactivate(&mut self, id: RideId) {
        self.active_rides.remove(&id);
    }

    fn tick_statistics(&mut self, config: &SimulationConfig) {
        let seconds = config.seconds_per_tick();
        for station in self.stations.values_mut() {
            station.tick_statistics(
                config.low_availability_threshold,
                config.low_unoccupied_threshold,
                seconds,
            );
        }
    }

    fn frame(&self, time: Timestamp) -> Frame<'_> {
        Frame {
            time,
            stations: self.stations().collect(),
            active_rides: self.active_rides().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationState {
    NotStarted,
    Running,
    Finished,
}

/// Outcome of a completed [`Simulation::run`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub steps: u64,
    pub events_processed: u64,
}

/// Drives a [`RideNetwork`] through a time window one step at a time.
///
/// Every step drains the events due by the cursor, shows the frame to the
/// renderers, then ticks every station's low-occupancy counters.
pub struct Simulation {
    network: RideNetwork,
    queue: EventQueue,
    config: SimulationConfig,
    state: SimulationState,
    current_time: Option<Timestamp>,
    renderers: Vec<Box<dyn Renderer>>,
}

impl Simulation {
    /// Create a simulation with the default configuration
    pub fn new(
        stations: impl IntoIterator<Item = Station>,
        rides: impl IntoIterator<Item = Ride>,
    ) -> Result<Self, SimulationError> {
        Self::with_config(stations, rides, SimulationConfig::default())
    }

    pub fn with_config(
        stations: impl IntoIterator<Item = Station>,
        rides: impl IntoIterator<Item = Ride>,
        config: SimulationConfig,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        let network = RideNetwork::new(stations, rides)?;
        debug!(
            "Simulation created with {} stations and {} rides",
            network.stations.len(),
            network.rides.len()
        );

        Ok(Self {
            network,
            queue: EventQueue::new(),
            config,
            state: SimulationState::NotStarted,
            current_time: None,
            renderers: Vec::new(),
        })
    }

    /// Add a renderer that is shown every step
    pub fn add_renderer(&mut self, renderer: Box<dyn Renderer>) {
        self.renderers.push(renderer);
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn network(&self) -> &RideNetwork {
        &self.network
    }

    pub fn station(&self, id: &StationId) -> Result<&Station, SimulationError> {
        self.network.station(id)
    }

    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.network.stations()
    }

    pub fn rides(&self) -> &[Ride] {
        self.network.rides()
    }

    pub fn active_rides(&self) -> impl Iterator<Item = (RideId, &Ride)> {
        self.network.active_rides()
    }

    /// Cursor time of the last step taken, if any
    pub fn current_time(&self) -> Option<Timestamp> {
        self.current_time
    }

    /// Events still pending (rides that end after the window)
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Run the simulation from `start` to `end`, both inclusive.
    ///
    /// Only rides starting at or after `start` are scheduled. A ride already
    /// underway when the window opens is never modelled, so its end does not
    /// dock a bike either.
    pub fn run(&mut self, start: Timestamp, end: Timestamp) -> Result<RunSummary, SimulationError> {
        if self.state != SimulationState::NotStarted {
            return Err(SimulationError::AlreadyRun);
        }
        if end < start {
            return Err(SimulationError::InvalidWindow { start, end });
        }

        self.state = SimulationState::Running;
        self.seed_queue(start);
        info!(
            "Running simulation from {} to {} with {} scheduled rides",
            start,
            end,
            self.queue.len()
        );

        let mut summary = RunSummary {
            steps: 0,
            events_processed: 0,
        };
        let mut current = start;
        loop {
            self.current_time = Some(current);
            summary.events_processed += self.drain(current)?;
            self.render(current);

            if current != end || self.config.tick_final_step {
                self.network.tick_statistics(&self.config);
            }

            summary.steps += 1;
            // stop once the cursor passes `end` or leaves the representable range
            match current.checked_add_signed(self.config.step) {
                Some(next) if next <= end => current = next,
                _ => break,
            }
        }

        self.state = SimulationState::Finished;
        info!(
            "Simulation finished after {} steps, {} events processed, {} rides still active",
            summary.steps,
            summary.events_processed,
            self.network.active_ride_count()
        );
        Ok(summary)
    }

    /// Maxima of the four station counters, ties going to the smallest name
    pub fn calculate_statistics(&self) -> StatisticsReport {
        StatisticsReport::from_stations(self.network.stations())
    }

    fn seed_queue(&mut self, start: Timestamp) {
        for (index, ride) in self.network.rides.iter().enumerate() {
            if ride.start_time() >= start {
                self.queue.add(Event::ride_start(RideId::new(index), ride));
            }
        }
    }

    /// Process every event due at or before `time`, including follow-on
    /// events that themselves fall due. Returns how many were processed.
    fn drain(&mut self, time: Timestamp) -> Result<u64, SimulationError> {
        let mut processed = 0;
        while let Some(event) = self.queue.remove_due(time) {
            let follow_on = event.process(&mut self.network)?;
            self.queue.extend(follow_on);
            processed += 1;
        }

        if processed > 0 {
            debug!(
                "{}: processed {} events, {} rides active",
                time,
                processed,
                self.network.active_ride_count()
            );
        }
        Ok(processed)
    }

    fn render(&mut self, time: Timestamp) {
        if self.renderers.is_empty() {
            return;
        }
        let frame = self.network.frame(time);
        for renderer in &mut self.renderers {
            if let Err(err) = renderer.render(&frame) {
                warn!("Renderer failed at {}: {}", time, err);
            }
        }
    }
}
