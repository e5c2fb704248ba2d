//! Seeded synthetic networks for headless runs and benchmarks.

use crate::core::ride::Ride;
use crate::core::station::Station;
use crate::core::types::{Location, Timestamp};
use chrono::Duration;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp1};

/// Builds random stations and rides from a fixed seed, so the same
/// parameters always give the same scenario.
#[derive(Debug, Clone)]
pub struct ScenarioGenerator {
    seed: u64,
    station_count: usize,
    ride_count: usize,
    capacity_range: (u32, u32),
    mean_ride_minutes: f64,
    origin: Location,
    spread: f64,
}

#[derive(Debug, Clone)]
pub struct Scenario {
    pub stations: Vec<Station>,
    pub rides: Vec<Ride>,
}

impl ScenarioGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            station_count: 50,
            ride_count: 1_000,
            capacity_range: (10, 40),
            mean_ride_minutes: 15.0,
            origin: Location::new(-73.57, 45.51),
            spread: 0.05,
        }
    }

    pub fn with_stations(mut self, count: usize) -> Self {
        self.station_count = count;
        self
    }

    pub fn with_rides(mut self, count: usize) -> Self {
        self.ride_count = count;
        self
    }

    /// Inclusive capacity bounds for generated stations
    pub fn with_capacity_range(mut self, min: u32, max: u32) -> Self {
        self.capacity_range = (min.min(max), min.max(max));
        self
    }

    pub fn with_mean_ride_minutes(mut self, minutes: f64) -> Self {
        self.mean_ride_minutes = minutes;
        self
    }

    /// Generate a scenario whose rides start uniformly inside
    /// `[start, start + span]` and last an exponentially distributed number
    /// of minutes (at least one).
    pub fn generate(&self, start: Timestamp, span: Duration) -> Scenario {
        let mut rng = StdRng::seed_from_u64(self.seed);

        let stations: Vec<Station> = (0..self.station_count)
            .map(|i| {
                let capacity = rng.gen_range(self.capacity_range.0..=self.capacity_range.1);
                let bikes = rng.gen_range(0..=capacity);
                let location = Location::new(
                    self.origin.longitude + rng.gen_range(-self.spread..=self.spread),
                    self.origin.latitude + rng.gen_range(-self.spread..=self.spread),
                );
                Station::new(
                    format!("S{:04}", i),
                    format!("Station {:04}", i),
                    location,
                    capacity,
                    bikes,
                )
            })
            .collect();

        if stations.is_empty() {
            return Scenario {
                stations,
                rides: Vec::new(),
            };
        }

        let mean_minutes = self.mean_ride_minutes.max(1.0);
        let span_minutes = span.num_minutes().max(0);

        let rides = (0..self.ride_count)
            .filter_map(|_| {
                let from = rng.gen_range(0..stations.len());
                let to = rng.gen_range(0..stations.len());
                let offset = rng.gen_range(0..=span_minutes);
                let draw: f64 = Exp1.sample(&mut rng);
                let minutes = (draw * mean_minutes).ceil().max(1.0) as i64;

                let ride_start = start + Duration::minutes(offset);
                Ride::new(
                    stations[from].id().clone(),
                    stations[to].id().clone(),
                    ride_start,
                    ride_start + Duration::minutes(minutes),
                )
                .ok()
            })
            .collect();

        Scenario { stations, rides }
    }
}
