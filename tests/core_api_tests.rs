use bikeshare_sim::{
    generator::ScenarioGenerator,
    loader::{load_rides_file, load_stations_file},
    Frame, Location, RenderError, Renderer, Ride, Simulation, SimulationConfig, Station,
    StationId, StationMax, Timestamp,
};
use chrono::{Duration, NaiveDate};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

fn at(hour: u32, minute: u32) -> Timestamp {
    NaiveDate::from_ymd_opt(2017, 6, 1)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .unwrap()
}

fn data(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(file)
}

fn sample_simulation(config: SimulationConfig) -> Simulation {
    let stations = load_stations_file(data("stations.json")).unwrap();
    let rides = load_rides_file(data("rides.csv"), &stations).unwrap();
    Simulation::with_config(stations.into_values(), rides, config).unwrap()
}

fn max(name: &str, value: u64) -> StationMax {
    StationMax {
        station_name: name.to_string(),
        value,
    }
}

/// Fails the run's bookkeeping if any station ever leaves `0..=capacity`
#[derive(Default)]
struct CapacityWatch {
    violations: Rc<RefCell<usize>>,
}

impl Renderer for CapacityWatch {
    fn render(&mut self, frame: &Frame<'_>) -> Result<(), RenderError> {
        let bad = frame
            .stations
            .iter()
            .filter(|s| s.bike_count() > s.capacity())
            .count();
        *self.violations.borrow_mut() += bad;
        Ok(())
    }
}

#[test]
fn test_sample_feeds_load() {
    let stations = load_stations_file(data("stations.json")).unwrap();
    assert_eq!(stations.len(), 6);

    let rosemont = &stations[&StationId::new("6002")];
    assert_eq!(rosemont.capacity(), 15);
    assert_eq!(rosemont.bike_count(), 14);
    assert_eq!(rosemont.location(), Location::new(-73.58941, 45.54649));

    let rides = load_rides_file(data("rides.csv"), &stations).unwrap();
    assert_eq!(rides.len(), 3);
    assert_eq!(rides[2].start_station(), &StationId::new("6091"));
    assert_eq!(rides[2].start_time(), at(9, 31));
}

#[test]
fn test_statistics_over_short_window() {
    let mut sim = sample_simulation(SimulationConfig::new().with_final_tick(false));
    sim.run(at(9, 30), at(9, 45)).unwrap();
    let stats = sim.calculate_statistics();

    assert_eq!(stats.max_start, max("Rachel / Papineau", 1));
    assert_eq!(stats.max_end, max("Ontario / Sicard", 1));
    // "Zulu Place" is just as low on bikes but sorts after
    assert_eq!(stats.max_time_low_availability, max("15e avenue / Masson", 900));
    assert_eq!(stats.max_time_low_unoccupied, max("10e Avenue / Rosemont", 900));
}

#[test]
fn test_final_tick_counts_the_last_step() {
    let mut sim = sample_simulation(SimulationConfig::default());
    sim.run(at(9, 30), at(9, 45)).unwrap();
    let stats = sim.calculate_statistics();

    assert_eq!(stats.max_time_low_availability, max("15e avenue / Masson", 960));
    assert_eq!(stats.max_time_low_unoccupied, max("10e Avenue / Rosemont", 960));
}

#[test]
fn test_ride_ending_outside_run() {
    let mut sim = sample_simulation(SimulationConfig::default());
    sim.run(at(9, 30), at(9, 40)).unwrap();
    let stats = sim.calculate_statistics();

    assert_eq!(stats.max_start, max("Rachel / Papineau", 1));
    // nothing docked, so every station ties at zero
    assert_eq!(stats.max_end, max("10e Avenue / Rosemont", 0));
    assert_eq!(sim.active_rides().count(), 1);
}

#[test]
fn test_ride_started_before_window_never_docks() {
    let mut sim = sample_simulation(SimulationConfig::default());
    sim.run(at(9, 30), at(10, 0)).unwrap();

    // only the 09:31 ride docks at Ontario / Sicard; the 09:20 one is ignored
    let sicard = sim.station(&StationId::new("6052")).unwrap();
    assert_eq!(sicard.bike_count(), 11);
    assert_eq!(sicard.stats().ended, 1);
    let fairmount = sim.station(&StationId::new("6003")).unwrap();
    assert_eq!(fairmount.bike_count(), 8);
    assert_eq!(fairmount.stats().started, 0);
}

#[test]
fn test_identical_runs_are_deterministic() {
    let scenario = ScenarioGenerator::new(99)
        .with_stations(30)
        .with_rides(2_000)
        .with_capacity_range(3, 12)
        .generate(at(6, 0), Duration::hours(6));

    let run = || {
        let mut sim = Simulation::new(scenario.stations.clone(), scenario.rides.clone()).unwrap();
        let summary = sim.run(at(7, 0), at(11, 0)).unwrap();
        let stations: Vec<Station> = sim.stations().cloned().collect();
        (summary, stations, sim.calculate_statistics())
    };

    assert_eq!(run(), run());
}

#[test]
fn test_capacity_holds_at_every_step() {
    let scenario = ScenarioGenerator::new(5)
        .with_stations(8)
        .with_rides(3_000)
        .with_capacity_range(1, 6)
        .generate(at(6, 0), Duration::hours(4));

    let watch = CapacityWatch::default();
    let violations = Rc::clone(&watch.violations);

    let mut sim = Simulation::new(scenario.stations, scenario.rides).unwrap();
    sim.add_renderer(Box::new(watch));
    sim.run(at(6, 0), at(10, 0)).unwrap();

    assert_eq!(*violations.borrow(), 0);
    for station in sim.stations() {
        assert!(station.bike_count() <= station.capacity());
    }
}

#[test]
fn test_rides_inside_window_start_and_end_once() {
    let stations: Vec<Station> = (0..10)
        .map(|i| {
            Station::new(
                format!("S{:04}", i),
                format!("Roomy {}", i),
                Location::default(),
                1_000,
                500,
            )
        })
        .collect();
    let rides: Vec<Ride> = ScenarioGenerator::new(11)
        .with_stations(10)
        .with_rides(400)
        .generate(at(7, 0), Duration::hours(3))
        .rides;

    let (run_start, run_end) = (at(8, 0), at(9, 30));
    let started = rides
        .iter()
        .filter(|r| r.start_time() >= run_start && r.start_time() <= run_end)
        .count() as u64;
    let ended = rides
        .iter()
        .filter(|r| r.start_time() >= run_start && r.end_time() <= run_end)
        .count() as u64;

    let mut sim = Simulation::new(stations, rides).unwrap();
    let summary = sim.run(run_start, run_end).unwrap();

    let total_started: u64 = sim.stations().map(|s| s.stats().started).sum();
    let total_ended: u64 = sim.stations().map(|s| s.stats().ended).sum();
    assert_eq!(total_started, started);
    assert_eq!(total_ended, ended);
    assert_eq!(summary.events_processed, started + ended);
    assert_eq!(sim.active_rides().count() as u64, started - ended);
}
