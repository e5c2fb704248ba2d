use bikeshare_sim::loader::{load_rides_file, load_stations_file, RIDE_TIME_FORMAT};
use bikeshare_sim::{RecordingRenderer, Simulation, SimulationConfig, Timestamp};
use chrono::NaiveDateTime;
use clap::Parser;
use log::info;
use std::path::PathBuf;

/// Run the bike-share simulation over a window and print station statistics
#[derive(Debug, Parser)]
#[command(name = "bikeshare", version)]
struct Args {
    /// Station feed (JSON)
    #[arg(long)]
    stations: PathBuf,

    /// Ride feed (CSV)
    #[arg(long)]
    rides: PathBuf,

    /// Window start, e.g. "2017-06-01 08:00"
    #[arg(long, value_parser = parse_time)]
    start: Timestamp,

    /// Window end, inclusive
    #[arg(long, value_parser = parse_time)]
    end: Timestamp,

    /// Accumulate low-occupancy time on the step that lands on the window end
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    final_tick: bool,

    /// Print active ride and docked bike counts for every step
    #[arg(long)]
    trace: bool,
}

fn parse_time(value: &str) -> Result<Timestamp, String> {
    NaiveDateTime::parse_from_str(value, RIDE_TIME_FORMAT)
        .map_err(|err| format!("expected {}: {}", RIDE_TIME_FORMAT, err))
}

fn main() -> Result<(), String> {
    env_logger::init();
    let args = Args::parse();

    let stations = load_stations_file(&args.stations).map_err(|e| e.to_string())?;
    let rides = load_rides_file(&args.rides, &stations).map_err(|e| e.to_string())?;
    info!("{} stations, {} rides", stations.len(), rides.len());

    let config = SimulationConfig::new().with_final_tick(args.final_tick);
    let mut sim = Simulation::with_config(stations.into_values(), rides, config)
        .map_err(|e| e.to_string())?;

    let recorder = RecordingRenderer::new();
    let frames = recorder.frames();
    if args.trace {
        sim.add_renderer(Box::new(recorder));
    }

    let summary = sim.run(args.start, args.end).map_err(|e| e.to_string())?;
    info!(
        "{} steps, {} events processed",
        summary.steps, summary.events_processed
    );

    for frame in frames.borrow().iter() {
        println!(
            "{}  active={:<5} docked={}",
            frame.time, frame.active_rides, frame.docked_bikes
        );
    }

    let report = sim.calculate_statistics();
    let json = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
    println!("{}", json);
    Ok(())
}
