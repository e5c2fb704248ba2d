use bikeshare_sim::generator::ScenarioGenerator;
use bikeshare_sim::Simulation;
use chrono::{Duration, NaiveDate};
use log::info;
use std::time::Instant;

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let start = NaiveDate::from_ymd_opt(2017, 6, 1)
        .and_then(|d| d.and_hms_opt(6, 0, 0))
        .ok_or("invalid benchmark start")?;
    let span = Duration::hours(12);

    println!("⏱️  Bike-share timing benchmark ({} hour window)", span.num_hours());
    println!("{:>10} {:>10} {:>12} {:>12} {:>10}", "stations", "rides", "events", "millis", "ev/ms");

    for (stations, rides) in [
        (50, 1_000),
        (200, 10_000),
        (500, 100_000),
        (1_000, 500_000),
    ] {
        let scenario = ScenarioGenerator::new(2017)
            .with_stations(stations)
            .with_rides(rides)
            .with_mean_ride_minutes(18.0)
            .generate(start, span);

        let mut sim = Simulation::new(scenario.stations, scenario.rides).map_err(|e| e.to_string())?;

        let timer = Instant::now();
        let summary = sim.run(start, start + span).map_err(|e| e.to_string())?;
        let elapsed = timer.elapsed();

        let millis = elapsed.as_secs_f64() * 1_000.0;
        println!(
            "{:>10} {:>10} {:>12} {:>12.1} {:>10.1}",
            stations,
            rides,
            summary.events_processed,
            millis,
            summary.events_processed as f64 / millis.max(f64::EPSILON)
        );
        info!("busiest start station: {:?}", sim.calculate_statistics().max_start);
    }

    Ok(())
}
