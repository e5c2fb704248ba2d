use super::LoadError;
use crate::core::ride::Ride;
use crate::core::station::Station;
use crate::core::types::{StationId, Timestamp};
use chrono::NaiveDateTime;
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Timestamp layout used by ride feeds
pub const RIDE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

fn parse_time(field: &str) -> Option<Timestamp> {
    NaiveDateTime::parse_from_str(field, RIDE_TIME_FORMAT).ok()
}

fn parse_record(
    record: &csv::StringRecord,
    stations: &BTreeMap<StationId, Station>,
) -> Option<Ride> {
    let start_time = parse_time(record.get(0)?)?;
    let start_station = StationId::new(record.get(1)?);
    let end_time = parse_time(record.get(2)?)?;
    let end_station = StationId::new(record.get(3)?);

    if !stations.contains_key(&start_station) || !stations.contains_key(&end_station) {
        return None;
    }
    Ride::new(start_station, end_station, start_time, end_time).ok()
}

/// Read headerless ride rows `start_time,start_station,end_time,end_station`.
///
/// Rows with an unknown station, an unreadable timestamp, or a ride that does
/// not end after it starts are dropped. Row order is preserved.
pub fn load_rides<R: Read>(
    reader: R,
    stations: &BTreeMap<StationId, Station>,
) -> Result<Vec<Ride>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rides = Vec::new();
    let mut skipped = 0usize;
    for (line, result) in csv_reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                warn!("Skipping unreadable ride row {}: {}", line + 1, err);
                skipped += 1;
                continue;
            }
        };

        match parse_record(&record, stations) {
            Some(ride) => rides.push(ride),
            None => {
                debug!("Skipping ride row {}: {:?}", line + 1, record);
                skipped += 1;
            }
        }
    }

    info!("Loaded {} rides, skipped {}", rides.len(), skipped);
    Ok(rides)
}

pub fn load_rides_file(
    path: impl AsRef<Path>,
    stations: &BTreeMap<StationId, Station>,
) -> Result<Vec<Ride>, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_rides(BufReader::new(file), stations)
}
