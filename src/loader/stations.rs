use super::LoadError;
use crate::core::station::Station;
use crate::core::types::{Location, StationId};
use log::{info, warn};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[derive(Debug, Deserialize)]
struct StationFeed {
    stations: Vec<serde_json::Value>,
}

/// Feed values arrive as numbers or as numeric strings depending on the source
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Number(serde_json::Number),
    Text(String),
}

impl Scalar {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => n.as_f64(),
            Scalar::Text(s) => s.trim().parse().ok(),
        }
    }

    fn as_count(&self) -> Option<u32> {
        let value = self.as_f64()?;
        if value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
            return None;
        }
        Some(value as u32)
    }

    fn as_key(&self) -> String {
        match self {
            Scalar::Number(n) => n.to_string(),
            Scalar::Text(s) => s.trim().to_string(),
        }
    }
}

/// One station record: id, name, latitude, longitude, docked bikes, free docks
#[derive(Debug, Deserialize)]
struct RawStation {
    n: Scalar,
    s: String,
    la: Scalar,
    lo: Scalar,
    da: Scalar,
    ba: Scalar,
}

impl RawStation {
    fn into_station(self) -> Option<Station> {
        let id = self.n.as_key();
        if id.is_empty() {
            return None;
        }
        let location = Location::new(self.lo.as_f64()?, self.la.as_f64()?);
        let bike_count = self.da.as_count()?;
        let capacity = bike_count.checked_add(self.ba.as_count()?)?;

        Some(Station::new(id, self.s, location, capacity, bike_count))
    }
}

/// Read a station feed of the form `{"stations": [{"n", "s", "la", "lo", "da", "ba"}, ..]}`.
///
/// Capacity is docked bikes plus free docks. When an id repeats, the later
/// record wins.
pub fn load_stations<R: Read>(reader: R) -> Result<BTreeMap<StationId, Station>, LoadError> {
    let feed: StationFeed = serde_json::from_reader(reader)?;
    let total = feed.stations.len();

    let mut stations = BTreeMap::new();
    for (index, value) in feed.stations.into_iter().enumerate() {
        let station = serde_json::from_value::<RawStation>(value)
            .ok()
            .and_then(RawStation::into_station);

        match station {
            Some(station) => {
                if let Some(previous) = stations.insert(station.id().clone(), station) {
                    warn!("Station '{}' listed more than once; keeping the last record", previous.id());
                }
            }
            None => warn!("Skipping malformed station record #{}", index),
        }
    }

    info!("Loaded {} of {} station records", stations.len(), total);
    Ok(stations)
}

pub fn load_stations_file(
    path: impl AsRef<Path>,
) -> Result<BTreeMap<StationId, Station>, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_stations(BufReader::new(file))
}
