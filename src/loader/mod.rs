//! Loaders that turn station and ride feeds into core types.
//!
//! A feed that cannot be read or parsed as a whole is an error. Individual
//! records that are malformed, or that reference stations we do not know
//! about, are skipped and logged.

pub mod rides;
pub mod stations;

pub use rides::{load_rides, load_rides_file, RIDE_TIME_FORMAT};
pub use stations::{load_stations, load_stations_file};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid station feed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid ride feed: {0}")]
    Csv(#[from] csv::Error),
}
