use super::station::{Station, StationStats};
use serde::Serialize;

/// Station holding the maximum of one tracked quantity
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StationMax {
    pub station_name: String,
    pub value: u64,
}

/// End-of-run maxima for the four per-station counters
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StatisticsReport {
    pub max_start: StationMax,
    pub max_end: StationMax,
    pub max_time_low_availability: StationMax,
    pub max_time_low_unoccupied: StationMax,
}

impl StatisticsReport {
    /// Reduce every station's counters to per-quantity maxima.
    ///
    /// Ties go to the station whose name sorts first. With no stations every
    /// entry is an empty name with value 0.
    pub fn from_stations<'a>(stations: impl IntoIterator<Item = &'a Station>) -> Self {
        let mut leaders: [Option<(&str, u64)>; 4] = [None; 4];

        for station in stations {
            let values = quantities(station.stats());
            for (leader, value) in leaders.iter_mut().zip(values) {
                let name = station.name();
                let replace = match *leader {
                    None => true,
                    Some((best_name, best)) => value > best || (value == best && name < best_name),
                };
                if replace {
                    *leader = Some((name, value));
                }
            }
        }

        let [max_start, max_end, max_low_availability, max_low_unoccupied] =
            leaders.map(|leader| {
                leader
                    .map(|(name, value)| StationMax {
                        station_name: name.to_string(),
                        value,
                    })
                    .unwrap_or_default()
            });

        Self {
            max_start,
            max_end,
            max_time_low_availability: max_low_availability,
            max_time_low_unoccupied: max_low_unoccupied,
        }
    }

    /// Entries keyed by their report name, in a fixed order
    pub fn entries(&self) -> [(&'static str, &StationMax); 4] {
        [
            ("max_start", &self.max_start),
            ("max_end", &self.max_end),
            ("max_time_low_availability", &self.max_time_low_availability),
            ("max_time_low_unoccupied", &self.max_time_low_unoccupied),
        ]
    }
}

fn quantities(stats: &StationStats) -> [u64; 4] {
    [
        stats.started,
        stats.ended,
        stats.minutes_low_availability,
        stats.minutes_low_unoccupied,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Location;

    fn station(id: &str, name: &str, capacity: u32, bikes: u32) -> Station {
        Station::new(id, name, Location::default(), capacity, bikes)
    }

    #[test]
    fn test_empty_network_reports_zeroes() {
        let report = StatisticsReport::from_stations(std::iter::empty::<&Station>());
        for (_, entry) in report.entries() {
            assert_eq!(entry, &StationMax::default());
        }
    }

    #[test]
    fn test_picks_maximum() {
        let mut a = station("1", "Alpha", 10, 5);
        let mut b = station("2", "Bravo", 10, 5);
        a.apply_start();
        b.apply_start();
        b.apply_start();
        a.apply_end();

        let report = StatisticsReport::from_stations([&a, &b]);
        assert_eq!(report.max_start.station_name, "Bravo");
        assert_eq!(report.max_start.value, 2);
        assert_eq!(report.max_end.station_name, "Alpha");
        assert_eq!(report.max_end.value, 1);
    }

    #[test]
    fn test_ties_go_to_smallest_name() {
        let zulu = station("1", "Zulu", 10, 5);
        let ten = station("2", "10e Avenue", 10, 5);
        let alpha = station("3", "alpha", 10, 5);

        let report = StatisticsReport::from_stations([&zulu, &alpha, &ten]);
        for (key, entry) in report.entries() {
            assert_eq!(entry.station_name, "10e Avenue", "{}", key);
            assert_eq!(entry.value, 0);
        }
    }

    #[test]
    fn test_serializes_with_report_keys() {
        let a = station("1", "Alpha", 10, 5);
        let report = StatisticsReport::from_stations([&a]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["max_start"]["station_name"], "Alpha");
        assert_eq!(json["max_time_low_unoccupied"]["value"], 0);
    }
}
