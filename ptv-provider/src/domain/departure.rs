//! Lines, departures and per-station departure groups.

use chrono::{DateTime, Duration, Utc};

use super::{Location, Product};

/// A public transport line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Line {
    /// Upstream line identifier
    pub id: String,
    /// Network label, if the operator splits lines into networks
    pub network: Option<String>,
    pub product: Product,
    /// Display name (e.g. "Frankston", "86")
    pub label: String,
}

/// A single departure from a station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    /// Timetabled departure time
    pub planned_time: DateTime<Utc>,
    /// Real-time prediction, absent when no live data is known
    pub predicted_time: Option<DateTime<Utc>>,
    pub line: Line,
    /// Platform or bay, when the operator supplies one
    pub position: Option<String>,
    /// Where the service is heading (by direction, not geography)
    pub destination: Location,
}

impl Departure {
    /// The best available departure time: predicted if known, else planned.
    pub fn time(&self) -> DateTime<Utc> {
        self.predicted_time.unwrap_or(self.planned_time)
    }

    /// How late the prediction is relative to the timetable, if it is late.
    pub fn delay(&self) -> Option<Duration> {
        self.predicted_time
            .map(|predicted| predicted - self.planned_time)
            .filter(|d| *d > Duration::zero())
    }
}

/// A line together with the destination it runs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineDestination {
    pub line: Line,
    pub destination: Location,
}

/// Departures from one station, with the distinct line/destination pairs
/// that serve it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationDepartures {
    pub location: Location,
    pub departures: Vec<Departure>,
    /// Distinct line/destination pairs, in first-seen order
    pub lines: Vec<LineDestination>,
}

impl StationDepartures {
    /// Group departures for a station, deriving the line/destination pairs.
    pub fn new(location: Location, departures: Vec<Departure>) -> Self {
        let mut lines: Vec<LineDestination> = Vec::new();
        for departure in &departures {
            let pair = LineDestination {
                line: departure.line.clone(),
                destination: departure.destination.clone(),
            };
            if !lines.contains(&pair) {
                lines.push(pair);
            }
        }

        Self {
            location,
            departures,
            lines,
        }
    }
}
