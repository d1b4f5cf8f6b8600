//! PTV Timetable API v2 response DTOs.
//!
//! These types map directly to the JSON the API returns. Fields the API may
//! send as `null` or leave out are `Option`; everything else is required and
//! a missing value fails deserialization of the whole response.

use std::fmt;

use serde::Deserialize;

/// An identifier the API sends either as a number or as a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Int(i64),
    Str(String),
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawId::Int(n) => write!(f, "{n}"),
            RawId::Str(s) => f.write_str(s),
        }
    }
}

/// Response from `/v2/healthcheck`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthCheckResponse {
    /// Whether the devid/signature pair was accepted.
    #[serde(rename = "securityTokenOK")]
    pub security_token_ok: bool,

    /// Whether our timestamp is close enough to server time.
    #[serde(rename = "clientClockOK")]
    pub client_clock_ok: bool,

    /// Whether the server-side cache is up.
    #[serde(rename = "memcacheOK")]
    pub memcache_ok: bool,

    /// Whether the timetable database is reachable.
    #[serde(rename = "databaseOK")]
    pub database_ok: bool,
}

/// A stop, as embedded in nearby, search and departure responses.
#[derive(Debug, Clone, Deserialize)]
pub struct StopDto {
    /// Stop identifier.
    pub stop_id: RawId,

    /// Stop name (e.g. "Flinders Street Station").
    pub location_name: String,

    /// Suburb the stop is in.
    pub suburb: Option<String>,

    /// Mode of transport: "train", "tram", "bus", "vline" or "nightrider".
    pub transport_type: String,

    /// Latitude in degrees.
    pub lat: f64,

    /// Longitude in degrees.
    pub lon: f64,

    /// Distance from the query point in metres (nearby queries only).
    pub distance: Option<f64>,
}

/// One element of the `/v2/nearme/...` array.
#[derive(Debug, Clone, Deserialize)]
pub struct NearbyEntryDto {
    /// The stop itself.
    pub result: StopDto,

    /// Result type; always "stop" in practice.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// One element of the `/v2/search/...` array.
///
/// The shape of `result` depends on `kind`, so it is kept as raw JSON until
/// the discriminator has been inspected. Both fields are optional so that one
/// odd entry cannot fail the whole list.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchEntryDto {
    /// Result type: "stop", "line", or anything the API adds later.
    /// Kept raw because it may be missing, null, or not a string.
    #[serde(rename = "type", default)]
    pub kind: serde_json::Value,

    /// The result body.
    #[serde(default)]
    pub result: serde_json::Value,
}

impl SearchEntryDto {
    /// The discriminator, if it is a string.
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_str()
    }
}

/// Response from `/v2/mode/0/stop/{id}/departures/by-destination/limit/{n}`.
#[derive(Debug, Clone, Deserialize)]
pub struct DeparturesResponse {
    /// Departures, grouped by destination upstream.
    pub values: Vec<DepartureDto>,
}

/// A single departure.
#[derive(Debug, Clone, Deserialize)]
pub struct DepartureDto {
    /// Timetabled departure time (ISO 8601, UTC).
    pub time_timetable_utc: String,

    /// Real-time departure estimate; null when no live data is available.
    pub time_realtime_utc: Option<String>,

    /// Where and on what the service departs.
    pub platform: PlatformDto,
}

/// The platform a departure leaves from.
#[derive(Debug, Clone, Deserialize)]
pub struct PlatformDto {
    /// Platform number or bay, if known.
    pub platform_number: Option<RawId>,

    /// The stop the platform belongs to.
    pub stop: StopDto,

    /// The direction the service is travelling in.
    pub direction: DirectionDto,
}

/// A direction of travel on a line.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionDto {
    /// Line-direction identifier.
    pub linedir_id: RawId,

    /// Human-readable destination (e.g. "Frankston").
    pub direction_name: Option<String>,

    /// The line being travelled.
    pub line: LineDto,
}

/// A line.
#[derive(Debug, Clone, Deserialize)]
pub struct LineDto {
    /// Line identifier.
    pub line_id: RawId,

    /// Line name (e.g. "Frankston", "East Coburg - South Melbourne Beach").
    pub line_name: String,

    /// Short route number (e.g. "86"); trains repeat the line name here.
    pub line_number: Option<String>,

    /// Mode of transport, as on [`StopDto`].
    pub transport_type: String,
}
