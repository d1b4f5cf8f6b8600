//! Conversion from PTV DTOs to domain types.
//!
//! Conversion is strict for anything that must become a [`Location`]: a stop
//! whose transport type cannot be classified is an error, because a location
//! without products is not representable. Search results are the exception.
//! They are a heterogeneous list that PTV extends over time, so entries that
//! cannot be turned into a location are dropped instead of failing the query.

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::debug;

use crate::domain::{
    Departure, Line, Location, Point, Product, StationDepartures, SuggestedLocation,
    UnknownTransportType,
};

use super::types::{
    DepartureDto, DeparturesResponse, LineDto, NearbyEntryDto, SearchEntryDto, StopDto,
};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// A transport type with no matching product
    #[error(transparent)]
    UnknownTransportType(#[from] UnknownTransportType),

    /// Failed to parse a timestamp
    #[error("invalid time: {0}")]
    InvalidTime(String),

    /// A search result body that does not match its declared type
    #[error("invalid {kind} result: {message}")]
    InvalidResult { kind: String, message: String },
}

/// Convert a stop to a station [`Location`].
///
/// Coordinates are scaled to micro-degrees by [`Point::from_degrees`]. The
/// stop's single transport type becomes its only product.
pub fn parse_location(stop: &StopDto) -> Result<Location, ConversionError> {
    let product = Product::from_transport_type(&stop.transport_type)?;

    let mut location = Location::station(stop.stop_id.to_string(), product)
        .with_coord(Point::from_degrees(stop.lat, stop.lon))
        .with_name(stop.location_name.clone());
    if let Some(suburb) = &stop.suburb {
        location = location.with_place(suburb.clone());
    }

    Ok(location)
}

/// Turn one search entry into a suggestion, if it describes a stop.
///
/// * `"stop"` entries are parsed. A stop with an unknown transport type is
///   skipped; a body that is not a stop at all is an error.
/// * `"line"` entries are not locations and are skipped.
/// * Anything else, including an entry whose type is missing or not a
///   string, is an entry type this provider does not know yet and is skipped.
pub fn classify_search_result(
    entry: &SearchEntryDto,
    rank: usize,
) -> Result<Option<SuggestedLocation>, ConversionError> {
    match entry.kind() {
        Some("stop") => {
            let stop: StopDto = serde_json::from_value(entry.result.clone()).map_err(|e| {
                ConversionError::InvalidResult {
                    kind: "stop".to_string(),
                    message: e.to_string(),
                }
            })?;

            match parse_location(&stop) {
                Ok(location) => Ok(Some(SuggestedLocation { location, rank })),
                Err(ConversionError::UnknownTransportType(e)) => {
                    debug!(stop_id = %stop.stop_id, error = %e, "skipping search result");
                    Ok(None)
                }
                Err(e) => Err(e),
            }
        }
        Some("line") => Ok(None),
        Some(other) => {
            debug!(kind = other, rank, "skipping unrecognized search result type");
            Ok(None)
        }
        None => {
            debug!(kind = %entry.kind, rank, "skipping search result without a type");
            Ok(None)
        }
    }
}

/// Convert every search entry, keeping upstream order and index as rank.
pub fn convert_search_results(
    entries: &[SearchEntryDto],
) -> Result<Vec<SuggestedLocation>, ConversionError> {
    let mut suggestions = Vec::new();
    for (rank, entry) in entries.iter().enumerate() {
        if let Some(suggestion) = classify_search_result(entry, rank)? {
            suggestions.push(suggestion);
        }
    }
    Ok(suggestions)
}

/// Select nearby stops in upstream order.
///
/// A stop is accepted when `max_distance` is 0 or its reported distance is
/// strictly below `max_distance` metres. Stops without a reported distance
/// are never accepted under a bound. Selection stops once `max_locations`
/// stops (when non-zero) have been accepted; later entries are not
/// converted, so the result is always a prefix of the unbounded selection.
pub fn select_nearby(
    entries: &[NearbyEntryDto],
    max_distance: u32,
    max_locations: usize,
) -> Result<Vec<Location>, ConversionError> {
    let mut locations = Vec::new();

    for entry in entries {
        if max_locations > 0 && locations.len() >= max_locations {
            break;
        }

        let stop = &entry.result;
        if max_distance > 0 {
            match stop.distance {
                Some(d) if d < f64::from(max_distance) => {}
                Some(_) => continue,
                None => {
                    debug!(stop_id = %stop.stop_id, "no distance reported, skipping");
                    continue;
                }
            }
        }

        locations.push(parse_location(stop)?);
    }

    Ok(locations)
}

/// Convert a single departure.
///
/// The destination is identified by the line direction, not by any stop, and
/// inherits the line's product.
pub fn parse_departure(dto: &DepartureDto) -> Result<Departure, ConversionError> {
    let planned_time = parse_time(&dto.time_timetable_utc)?;
    let predicted_time = dto.time_realtime_utc.as_deref().map(parse_time).transpose()?;

    let direction = &dto.platform.direction;
    let raw_line = &direction.line;
    let product = Product::from_transport_type(&raw_line.transport_type)?;

    let line = Line {
        id: raw_line.line_id.to_string(),
        network: None,
        product,
        label: line_label(raw_line),
    };

    let mut destination = Location::station(direction.linedir_id.to_string(), product);
    if let Some(name) = &direction.direction_name {
        destination = destination.with_name(name.clone());
    }

    Ok(Departure {
        planned_time,
        predicted_time,
        line,
        position: dto.platform.platform_number.as_ref().map(|p| p.to_string()),
        destination,
    })
}

/// Route number when PTV gives one ("86"), else the line name.
fn line_label(line: &LineDto) -> String {
    match line.line_number.as_deref().map(str::trim) {
        Some(number) if !number.is_empty() => number.to_string(),
        _ => line.line_name.clone(),
    }
}

/// Convert a departure board into per-station groups.
///
/// All departures end up in a single group for the board's station, taken
/// from the first departure's stop. An empty board produces no group.
pub fn convert_departures(
    response: &DeparturesResponse,
) -> Result<Vec<StationDepartures>, ConversionError> {
    let Some(first) = response.values.first() else {
        return Ok(Vec::new());
    };

    let station = parse_location(&first.platform.stop)?;
    let departures = response
        .values
        .iter()
        .map(parse_departure)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(vec![StationDepartures::new(station, departures)])
}

/// Parse an ISO 8601 timestamp.
///
/// Accepts RFC 3339 (with `Z` or an offset). A timestamp without any offset
/// is taken to be UTC, matching the `_utc` suffix of the PTV field names.
pub fn parse_time(s: &str) -> Result<DateTime<Utc>, ConversionError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| ConversionError::InvalidTime(s.to_string()))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::ptv::types::RawId;
    use proptest::prelude::*;

    fn entries_strategy() -> impl Strategy<Value = Vec<NearbyEntryDto>> {
        proptest::collection::vec(proptest::option::of(0.0f64..2000.0), 0..30).prop_map(
            |distances| {
                distances
                    .into_iter()
                    .enumerate()
                    .map(|(i, distance)| NearbyEntryDto {
                        result: StopDto {
                            stop_id: RawId::Int(i as i64),
                            location_name: format!("Stop {i}"),
                            suburb: None,
                            transport_type: "tram".to_string(),
                            lat: -37.8,
                            lon: 144.9,
                            distance,
                        },
                        kind: Some("stop".to_string()),
                    })
                    .collect()
            },
        )
    }

    proptest! {
        /// Every accepted stop is strictly inside the bound
        #[test]
        fn distance_bound_holds(entries in entries_strategy(), bound in 1u32..2000) {
            let selected = select_nearby(&entries, bound, 0).unwrap();
            for loc in &selected {
                let idx: usize = loc.id.parse().unwrap();
                let d = entries[idx].result.distance.unwrap();
                prop_assert!(d < f64::from(bound));
            }
        }

        /// A limited selection is a prefix of the unlimited one
        #[test]
        fn limit_yields_prefix(entries in entries_strategy(), bound in 0u32..2000, limit in 1usize..10) {
            let all = select_nearby(&entries, bound, 0).unwrap();
            let limited = select_nearby(&entries, bound, limit).unwrap();
            prop_assert!(limited.len() <= limit);
            prop_assert_eq!(&limited[..], &all[..limited.len()]);
            prop_assert_eq!(limited.len(), all.len().min(limit));
        }
    }
}
