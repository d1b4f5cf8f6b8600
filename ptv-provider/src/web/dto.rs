//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{
    Departure, LineDestination, Location, NearbyLocationsResult, QueryDeparturesResult,
    ResultHeader, StationDepartures, SuggestLocationsResult, SuggestedLocation,
};

/// Request for stops near a coordinate.
#[derive(Debug, Deserialize)]
pub struct NearbyRequest {
    /// Latitude in degrees
    pub lat: f64,

    /// Longitude in degrees
    pub lon: f64,

    /// Only stops closer than this many metres (omitted or 0 = no bound)
    pub max_distance: Option<u32>,

    /// At most this many stops (omitted or 0 = no limit)
    pub max_locations: Option<usize>,
}

/// Query parameters for a departure board.
#[derive(Debug, Deserialize)]
pub struct DeparturesRequest {
    /// Maximum departures to return
    pub limit: Option<u32>,
}

/// Free-text location search.
#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    pub q: String,
}

/// Which backend answered.
#[derive(Debug, Serialize)]
pub struct HeaderResult {
    pub network: String,
    pub server_product: String,
    pub server_version: String,
}

/// A location in any response.
#[derive(Debug, Serialize)]
pub struct LocationResult {
    /// Stop identifier
    pub id: String,

    /// Location type (always "station" for PTV)
    #[serde(rename = "type")]
    pub kind: String,

    /// Display name
    pub name: Option<String>,

    /// Suburb
    pub place: Option<String>,

    /// Latitude in degrees
    pub lat: Option<f64>,

    /// Longitude in degrees
    pub lon: Option<f64>,

    /// Products served, e.g. `["suburban_train"]`
    pub products: Vec<String>,
}

/// Response for a nearby query.
#[derive(Debug, Serialize)]
pub struct NearbyResponse {
    pub header: HeaderResult,
    pub locations: Vec<LocationResult>,
}

/// A line as shown on a departure board.
#[derive(Debug, Serialize)]
pub struct LineResult {
    pub id: String,
    pub label: String,
    pub product: String,
}

/// A single departure.
#[derive(Debug, Serialize)]
pub struct DepartureResult {
    /// Timetabled time (RFC 3339)
    pub planned_time: String,

    /// Real-time estimate (RFC 3339), if available
    pub predicted_time: Option<String>,

    /// Minutes late, when the prediction is behind the timetable
    pub delay_mins: Option<i64>,

    pub line: LineResult,

    /// Platform or bay
    pub platform: Option<String>,

    /// Where the service is heading
    pub destination: LocationResult,
}

/// A line and where it goes.
#[derive(Debug, Serialize)]
pub struct LineDestinationResult {
    pub line: LineResult,
    pub destination: LocationResult,
}

/// Departures from one station.
#[derive(Debug, Serialize)]
pub struct StationDeparturesResult {
    pub station: LocationResult,
    pub departures: Vec<DepartureResult>,
    pub lines: Vec<LineDestinationResult>,
}

/// Response for a departure board.
#[derive(Debug, Serialize)]
pub struct DeparturesResponse {
    pub header: HeaderResult,
    /// Empty when the station has no upcoming departures
    pub stations: Vec<StationDeparturesResult>,
}

/// A suggestion with its position in the upstream ranking.
#[derive(Debug, Serialize)]
pub struct SuggestionResult {
    pub rank: usize,
    pub location: LocationResult,
}

/// Response for a location search.
#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub header: HeaderResult,
    pub suggestions: Vec<SuggestionResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Whether the same request may succeed later
    pub retryable: bool,
}

// Conversion implementations

impl HeaderResult {
    pub fn from_header(header: &ResultHeader) -> Self {
        Self {
            network: header.network.to_string(),
            server_product: header.server_product.to_string(),
            server_version: header.server_version.to_string(),
        }
    }
}

impl LocationResult {
    /// Create from a domain Location.
    pub fn from_location(location: &Location) -> Self {
        Self {
            id: location.id.clone(),
            kind: location.kind.as_str().to_string(),
            name: location.name.clone(),
            place: location.place.clone(),
            lat: location.coord.map(|c| c.lat_degrees()),
            lon: location.coord.map(|c| c.lon_degrees()),
            products: location
                .products
                .iter()
                .map(|p| p.as_str().to_string())
                .collect(),
        }
    }
}

impl NearbyResponse {
    pub fn from_result(result: &NearbyLocationsResult) -> Self {
        Self {
            header: HeaderResult::from_header(&result.header),
            locations: result
                .locations
                .iter()
                .map(LocationResult::from_location)
                .collect(),
        }
    }
}

impl LineResult {
    fn from_line(line: &crate::domain::Line) -> Self {
        Self {
            id: line.id.clone(),
            label: line.label.clone(),
            product: line.product.as_str().to_string(),
        }
    }
}

impl DepartureResult {
    /// Create from a domain Departure.
    pub fn from_departure(departure: &Departure) -> Self {
        Self {
            planned_time: departure.planned_time.to_rfc3339(),
            predicted_time: departure.predicted_time.map(|t| t.to_rfc3339()),
            delay_mins: departure.delay().map(|d| d.num_minutes()),
            line: LineResult::from_line(&departure.line),
            platform: departure.position.clone(),
            destination: LocationResult::from_location(&departure.destination),
        }
    }
}

impl LineDestinationResult {
    fn from_line_destination(ld: &LineDestination) -> Self {
        Self {
            line: LineResult::from_line(&ld.line),
            destination: LocationResult::from_location(&ld.destination),
        }
    }
}

impl StationDeparturesResult {
    pub fn from_station_departures(group: &StationDepartures) -> Self {
        Self {
            station: LocationResult::from_location(&group.location),
            departures: group
                .departures
                .iter()
                .map(DepartureResult::from_departure)
                .collect(),
            lines: group
                .lines
                .iter()
                .map(LineDestinationResult::from_line_destination)
                .collect(),
        }
    }
}

impl DeparturesResponse {
    pub fn from_result(result: &QueryDeparturesResult) -> Self {
        Self {
            header: HeaderResult::from_header(&result.header),
            stations: result
                .station_departures
                .iter()
                .map(StationDeparturesResult::from_station_departures)
                .collect(),
        }
    }
}

impl SuggestionResult {
    fn from_suggestion(suggestion: &SuggestedLocation) -> Self {
        Self {
            rank: suggestion.rank,
            location: LocationResult::from_location(&suggestion.location),
        }
    }
}

impl SuggestResponse {
    pub fn from_result(result: &SuggestLocationsResult) -> Self {
        Self {
            header: HeaderResult::from_header(&result.header),
            suggestions: result
                .suggested_locations
                .iter()
                .map(SuggestionResult::from_suggestion)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Line, NetworkId, Point, Product};
    use chrono::{TimeZone, Utc};

    fn header() -> ResultHeader {
        ResultHeader {
            network: NetworkId::Melbourne,
            server_product: "ptv",
            server_version: "v2",
        }
    }

    fn flinders_street() -> Location {
        Location::station("1071", Product::SuburbanTrain)
            .with_coord(Point::new(-37_818_282, 144_966_964))
            .with_name("Flinders Street Station")
            .with_place("Melbourne City")
    }

    fn frankston_departure(minute: u32, predicted: Option<u32>) -> Departure {
        Departure {
            planned_time: Utc.with_ymd_and_hms(2014, 8, 15, 6, minute, 0).unwrap(),
            predicted_time: predicted
                .map(|m| Utc.with_ymd_and_hms(2014, 8, 15, 6, m, 0).unwrap()),
            line: Line {
                id: "6".into(),
                network: None,
                product: Product::SuburbanTrain,
                label: "Frankston".into(),
            },
            position: Some("6".into()),
            destination: Location::station("38", Product::SuburbanTrain).with_name("Frankston"),
        }
    }

    #[test]
    fn location_result_from_location() {
        let result = LocationResult::from_location(&flinders_street());

        assert_eq!(result.id, "1071");
        assert_eq!(result.kind, "station");
        assert_eq!(result.name.as_deref(), Some("Flinders Street Station"));
        assert_eq!(result.place.as_deref(), Some("Melbourne City"));
        assert!((result.lat.unwrap() - -37.818282).abs() < 1e-9);
        assert!((result.lon.unwrap() - 144.966964).abs() < 1e-9);
        assert_eq!(result.products, vec!["suburban_train"]);
    }

    #[test]
    fn location_without_coord() {
        let location = Location::station("38", Product::Tram);
        let result = LocationResult::from_location(&location);
        assert!(result.lat.is_none());
        assert!(result.lon.is_none());
    }

    #[test]
    fn departure_result_delay() {
        let result = DepartureResult::from_departure(&frankston_departure(18, Some(20)));

        assert_eq!(result.planned_time, "2014-08-15T06:18:00+00:00");
        assert_eq!(
            result.predicted_time.as_deref(),
            Some("2014-08-15T06:20:00+00:00")
        );
        assert_eq!(result.delay_mins, Some(2));
        assert_eq!(result.line.product, "suburban_train");
        assert_eq!(result.destination.name.as_deref(), Some("Frankston"));

        let on_time = DepartureResult::from_departure(&frankston_departure(25, None));
        assert!(on_time.predicted_time.is_none());
        assert!(on_time.delay_mins.is_none());
    }

    #[test]
    fn departures_response_groups() {
        let group = StationDepartures::new(
            flinders_street(),
            vec![frankston_departure(18, None), frankston_departure(38, None)],
        );
        let result = QueryDeparturesResult {
            header: header(),
            station_departures: vec![group],
        };

        let response = DeparturesResponse::from_result(&result);
        assert_eq!(response.header.network, "melbourne");
        assert_eq!(response.stations.len(), 1);
        assert_eq!(response.stations[0].departures.len(), 2);
        assert_eq!(response.stations[0].lines.len(), 1);
    }

    #[test]
    fn suggest_response_keeps_rank() {
        let result = SuggestLocationsResult {
            header: header(),
            suggested_locations: vec![SuggestedLocation {
                location: flinders_street(),
                rank: 3,
            }],
        };

        let response = SuggestResponse::from_result(&result);
        assert_eq!(response.suggestions[0].rank, 3);
        assert_eq!(response.header.server_product, "ptv");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["suggestions"][0]["location"]["type"], "station");
    }

    #[test]
    fn nearby_request_optional_fields() {
        let req: NearbyRequest = serde_json::from_str(r#"{"lat": -37.8, "lon": 144.9}"#).unwrap();
        assert!(req.max_distance.is_none());
        assert!(req.max_locations.is_none());
    }
}
