//! Result envelopes returned by provider queries.

use std::fmt;

use super::{Location, StationDepartures};

/// Transit networks a provider can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkId {
    /// Public Transport Victoria, Melbourne
    Melbourne,
}

impl NetworkId {
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkId::Melbourne => "melbourne",
        }
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies which backend answered a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultHeader {
    pub network: NetworkId,
    pub server_product: &'static str,
    /// API version tag
    pub server_version: &'static str,
}

/// Features a provider supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    NearbyLocations,
    Departures,
    Suggestions,
    Trips,
}

/// Locations around a coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NearbyLocationsResult {
    pub header: ResultHeader,
    pub locations: Vec<Location>,
}

/// Departure board for a station.
///
/// Holds one group for the queried station, or none when the board is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDeparturesResult {
    pub header: ResultHeader,
    pub station_departures: Vec<StationDepartures>,
}

/// A location suggested for a free-text query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestedLocation {
    pub location: Location,
    /// Position of the entry in the upstream result list
    pub rank: usize,
}

/// Suggestions for a free-text query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestLocationsResult {
    pub header: ResultHeader,
    pub suggested_locations: Vec<SuggestedLocation>,
}

impl SuggestLocationsResult {
    /// The suggested locations without their ranks.
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.suggested_locations.iter().map(|s| &s.location)
    }
}

/// Outcome of a trip query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryTripsResult {
    /// The provider does not plan trips.
    Unsupported { header: ResultHeader },
}
