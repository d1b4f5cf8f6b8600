//! Domain types for the PTV provider.
//!
//! These are the normalized, operator-independent values the provider hands
//! back to callers. Invariants are enforced at construction time: a
//! [`Location`] always carries at least one [`Product`], and coordinates are
//! fixed-point micro-degrees.

mod departure;
mod location;
mod product;
mod result;

pub use departure::{Departure, Line, LineDestination, StationDepartures};
pub use location::{Location, LocationType, Point, micro_degrees};
pub use product::{Product, ProductSet, UnknownTransportType};
pub use result::{
    Capability, NearbyLocationsResult, NetworkId, QueryDeparturesResult, QueryTripsResult,
    ResultHeader, SuggestLocationsResult, SuggestedLocation,
};
