//! Locations and fixed-point coordinates.

use std::fmt;

use super::ProductSet;

/// Scale between degrees and the fixed-point micro-degree representation.
const MICRO: f64 = 1_000_000.0;

/// Values closer than this to a whole number of micro-degrees are treated as
/// that whole number before truncating.
const SNAP_EPSILON: f64 = 1e-6;

/// Convert degrees to integer micro-degrees.
///
/// The product `degrees * 1e6` is truncated toward zero. Binary floating point
/// cannot represent most six-decimal values exactly (`134.14673 * 1e6` is
/// `134146729.99999999`), so results within [`SNAP_EPSILON`] of an integer are
/// snapped to it first. Inputs with at most six decimals therefore convert
/// exactly, and extra precision is dropped toward zero.
///
/// # Examples
///
/// ```
/// use ptv_provider::domain::micro_degrees;
///
/// assert_eq!(micro_degrees(-37.8265648), -37_826_564);
/// assert_eq!(micro_degrees(134.14673), 134_146_730);
/// assert_eq!(micro_degrees(144.9819169), 144_981_916);
/// ```
pub fn micro_degrees(degrees: f64) -> i32 {
    let scaled = degrees * MICRO;
    let nearest = scaled.round();
    if (scaled - nearest).abs() < SNAP_EPSILON {
        nearest as i32
    } else {
        scaled.trunc() as i32
    }
}

/// A WGS84 coordinate in micro-degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    /// Latitude × 1e6
    pub lat: i32,
    /// Longitude × 1e6
    pub lon: i32,
}

impl Point {
    pub fn new(lat: i32, lon: i32) -> Self {
        Self { lat, lon }
    }

    /// Build a point from floating-point degrees, see [`micro_degrees`].
    pub fn from_degrees(lat: f64, lon: f64) -> Self {
        Self {
            lat: micro_degrees(lat),
            lon: micro_degrees(lon),
        }
    }

    pub fn lat_degrees(&self) -> f64 {
        f64::from(self.lat) / MICRO
    }

    pub fn lon_degrees(&self) -> f64 {
        f64::from(self.lon) / MICRO
    }

    /// Latitude as an exact decimal string with six fractional digits.
    pub fn lat_decimal(&self) -> String {
        format_micro(self.lat)
    }

    /// Longitude as an exact decimal string with six fractional digits.
    pub fn lon_decimal(&self) -> String {
        format_micro(self.lon)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat_decimal(), self.lon_decimal())
    }
}

/// Format micro-degrees without going through floating point.
fn format_micro(value: i32) -> String {
    let sign = if value < 0 { "-" } else { "" };
    let abs = i64::from(value).unsigned_abs();
    format!("{sign}{}.{:06}", abs / 1_000_000, abs % 1_000_000)
}

/// Kind of location. PTV only yields stops, so stations are the only kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationType {
    Station,
}

impl LocationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationType::Station => "station",
        }
    }
}

/// A place served by public transport.
///
/// Identifiers come straight from the PTV API and are stable across calls.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    /// Upstream identifier (stop id, or line-direction id for destinations)
    pub id: String,
    pub kind: LocationType,
    /// Coordinates, absent for locations known only by direction
    pub coord: Option<Point>,
    /// Human-readable name
    pub name: Option<String>,
    /// Area or suburb label
    pub place: Option<String>,
    /// Products serving this location (never empty)
    pub products: ProductSet,
}

impl Location {
    /// A station with only an identifier and its products.
    pub fn station(id: impl Into<String>, products: impl Into<ProductSet>) -> Self {
        Self {
            id: id.into(),
            kind: LocationType::Station,
            coord: None,
            name: None,
            place: None,
            products: products.into(),
        }
    }

    pub fn with_coord(mut self, coord: Point) -> Self {
        self.coord = Some(coord);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_place(mut self, place: impl Into<String>) -> Self {
        self.place = Some(place.into());
        self
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.place, &self.name) {
            (Some(place), Some(name)) => write!(f, "{name}, {place} [{}]", self.id),
            (None, Some(name)) => write!(f, "{name} [{}]", self.id),
            _ => write!(f, "[{}]", self.id),
        }
    }
}
