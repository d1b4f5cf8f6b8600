//! Transport products.

use std::collections::BTreeSet;
use std::fmt;

/// Error returned when a PTV `transport_type` string has no known product.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transport type: {0:?}")]
pub struct UnknownTransportType(pub String);

/// A normalized transport mode.
///
/// Ordering follows the rough size of the vehicle, which is also the order
/// products are listed in a [`ProductSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Product {
    RegionalTrain,
    SuburbanTrain,
    Tram,
    Bus,
}

impl Product {
    /// All products, in display order.
    pub const ALL: [Product; 4] = [
        Product::RegionalTrain,
        Product::SuburbanTrain,
        Product::Tram,
        Product::Bus,
    ];

    /// Classify a PTV `transport_type` value.
    ///
    /// Matching is exact. There is no fallback product: a location built from
    /// an unclassifiable type would have no products at all.
    ///
    /// # Examples
    ///
    /// ```
    /// use ptv_provider::domain::Product;
    ///
    /// assert_eq!(Product::from_transport_type("vline").unwrap(), Product::RegionalTrain);
    /// assert_eq!(Product::from_transport_type("nightrider").unwrap(), Product::Bus);
    /// assert!(Product::from_transport_type("ferry").is_err());
    /// assert!(Product::from_transport_type("Train").is_err());
    /// ```
    pub fn from_transport_type(s: &str) -> Result<Self, UnknownTransportType> {
        match s {
            "train" => Ok(Product::SuburbanTrain),
            "tram" => Ok(Product::Tram),
            "bus" => Ok(Product::Bus),
            "vline" => Ok(Product::RegionalTrain),
            "nightrider" => Ok(Product::Bus),
            other => Err(UnknownTransportType(other.to_string())),
        }
    }

    /// Stable snake_case name, used in JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Product::RegionalTrain => "regional_train",
            Product::SuburbanTrain => "suburban_train",
            Product::Tram => "tram",
            Product::Bus => "bus",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-empty set of products.
///
/// There is deliberately no empty constructor, so every [`Location`] carries
/// at least one product.
///
/// [`Location`]: super::Location
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductSet(BTreeSet<Product>);

impl ProductSet {
    /// A set containing exactly one product.
    pub fn single(product: Product) -> Self {
        Self(BTreeSet::from([product]))
    }

    /// Every known product.
    pub fn all() -> Self {
        Self(Product::ALL.into_iter().collect())
    }

    /// Add a product. Returns `false` if it was already present.
    pub fn insert(&mut self, product: Product) -> bool {
        self.0.insert(product)
    }

    pub fn contains(&self, product: Product) -> bool {
        self.0.contains(&product)
    }

    /// Number of products (always at least one).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; provided for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Products in display order.
    pub fn iter(&self) -> impl Iterator<Item = Product> + '_ {
        self.0.iter().copied()
    }
}

impl From<Product> for ProductSet {
    fn from(product: Product) -> Self {
        Self::single(product)
    }
}
