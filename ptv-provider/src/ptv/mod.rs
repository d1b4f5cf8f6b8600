//! PTV Timetable API (v2) client.
//!
//! This module adapts the Public Transport Victoria timetable API to the
//! provider-neutral types in [`crate::domain`].
//!
//! Key characteristics of the API:
//! - Every request must carry a `devid` and an HMAC-SHA1 `signature` over
//!   the path and query (see [`Signer`])
//! - A health endpoint reports on the security token, client clock, cache
//!   and database; every query checks it first
//! - Coordinates are floating-point degrees; the domain stores micro-degrees
//! - Only Melbourne is covered, and trip planning is not offered

mod client;
mod clock;
mod convert;
mod credentials;
mod error;
mod health;
mod signer;
mod transport;
mod types;

#[cfg(test)]
mod mock;

use serde::de::DeserializeOwned;
use url::Url;

pub use client::{DEFAULT_BASE_URL, PtvClient, PtvConfig};
pub use clock::{Clock, FixedClock, SystemClock};
pub use convert::ConversionError;
pub use credentials::{Credentials, DevId};
pub use error::PtvError;
pub use health::{HealthCheck, HealthCheckFailure};
pub use signer::{SIGNATURE_LEN, SignError, Signer};
pub use transport::{ReqwestTransport, Transport, TransportError};
pub use types::HealthCheckResponse;

/// Append path segments to the base URL, percent-encoding each one.
///
/// Any path on the base URL is kept, so a proxy prefix survives. Empty, `.`
/// and `..` segments are rejected: URL normalisation would drop or collapse
/// them and the request would reach a different endpoint.
pub(crate) fn endpoint(base_url: &Url, segments: &[&str]) -> Result<Url, PtvError> {
    if let Some(bad) = segments
        .iter()
        .find(|s| s.is_empty() || **s == "." || **s == "..")
    {
        return Err(PtvError::InvalidInput(format!(
            "{bad:?} cannot be used as a path segment"
        )));
    }

    let mut url = base_url.clone();
    url.set_query(None);
    url.path_segments_mut()
        .map_err(|()| PtvError::Configuration(format!("base URL cannot be a base: {base_url}")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Decode a JSON response body, keeping an excerpt of the body on failure.
pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> Result<T, PtvError> {
    serde_json::from_str(body).map_err(|e| PtvError::malformed(e.to_string(), body))
}
