//! PTV Timetable API client.
//!
//! Every query runs the health check first, then signs and fetches the data
//! URL and converts the response into domain types. Nothing is cached and
//! nothing is retried.

use std::fmt;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::domain::{
    Capability, Location, NearbyLocationsResult, NetworkId, Point, ProductSet,
    QueryDeparturesResult, QueryTripsResult, ResultHeader, SuggestLocationsResult,
};

use super::clock::{Clock, SystemClock};
use super::convert::{convert_departures, convert_search_results, select_nearby};
use super::credentials::Credentials;
use super::error::PtvError;
use super::health::assert_healthy;
use super::signer::Signer;
use super::transport::{ReqwestTransport, Transport};
use super::types::{DeparturesResponse, NearbyEntryDto, SearchEntryDto};

/// Production PTV Timetable API.
pub const DEFAULT_BASE_URL: &str = "https://timetableapi.ptv.vic.gov.au";

const DEFAULT_USER_AGENT: &str = concat!("ptv-provider/", env!("CARGO_PKG_VERSION"));

const SERVER_PRODUCT: &str = "ptv";
const SERVER_VERSION: &str = "v2";

/// Route type for trains in the departures path. The stop id alone
/// identifies the stop; PTV still requires a mode segment.
const DEPARTURES_MODE: &str = "0";

/// Configuration for the PTV client.
#[derive(Clone)]
pub struct PtvConfig {
    /// Developer id issued by PTV
    pub devid: String,
    /// Signing key issued alongside the devid
    pub api_key: String,
    /// Base URL for the API (defaults to production PTV)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User-Agent sent with every request
    pub user_agent: String,
}

impl PtvConfig {
    /// Create a new config with the given credentials.
    pub fn new(devid: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            devid: devid.into(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl fmt::Debug for PtvConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PtvConfig")
            .field("devid", &self.devid)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// PTV Timetable API client.
///
/// Holds only read-only state, so it can be shared behind an `Arc` as long
/// as the transport can.
pub struct PtvClient<T, C = SystemClock> {
    transport: T,
    clock: C,
    signer: Signer,
    base_url: Url,
}

impl PtvClient<ReqwestTransport> {
    /// Create a client that talks to the API over HTTP.
    pub fn new(config: PtvConfig) -> Result<Self, PtvError> {
        let transport = ReqwestTransport::new(
            Duration::from_secs(config.timeout_secs),
            &config.user_agent,
        )?;
        Self::with_transport(config, transport, SystemClock)
    }
}

impl<T: Transport, C: Clock> PtvClient<T, C> {
    /// Create a client over any transport and clock.
    ///
    /// Fails if the credentials are empty or the base URL is unusable.
    pub fn with_transport(config: PtvConfig, transport: T, clock: C) -> Result<Self, PtvError> {
        let credentials = Credentials::new(config.devid, config.api_key)?;

        let base_url = Url::parse(&config.base_url).map_err(|e| {
            PtvError::Configuration(format!("invalid base URL {:?}: {e}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(PtvError::Configuration(format!(
                "base URL cannot be a base: {base_url}"
            )));
        }

        Ok(Self {
            transport,
            clock,
            signer: Signer::new(credentials),
            base_url,
        })
    }

    /// The network this provider serves.
    pub fn network(&self) -> NetworkId {
        NetworkId::Melbourne
    }

    /// Header attached to every result.
    pub fn header(&self) -> ResultHeader {
        ResultHeader {
            network: self.network(),
            server_product: SERVER_PRODUCT,
            server_version: SERVER_VERSION,
        }
    }

    /// Operations this provider answers. Trip planning is not one of them.
    pub fn capabilities(&self) -> Vec<Capability> {
        vec![
            Capability::NearbyLocations,
            Capability::Departures,
            Capability::Suggestions,
        ]
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    /// Products searched when the caller does not choose.
    pub fn default_products(&self) -> ProductSet {
        ProductSet::all()
    }

    /// Stops near a point.
    ///
    /// # Arguments
    ///
    /// * `point` - Centre of the search
    /// * `max_distance` - Metres; only stops strictly closer are kept (0 = no bound)
    /// * `max_locations` - At most this many stops (0 = no limit)
    #[instrument(skip(self))]
    pub async fn nearby_locations(
        &self,
        point: Point,
        max_distance: u32,
        max_locations: usize,
    ) -> Result<NearbyLocationsResult, PtvError> {
        let lat = point.lat_decimal();
        let lon = point.lon_decimal();
        let url = self.endpoint(&["v2", "nearme", "latitude", &lat, "longitude", &lon])?;

        self.ensure_healthy().await?;
        let entries: Vec<NearbyEntryDto> = self.fetch(&url).await?;

        let locations = select_nearby(&entries, max_distance, max_locations)?;
        debug!(
            received = entries.len(),
            selected = locations.len(),
            "nearby stops"
        );

        Ok(NearbyLocationsResult {
            header: self.header(),
            locations,
        })
    }

    /// Departure board for a stop, grouped into one station entry.
    ///
    /// An empty board gives a result with no groups.
    #[instrument(skip(self))]
    pub async fn query_departures(
        &self,
        station_id: &str,
        max_departures: u32,
    ) -> Result<QueryDeparturesResult, PtvError> {
        let limit = max_departures.to_string();
        let url = self.endpoint(&[
            "v2",
            "mode",
            DEPARTURES_MODE,
            "stop",
            station_id,
            "departures",
            "by-destination",
            "limit",
            &limit,
        ])?;

        self.ensure_healthy().await?;
        let response: DeparturesResponse = self.fetch(&url).await?;

        let station_departures = convert_departures(&response)?;
        debug!(departures = response.values.len(), "departure board");

        Ok(QueryDeparturesResult {
            header: self.header(),
            station_departures,
        })
    }

    /// Free-text location search.
    ///
    /// Only stops are suggested; lines, unknown result types and stops of
    /// unknown modes are skipped. Rank is the position in the upstream list.
    #[instrument(skip(self))]
    pub async fn suggest_locations(&self, query: &str) -> Result<SuggestLocationsResult, PtvError> {
        let url = self.endpoint(&["v2", "search", query])?;

        self.ensure_healthy().await?;
        let entries: Vec<SearchEntryDto> = self.fetch(&url).await?;
        let suggested_locations = convert_search_results(&entries)?;
        debug!(
            received = entries.len(),
            suggested = suggested_locations.len(),
            "search results"
        );

        Ok(SuggestLocationsResult {
            header: self.header(),
            suggested_locations,
        })
    }

    /// Trip planning is not offered by PTV v2. Answers without touching the
    /// network.
    pub fn query_trips(&self, from: &Location, to: &Location) -> QueryTripsResult {
        debug!(from = %from, to = %to, "trip query not supported");
        QueryTripsResult::Unsupported {
            header: self.header(),
        }
    }

    async fn ensure_healthy(&self) -> Result<(), PtvError> {
        assert_healthy(
            &self.transport,
            &self.signer,
            &self.base_url,
            self.clock.unix_seconds(),
        )
        .await
    }

    /// Data endpoint URL. Built before the health check so bad input never
    /// reaches the network.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, PtvError> {
        super::endpoint(&self.base_url, segments)
    }

    async fn fetch<R: DeserializeOwned>(&self, url: &Url) -> Result<R, PtvError> {
        let url = self.signer.sign(url)?;
        let body = self.transport.get(&url).await?;
        super::decode(&body)
    }
}

impl<T, C> fmt::Debug for PtvClient<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PtvClient")
            .field("base_url", &self.base_url.as_str())
            .field("devid", self.signer.credentials().devid())
            .finish_non_exhaustive()
    }
}
