//! Recording transport for testing without API access.
//!
//! Serves canned bodies keyed by path prefix and remembers every URL it was
//! asked for, so tests can check both what was requested and in what order.

use std::sync::Mutex;

use url::Url;

use super::transport::{Transport, TransportError};

pub const HEALTH_OK: &str = r#"{
    "securityTokenOK": true,
    "clientClockOK": true,
    "memcacheOK": true,
    "databaseOK": true
}"#;

pub const HEALTH_CLOCK_SKEWED: &str = r#"{
    "securityTokenOK": true,
    "clientClockOK": false,
    "memcacheOK": true,
    "databaseOK": true
}"#;

pub const HEALTH_DATABASE_DOWN: &str = r#"{
    "securityTokenOK": true,
    "clientClockOK": true,
    "memcacheOK": true,
    "databaseOK": false
}"#;

/// Three stops in distance order, then one with a transport type the
/// provider does not know.
pub const NEARBY: &str = r#"[
    {
        "result": {
            "suburb": "Melbourne City",
            "transport_type": "train",
            "stop_id": 1071,
            "location_name": "Flinders Street Station",
            "lat": -37.8182822,
            "lon": 144.966964,
            "distance": 120.4
        },
        "type": "stop"
    },
    {
        "result": {
            "suburb": "Melbourne City",
            "transport_type": "tram",
            "stop_id": 2175,
            "location_name": "Flinders St/Elizabeth St",
            "lat": -37.81791,
            "lon": 144.96482,
            "distance": 310.0
        },
        "type": "stop"
    },
    {
        "result": {
            "suburb": "Southbank",
            "transport_type": "bus",
            "stop_id": 19931,
            "location_name": "Southbank Bvd/City Rd",
            "lat": -37.8232,
            "lon": 144.9658,
            "distance": 640.0
        },
        "type": "stop"
    },
    {
        "result": {
            "suburb": "Southbank",
            "transport_type": "ferry",
            "stop_id": 90001,
            "location_name": "Southgate Landing",
            "lat": -37.8205,
            "lon": 144.9652,
            "distance": 900.0
        },
        "type": "stop"
    }
]"#;

pub const DEPARTURES: &str = r#"{
    "values": [
        {
            "platform": {
                "realtime_id": 0,
                "platform_number": "6",
                "stop": {
                    "suburb": "Melbourne City",
                    "transport_type": "train",
                    "stop_id": 1071,
                    "location_name": "Flinders Street Station",
                    "lat": -37.8182822,
                    "lon": 144.966964
                },
                "direction": {
                    "linedir_id": 38,
                    "direction_id": 5,
                    "direction_name": "Frankston",
                    "line": {
                        "transport_type": "train",
                        "line_id": 6,
                        "line_name": "Frankston",
                        "line_number": "Frankston"
                    }
                }
            },
            "time_timetable_utc": "2014-08-15T06:18:00Z",
            "time_realtime_utc": "2014-08-15T06:20:00Z",
            "flags": ""
        },
        {
            "platform": {
                "realtime_id": 0,
                "stop": {
                    "suburb": "Melbourne City",
                    "transport_type": "train",
                    "stop_id": 1071,
                    "location_name": "Flinders Street Station",
                    "lat": -37.8182822,
                    "lon": 144.966964
                },
                "direction": {
                    "linedir_id": 39,
                    "direction_id": 1,
                    "direction_name": "City (Flinders Street)",
                    "line": {
                        "transport_type": "train",
                        "line_id": 6,
                        "line_name": "Frankston",
                        "line_number": "Frankston"
                    }
                }
            },
            "time_timetable_utc": "2014-08-15T06:25:00Z",
            "time_realtime_utc": null,
            "flags": ""
        },
        {
            "platform": {
                "realtime_id": 0,
                "platform_number": 4,
                "stop": {
                    "suburb": "Melbourne City",
                    "transport_type": "train",
                    "stop_id": 1071,
                    "location_name": "Flinders Street Station",
                    "lat": -37.8182822,
                    "lon": 144.966964
                },
                "direction": {
                    "linedir_id": 38,
                    "direction_id": 5,
                    "direction_name": "Frankston",
                    "line": {
                        "transport_type": "train",
                        "line_id": 6,
                        "line_name": "Frankston",
                        "line_number": "Frankston"
                    }
                }
            },
            "time_timetable_utc": "2014-08-15T06:38:00Z",
            "time_realtime_utc": null,
            "flags": ""
        }
    ]
}"#;

pub const SEARCH: &str = r#"[
    {
        "result": {
            "suburb": "Melbourne City",
            "transport_type": "train",
            "stop_id": 1071,
            "location_name": "Flinders Street Station",
            "lat": -37.8182822,
            "lon": 144.966964
        },
        "type": "stop"
    },
    {
        "result": {
            "transport_type": "train",
            "line_id": 6,
            "line_name": "Frankston",
            "line_number": "Frankston"
        },
        "type": "line"
    },
    {
        "result": {
            "suburb": "Southbank",
            "transport_type": "ferry",
            "stop_id": 90001,
            "location_name": "Southgate Landing",
            "lat": -37.8205,
            "lon": 144.9652
        },
        "type": "stop"
    },
    {
        "result": {"outlet_name": "7-Eleven Flinders St"},
        "type": "myki_outlet"
    },
    {
        "result": {
            "suburb": "Melbourne City",
            "transport_type": "tram",
            "stop_id": 2175,
            "location_name": "Flinders St/Elizabeth St",
            "lat": -37.81791,
            "lon": 144.96482
        },
        "type": "stop"
    }
]"#;

#[derive(Debug, Clone)]
enum Reply {
    Body(String),
    Error(fn() -> TransportError),
}

/// Transport that answers from a fixed routing table.
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: Vec<(String, Reply)>,
    requests: Mutex<Vec<Url>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport whose health check passes.
    pub fn healthy() -> Self {
        Self::new().route("/v2/healthcheck", HEALTH_OK)
    }

    /// Answer requests whose path starts with `prefix` with `body`.
    ///
    /// Routes are tried in insertion order.
    pub fn route(mut self, prefix: &str, body: &str) -> Self {
        self.routes
            .push((prefix.to_string(), Reply::Body(body.to_string())));
        self
    }

    /// Fail requests whose path starts with `prefix`.
    pub fn fail(mut self, prefix: &str, error: fn() -> TransportError) -> Self {
        self.routes.push((prefix.to_string(), Reply::Error(error)));
        self
    }

    /// Every URL requested so far, in order.
    pub fn requests(&self) -> Vec<Url> {
        self.requests.lock().unwrap().clone()
    }

    /// Paths of every URL requested so far, in order.
    pub fn paths(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|url| url.path().to_string())
            .collect()
    }
}

impl Transport for MockTransport {
    async fn get(&self, url: &Url) -> Result<String, TransportError> {
        self.requests.lock().unwrap().push(url.clone());

        let reply = self
            .routes
            .iter()
            .find(|(prefix, _)| url.path().starts_with(prefix.as_str()))
            .map(|(_, reply)| reply.clone());

        match reply {
            Some(Reply::Body(body)) => Ok(body),
            Some(Reply::Error(make)) => Err(make()),
            None => Err(TransportError::Status {
                status: 404,
                body: format!("no mock route for {}", url.path()),
            }),
        }
    }
}
