//! Pre-flight health check.
//!
//! PTV exposes `/v2/healthcheck`, which reports on four subsystems. A broken
//! security token or database means any query would fail or return garbage,
//! so those abort the call. Clock skew and a missing cache only make answers
//! slower or slightly less accurate; they are logged and the call proceeds.

use std::fmt;

use tracing::{debug, warn};
use url::Url;

use super::error::PtvError;
use super::signer::Signer;
use super::transport::Transport;
use super::types::HealthCheckResponse;

/// One of the four subsystems the health endpoint reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HealthCheck {
    SecurityToken,
    ClientClock,
    Memcache,
    Database,
}

impl HealthCheck {
    /// Whether a failure of this check must stop the query.
    pub fn is_fatal(&self) -> bool {
        matches!(self, HealthCheck::SecurityToken | HealthCheck::Database)
    }
}

impl fmt::Display for HealthCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HealthCheck::SecurityToken => "security token",
            HealthCheck::ClientClock => "client clock",
            HealthCheck::Memcache => "memcache",
            HealthCheck::Database => "database",
        })
    }
}

/// The service reported a fatal problem.
///
/// `failed` lists every failed check, fatal or not, in report order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("PTV health check failed: {}", join(.failed))]
pub struct HealthCheckFailure {
    pub failed: Vec<HealthCheck>,
}

fn join(checks: &[HealthCheck]) -> String {
    checks
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Apply the fatal/non-fatal policy to a health report.
pub fn evaluate(report: &HealthCheckResponse) -> Result<(), HealthCheckFailure> {
    let failed: Vec<HealthCheck> = [
        (HealthCheck::SecurityToken, report.security_token_ok),
        (HealthCheck::ClientClock, report.client_clock_ok),
        (HealthCheck::Memcache, report.memcache_ok),
        (HealthCheck::Database, report.database_ok),
    ]
    .into_iter()
    .filter(|(_, ok)| !ok)
    .map(|(check, _)| check)
    .collect();

    if failed.iter().any(HealthCheck::is_fatal) {
        return Err(HealthCheckFailure { failed });
    }

    for check in &failed {
        warn!(%check, "PTV health check degraded, continuing");
    }

    Ok(())
}

/// Build `<base>/v2/healthcheck?timestamp=<unix seconds>`, unsigned.
pub fn health_check_url(base_url: &Url, unix_seconds: i64) -> Result<Url, PtvError> {
    let mut url = super::endpoint(base_url, &["v2", "healthcheck"])?;
    url.query_pairs_mut()
        .append_pair("timestamp", &unix_seconds.to_string());
    Ok(url)
}

/// Run the signed health check and enforce the policy.
///
/// A signing failure is a configuration error; the check is never sent
/// unsigned.
pub async fn assert_healthy<T: Transport>(
    transport: &T,
    signer: &Signer,
    base_url: &Url,
    unix_seconds: i64,
) -> Result<(), PtvError> {
    let url = signer.sign(&health_check_url(base_url, unix_seconds)?)?;
    debug!(path = url.path(), "running health check");

    let body = transport.get(&url).await?;
    let report: HealthCheckResponse = super::decode(&body)?;

    evaluate(&report)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(security: bool, clock: bool, memcache: bool, database: bool) -> HealthCheckResponse {
        HealthCheckResponse {
            security_token_ok: security,
            client_clock_ok: clock,
            memcache_ok: memcache,
            database_ok: database,
        }
    }

    #[test]
    fn all_ok_passes() {
        assert!(evaluate(&report(true, true, true, true)).is_ok());
    }

    #[test]
    fn clock_and_cache_failures_are_tolerated() {
        assert!(evaluate(&report(true, false, true, true)).is_ok());
        assert!(evaluate(&report(true, true, false, true)).is_ok());
        assert!(evaluate(&report(true, false, false, true)).is_ok());
    }

    #[test]
    fn security_token_failure_is_fatal() {
        let err = evaluate(&report(false, true, true, true)).unwrap_err();
        assert_eq!(err.failed, vec![HealthCheck::SecurityToken]);
    }

    #[test]
    fn database_failure_is_fatal() {
        let err = evaluate(&report(true, true, true, false)).unwrap_err();
        assert_eq!(err.failed, vec![HealthCheck::Database]);
    }

    #[test]
    fn failure_lists_every_failed_check() {
        let err = evaluate(&report(false, false, true, false)).unwrap_err();
        assert_eq!(
            err.failed,
            vec![
                HealthCheck::SecurityToken,
                HealthCheck::ClientClock,
                HealthCheck::Database
            ]
        );
        assert_eq!(
            err.to_string(),
            "PTV health check failed: security token, client clock, database"
        );
    }

    #[test]
    fn health_url_shape() {
        let base = Url::parse("https://timetableapi.ptv.vic.gov.au").unwrap();
        let url = health_check_url(&base, 1_408_083_480).unwrap();
        assert_eq!(
            url.as_str(),
            "https://timetableapi.ptv.vic.gov.au/v2/healthcheck?timestamp=1408083480"
        );
    }
}
