//! HTTP transport used to reach the PTV API.
//!
//! The provider only ever issues plain GET requests and reads the body as
//! text, so the seam is a single method. [`ReqwestTransport`] is the real
//! implementation; tests plug in their own.

use std::future::Future;
use std::time::Duration;

use url::Url;

/// Errors from the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Network failure, timeout, or undecodable body
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API rejected our credentials or signature
    #[error("unauthorized (check devid and signing key)")]
    Unauthorized,

    #[error("rate limited by PTV API")]
    RateLimited,

    /// Any other non-success status
    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },
}

/// A GET-only HTTP client.
pub trait Transport {
    /// Fetch `url` and return the response body.
    fn get(&self, url: &Url) -> impl Future<Output = Result<String, TransportError>> + Send;
}

/// [`Transport`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport with the given timeout and user agent.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { http })
    }

    /// Wrap an existing client.
    pub fn from_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl Transport for ReqwestTransport {
    async fn get(&self, url: &Url) -> Result<String, TransportError> {
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(TransportError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TransportError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TransportError::Status {
            status: 500,
            body: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");
        assert_eq!(TransportError::RateLimited.to_string(), "rate limited by PTV API");
        assert!(TransportError::Unauthorized.to_string().contains("unauthorized"));
    }

    #[test]
    fn transport_creation() {
        let transport = ReqwestTransport::new(Duration::from_secs(5), "ptv-provider-test");
        assert!(transport.is_ok());
    }
}
