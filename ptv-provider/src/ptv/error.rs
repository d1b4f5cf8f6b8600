//! PTV provider error types.

use std::fmt;

use crate::domain::UnknownTransportType;

use super::convert::ConversionError;
use super::health::HealthCheckFailure;
use super::signer::SignError;
use super::transport::TransportError;

/// Errors from the PTV provider.
#[derive(Debug)]
pub enum PtvError {
    /// Bad credentials, an unusable base URL, or a signing failure.
    /// Not retryable: the deployment needs fixing.
    Configuration(String),

    /// A caller-supplied value that cannot be sent as a path segment
    InvalidInput(String),

    /// The health check reported a fatal problem
    HealthCheck(HealthCheckFailure),

    /// Network or HTTP-level failure
    Transport(TransportError),

    /// The response could not be decoded or is missing required data
    MalformedResponse {
        message: String,
        body: Option<String>,
    },

    /// A stop or line with a transport type no product maps to
    UnknownTransportType(UnknownTransportType),
}

impl PtvError {
    /// Build a [`PtvError::MalformedResponse`] keeping a short excerpt of the body.
    pub fn malformed(message: impl Into<String>, body: &str) -> Self {
        PtvError::MalformedResponse {
            message: message.into(),
            body: Some(body.chars().take(500).collect()),
        }
    }

    /// Whether retrying the same call later could succeed.
    ///
    /// The provider itself never retries; this is a hint for callers.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PtvError::Transport(
                TransportError::Http(_)
                    | TransportError::RateLimited
                    | TransportError::Status { status: 500.., .. }
            )
        )
    }
}

impl fmt::Display for PtvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PtvError::Configuration(msg) => write!(f, "configuration error: {msg}"),
            PtvError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            PtvError::HealthCheck(e) => write!(f, "{e}"),
            PtvError::Transport(e) => write!(f, "{e}"),
            PtvError::MalformedResponse { message, body } => {
                write!(f, "malformed response: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            PtvError::UnknownTransportType(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for PtvError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PtvError::HealthCheck(e) => Some(e),
            PtvError::Transport(e) => Some(e),
            PtvError::UnknownTransportType(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SignError> for PtvError {
    fn from(err: SignError) -> Self {
        PtvError::Configuration(err.to_string())
    }
}

impl From<HealthCheckFailure> for PtvError {
    fn from(err: HealthCheckFailure) -> Self {
        PtvError::HealthCheck(err)
    }
}

impl From<TransportError> for PtvError {
    fn from(err: TransportError) -> Self {
        PtvError::Transport(err)
    }
}

impl From<ConversionError> for PtvError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::UnknownTransportType(e) => PtvError::UnknownTransportType(e),
            other => PtvError::MalformedResponse {
                message: other.to_string(),
                body: None,
            },
        }
    }
}
