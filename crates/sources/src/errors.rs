//! Error types for upstream data fetching.

use thiserror::Error;

/// Errors raised while talking to an upstream provider.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The provider answered with a non-success HTTP status.
    #[error("{provider} returned HTTP {status}")]
    UpstreamStatus {
        /// The provider that failed
        provider: String,
        /// The HTTP status code received
        status: u16,
    },

    /// The request did not complete within the client timeout.
    #[error("{provider} timed out")]
    Timeout { provider: String },

    /// Connection-level failure (DNS, refused, TLS, reset).
    #[error("{provider} request failed: {message}")]
    Network { provider: String, message: String },

    /// The provider answered successfully but the body had the wrong shape.
    #[error("Unexpected {provider} response format: {message}")]
    UnexpectedFormat { provider: String, message: String },
}

impl SourceError {
    /// Whether the failure means the upstream is unavailable, as opposed to
    /// reachable but returning something we cannot use.
    pub fn is_unavailable(&self) -> bool {
        !matches!(self, SourceError::UnexpectedFormat { .. })
    }

    pub fn provider(&self) -> &str {
        match self {
            SourceError::UpstreamStatus { provider, .. }
            | SourceError::Timeout { provider }
            | SourceError::Network { provider, .. }
            | SourceError::UnexpectedFormat { provider, .. } => provider,
        }
    }

    pub(crate) fn from_reqwest(provider: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SourceError::Timeout {
                provider: provider.to_string(),
            }
        } else if err.is_decode() {
            SourceError::UnexpectedFormat {
                provider: provider.to_string(),
                message: err.to_string(),
            }
        } else {
            SourceError::Network {
                provider: provider.to_string(),
                message: err.to_string(),
            }
        }
    }
}
