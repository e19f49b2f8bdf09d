//! Shared error types for the request layer.

use thiserror::Error;

/// Errors emitted by the API client and the domain services built on it.
///
/// Each call either completes or fails once: there are no retries, timeouts
/// beyond the HTTP client's defaults, or offline queues at this layer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// The backend rejected the bearer token. The stored token has already
    /// been cleared by the time this surfaces; the view should return to the
    /// login screen.
    #[error("session expired, please sign in again")]
    Unauthorized,
    /// The backend answered with a non-success status. `message` is the
    /// backend-supplied error text when the body carried one.
    #[error("{message}")]
    Backend {
        status: reqwest::StatusCode,
        message: String,
    },
    /// Transport-level failure: no usable response.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    /// The response body did not decode as the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(#[source] serde_json::Error),
    /// Login succeeded at the HTTP level but the body carried no token.
    #[error("server response carried no token")]
    MissingToken,
}

impl ApiError {
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

/// Errors emitted by the token store.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TokenStoreError {
    #[error("failed to persist token: {0}")]
    Write(#[source] std::io::Error),
    #[error("failed to remove token: {0}")]
    Clear(#[source] std::io::Error),
}
