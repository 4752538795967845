//! Capability-level error types.

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single capability invocation.
///
/// These never cross the tool boundary: the `#[tool]` adapters in
/// [`crate::service`] flatten them into the plain strings the tool-calling
/// client expects.
#[derive(Debug, Error)]
pub enum CapabilityError {
    /// Upstream replied with a non-success status.
    #[error("upstream returned {status}: {body}")]
    UpstreamStatus { status: StatusCode, body: String },
    /// Transport-level failure (DNS, TLS, connect, read).
    #[error(transparent)]
    Transport(reqwest::Error),
    /// Body was not the JSON shape the provider documents.
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(#[from] serde_json::Error),
    /// The JSON parsed but an expected field was absent.
    #[error("missing field: {0}")]
    MissingField(&'static str),
    /// Caller input that cannot be turned into a request.
    #[error("{0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for CapabilityError {
    fn from(err: reqwest::Error) -> Self {
        // The URL can carry an API key in its query string; strip it so
        // flattened error messages never surface a credential.
        CapabilityError::Transport(err.without_url())
    }
}
