use serde_json::Value;
use thiserror::Error;

/// Failure of a single outbound call to a backend service.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("invalid upstream url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx answer. `body` is the decoded JSON payload, or the raw text
    /// wrapped in a JSON string when the backend did not answer with JSON.
    #[error("upstream responded with status {status}")]
    Status { status: u16, body: Value },
}

impl UpstreamError {
    /// Status code of the downstream answer, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            UpstreamError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// JSON error payload sent back by the backend, if any.
    pub fn body(&self) -> Option<&Value> {
        match self {
            UpstreamError::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}
