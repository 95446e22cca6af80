use thiserror::Error;

/// Why an upstream provider call produced no usable payload.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid request url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("{code} {reason}")]
    Status { code: u16, reason: String },
    #[error("malformed response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Transport(e) if e.is_timeout())
    }
}
