use thiserror::Error;

/// Errors from the upstream data providers.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// A data provider answered with a non-success HTTP status.
    #[error("Upstream unavailable: {url} returned status {status}")]
    UpstreamUnavailable { url: String, status: u16 },

    /// Schedule data did not have the expected shape (missing game index,
    /// missing or unparsable date field).
    #[error("Malformed schedule: {0}")]
    MalformedSchedule(String),

    /// Transport-level failure (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A response body could not be decoded into the expected model.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// An API credential could not be used to build the request.
    #[error("Invalid API credential: {0}")]
    InvalidCredential(String),
}

pub type Result<T> = std::result::Result<T, ProviderError>;
