use thiserror::Error;

/// Errors that can occur while delivering a report to a chat backend.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The request never completed (connect, timeout, TLS).
    #[error("Send failed: {0}")]
    SendFailed(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("Backend rejected message: {url} returned status {status}")]
    Rejected { url: String, status: u16 },

    /// The backend has no implementation for this payload kind.
    #[error("Payload not supported by the {backend} backend: {what}")]
    Unsupported { backend: String, what: String },

    /// The backend-specific configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}
