//! Error types for the Fire TV client

use thiserror::Error;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, FireTvClientError>;

/// Errors that can occur when communicating with a Fire TV
#[derive(Debug, Error)]
pub enum FireTvClientError {
    /// HTTP request failed (connection refused, timeout, etc.)
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Invalid device URL
    #[error("Invalid device URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// IO error (test server setup)
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Operation attempted after the session was closed
    #[error("Client session is closed")]
    SessionClosed,

    /// The device rejected the client token; the stored credential is
    /// no longer valid and the device must be paired again
    #[error("Device rejected the client token; pair the device again to obtain a new one")]
    TokenInvalid,
}
