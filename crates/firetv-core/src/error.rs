//! Common error types for device sessions

use thiserror::Error;

/// Result type for device-session operations
pub type DeviceResult<T> = Result<T, DeviceError>;

/// Errors that can occur while driving a device session
#[derive(Debug, Error)]
pub enum DeviceError {
    /// The device rejected the stored bearer token. Commands cannot
    /// succeed until the device is paired again.
    #[error("authentication token rejected by the device; run pairing again to obtain a new token")]
    TokenInvalid,

    /// The device could not be reached during connect
    #[error(
        "cannot reach Fire TV at {host}:{port}: check that the device is powered on, \
         that the IP address is correct (try ports 8080, 8009 or 8443), \
         and that no firewall is blocking the connection"
    )]
    Unreachable {
        /// Configured device host
        host: String,
        /// Configured device port
        port: u16,
    },

    /// The configured host/port could not be turned into a usable endpoint
    #[error("invalid device endpoint: {0}")]
    InvalidEndpoint(String),
}

impl DeviceError {
    /// True when the only remediation is to pair the device again
    pub fn requires_repairing(&self) -> bool {
        matches!(self, DeviceError::TokenInvalid)
    }
}
