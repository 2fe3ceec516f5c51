//! Stored device record and identity derivation

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default Fire TV remote API port
pub const DEFAULT_PORT: u16 = 8080;

/// Configuration record for one paired Fire TV.
///
/// This is what pairing produces and what integrations persist. The
/// bearer token lives only here; it is never written anywhere else and
/// never logged in full (the `Debug` impl masks it).
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Stable identifier derived from host and port, see [`device_identifier`]
    pub identifier: String,
    /// Human-readable device name
    pub name: String,
    /// Device host (IP address or hostname)
    pub host: String,
    /// Device port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Bearer token issued by the device during pairing
    pub token: String,
    /// When the token was issued; absent on hand-written records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paired_at: Option<DateTime<Utc>>,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl DeviceConfig {
    /// Assemble a record for a freshly paired device
    pub fn new(
        name: impl Into<String>,
        host: impl Into<String>,
        port: u16,
        token: impl Into<String>,
    ) -> Self {
        let host = host.into();
        Self {
            identifier: device_identifier(&host, port),
            name: name.into(),
            host,
            port,
            token: token.into(),
            paired_at: Some(Utc::now()),
        }
    }

    /// Display form used in log messages, e.g. `Living Room (192.168.1.10)`
    pub fn log_label(&self) -> String {
        format!("{} ({})", self.name, self.host)
    }
}

impl fmt::Debug for DeviceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceConfig")
            .field("identifier", &self.identifier)
            .field("name", &self.name)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("token", &mask_token(&self.token))
            .field("paired_at", &self.paired_at)
            .finish()
    }
}

/// Derive the stable identifier for a device at `host:port`.
///
/// Deterministic: pairing the same endpoint twice yields the same
/// identifier, so a re-pair overwrites the existing record instead of
/// creating a duplicate.
pub fn device_identifier(host: &str, port: u16) -> String {
    format!("firetv_{}_{}", host.replace('.', "_"), port)
}

/// Mask a bearer token for display and logging.
///
/// Empty tokens render as `<none>`, short ones as `***`, longer ones
/// keep a four-character prefix.
pub fn mask_token(token: &str) -> String {
    if token.is_empty() {
        return "<none>".to_string();
    }
    if token.chars().count() < 8 {
        return "***".to_string();
    }
    let prefix: String = token.chars().take(4).collect();
    format!("{prefix}...")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn identifier_replaces_dots() {
        assert_eq!(device_identifier("192.168.1.10", 8080), "firetv_192_168_1_10_8080");
    }

    #[test]
    fn identifier_is_deterministic() {
        assert_eq!(
            device_identifier("10.0.0.2", 8009),
            device_identifier("10.0.0.2", 8009)
        );
    }

    #[test]
    fn identifier_distinguishes_ports() {
        assert_ne!(
            device_identifier("10.0.0.2", 8080),
            device_identifier("10.0.0.2", 8443)
        );
    }

    #[test]
    fn token_masking() {
        assert_eq!(mask_token(""), "<none>");
        assert_eq!(mask_token("abc"), "***");
        assert_eq!(mask_token("abcdef123456"), "abcd...");
    }

    #[test]
    fn debug_never_prints_token() {
        let config = DeviceConfig::new("Living Room", "192.168.1.10", 8080, "f00dcafe".repeat(8));
        let rendered = format!("{config:?}");
        assert!(!rendered.contains(&"f00dcafe".repeat(8)));
        assert!(rendered.contains("f00d..."));
    }

    #[test]
    fn port_defaults_on_deserialize() {
        let record = r#"{
            "identifier": "firetv_192_168_1_10_8080",
            "name": "Living Room",
            "host": "192.168.1.10",
            "token": "deadbeef"
        }"#;
        let config: DeviceConfig = serde_json::from_str(record).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.paired_at.is_none());
    }
}
