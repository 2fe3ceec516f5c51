//! Saved device records for firetv-cli

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use firetv_core::DeviceConfig;

/// Device records persisted between invocations
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CliConfig {
    /// Paired devices
    #[serde(default)]
    pub devices: Vec<DeviceConfig>,
}

impl CliConfig {
    /// Load records from a file, or defaults when the file does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read device file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse device file: {}", path.display()))
    }

    /// Persist the records, creating the parent directory as needed
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize device records")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write device file: {}", path.display()))
    }

    /// Get the default device file path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("firetv-cli");

        Ok(config_dir.join("devices.toml"))
    }

    /// Add a record, replacing any existing record with the same identifier
    pub fn upsert(&mut self, device: DeviceConfig) {
        self.devices
            .retain(|existing| existing.identifier != device.identifier);
        self.devices.push(device);
    }

    /// Resolve a record by identifier. When no identifier is given, the
    /// single saved record is used; anything else is an error.
    pub fn select(&self, identifier: Option<&str>) -> Result<&DeviceConfig> {
        match identifier {
            Some(id) => self
                .devices
                .iter()
                .find(|device| device.identifier == id)
                .with_context(|| {
                    format!("No saved device '{}'. Run 'firetv-cli devices' to list them", id)
                }),
            None => match self.devices.as_slice() {
                [] => bail!("No saved devices. Pair one first with 'firetv-cli pair --host <HOST>'"),
                [only] => Ok(only),
                _ => bail!("Several devices are saved. Pick one with --device <ID>"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(host: &str, name: &str) -> DeviceConfig {
        DeviceConfig::new(name, host, 8080, "token-1234567890")
    }

    #[test]
    fn load_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig::load_from(&dir.path().join("devices.toml")).unwrap();
        assert!(config.devices.is_empty());
    }

    #[test]
    fn save_and_reload_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("devices.toml");

        let mut config = CliConfig::default();
        config.upsert(record("192.168.1.10", "Living Room"));
        config.save_to(&path).unwrap();

        let reloaded = CliConfig::load_from(&path).unwrap();
        assert_eq!(reloaded.devices.len(), 1);
        assert_eq!(reloaded.devices[0].name, "Living Room");
        assert_eq!(reloaded.devices[0].identifier, "firetv_192_168_1_10_8080");
    }

    #[test]
    fn upsert_replaces_by_identifier() {
        let mut config = CliConfig::default();
        config.upsert(record("192.168.1.10", "Old Name"));
        config.upsert(record("192.168.1.10", "New Name"));

        assert_eq!(config.devices.len(), 1);
        assert_eq!(config.devices[0].name, "New Name");
    }

    #[test]
    fn select_prefers_explicit_identifier() {
        let mut config = CliConfig::default();
        config.upsert(record("192.168.1.10", "Living Room"));
        config.upsert(record("192.168.1.11", "Bedroom"));

        let picked = config.select(Some("firetv_192_168_1_11_8080")).unwrap();
        assert_eq!(picked.name, "Bedroom");
        assert!(config.select(Some("firetv_10_0_0_1_8080")).is_err());
    }

    #[test]
    fn select_without_identifier_needs_exactly_one_record() {
        let mut config = CliConfig::default();
        assert!(config.select(None).is_err());

        config.upsert(record("192.168.1.10", "Living Room"));
        assert_eq!(config.select(None).unwrap().name, "Living Room");

        config.upsert(record("192.168.1.11", "Bedroom"));
        assert!(config.select(None).is_err());
    }
}
