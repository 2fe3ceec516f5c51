//! firetv-device - Concrete device session for one Fire TV
//!
//! [`FireTvDevice`] owns the transport client for one paired device and
//! implements the [`DeviceSession`] contract: the connect/disconnect/
//! health triad plus command dispatch. Reconnect cadence and backoff
//! belong to whoever supervises the session; this crate only makes the
//! four operations cheap and predictable.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error, info, instrument, warn};

use firetv_client::{FireTvClient, FireTvClientError};
use firetv_core::{DeviceConfig, DeviceError, DeviceResult, DeviceSession, RemoteCommand};

/// Probe attempts while connecting
const CONNECT_RETRIES: u32 = 3;
/// Delay between connect probes
const CONNECT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// One paired Fire TV, driven through its stored configuration record.
///
/// The device is constructed disconnected. [`connect`] builds a
/// token-bearing client and verifies the device answers before
/// declaring the session healthy; [`send_command`] translates external
/// command strings and dispatches them over the session.
///
/// [`connect`]: DeviceSession::connect
/// [`send_command`]: DeviceSession::send_command
pub struct FireTvDevice {
    config: DeviceConfig,
    client: Option<FireTvClient>,
    connect_retries: u32,
    connect_retry_delay: Duration,
}

impl FireTvDevice {
    /// Create a disconnected device from its stored record
    pub fn new(config: DeviceConfig) -> Self {
        Self::with_connect_timing(config, CONNECT_RETRIES, CONNECT_RETRY_DELAY)
    }

    /// Create a device with custom connect probing, meant for tests
    pub fn with_connect_timing(
        config: DeviceConfig,
        connect_retries: u32,
        connect_retry_delay: Duration,
    ) -> Self {
        Self {
            config,
            client: None,
            connect_retries,
            connect_retry_delay,
        }
    }

    /// The stored device record
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    fn log_label(&self) -> String {
        self.config.log_label()
    }
}

#[async_trait]
impl DeviceSession for FireTvDevice {
    fn identifier(&self) -> &str {
        &self.config.identifier
    }

    #[instrument(skip(self), fields(device = %self.log_label()))]
    async fn connect(&mut self) -> DeviceResult<()> {
        // replace any previous session
        if let Some(mut old) = self.client.take() {
            old.close();
        }

        let client = FireTvClient::for_config(&self.config)
            .map_err(|err| DeviceError::InvalidEndpoint(err.to_string()))?;

        let answered = client
            .test_connection(self.connect_retries, self.connect_retry_delay)
            .await;
        if !answered {
            warn!("device did not answer, staying disconnected");
            return Err(DeviceError::Unreachable {
                host: self.config.host.clone(),
                port: self.config.port,
            });
        }

        info!("connected");
        self.client = Some(client);
        Ok(())
    }

    async fn disconnect(&mut self) {
        if let Some(mut client) = self.client.take() {
            client.close();
            info!(device = %self.log_label(), "disconnected");
        }
    }

    fn is_healthy(&self) -> bool {
        self.client.as_ref().is_some_and(FireTvClient::is_open)
    }

    #[instrument(skip(self), fields(device = %self.log_label()))]
    async fn send_command(&mut self, command: &str) -> DeviceResult<bool> {
        let Some(client) = self.client.as_ref() else {
            warn!(command, "command dropped, device is not connected");
            return Ok(false);
        };

        let parsed = match RemoteCommand::parse(command) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(command, error = %err, "command rejected before dispatch");
                return Ok(false);
            }
        };

        let result = match &parsed {
            RemoteCommand::Control(control) => client.send_control_command(control.action()).await,
            RemoteCommand::Media(media) => client.send_media_command(media.action()).await,
            RemoteCommand::LaunchApp { package } => client.launch_app(package).await,
        };

        match result {
            Ok(accepted) => {
                if accepted {
                    debug!(command, "command accepted");
                } else {
                    warn!(command, "device refused the command");
                }
                Ok(accepted)
            }
            Err(FireTvClientError::TokenInvalid) => {
                error!("client token rejected, device must be paired again");
                Err(DeviceError::TokenInvalid)
            }
            Err(err) => {
                error!(command, error = %err, "command failed");
                Ok(false)
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
