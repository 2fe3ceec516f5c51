//! Interactive PIN pairing flow
//!
//! Pairing is a two-step exchange driven by whoever owns the user
//! interface: [`PairingFlow::begin_pairing`] makes the device show a
//! PIN on screen, [`PairingFlow::submit_pin`] trades that PIN for the
//! durable bearer token and returns the assembled device record. All
//! state between the two steps lives in this machine and is cleared on
//! success, failure and abandonment, so a fresh attempt always starts
//! clean.

use std::time::Duration;

use tracing::{info, instrument, warn};

use firetv_core::DeviceConfig;

use crate::client::FireTvClient;

/// Client name shown on the TV screen while the PIN is displayed
pub const CLIENT_FRIENDLY_NAME: &str = "FireTV Bridge";

/// Delay between the wake request and the first probe; a device waking
/// from sleep needs a moment to bring its HTTP service up
const SETTLE_DELAY: Duration = Duration::from_secs(3);
/// Probe attempts while starting a pairing attempt
const CONNECT_RETRIES: u32 = 3;
/// Delay between probe attempts
const CONNECT_RETRY_DELAY: Duration = Duration::from_secs(3);

/// Result type for pairing operations
pub type Result<T> = std::result::Result<T, PairingError>;

/// Pairing errors; messages are written for end users
#[derive(Debug, thiserror::Error)]
pub enum PairingError {
    /// `begin_pairing` called with a blank host
    #[error("an IP address or hostname is required to start pairing")]
    MissingHost,

    /// The host/port could not be turned into a request URL
    #[error("invalid device address {host}:{port}: {reason}")]
    InvalidAddress {
        host: String,
        port: u16,
        reason: String,
    },

    /// The device never answered the reachability probes
    #[error(
        "cannot reach Fire TV at {host}:{port}: ensure the device is powered on, \
         verify the IP address, try ports 8080, 8009 or 8443, and check that no \
         firewall is blocking the connection"
    )]
    Unreachable { host: String, port: u16 },

    /// The device answered probes but refused to display a PIN
    #[error("Fire TV refused to display a pairing PIN; restart the device and try again")]
    PinRequestRejected,

    /// `submit_pin` called with a blank PIN
    #[error("a PIN is required")]
    EmptyPin,

    /// `submit_pin` called without a preceding successful `begin_pairing`
    #[error("no pairing attempt is in progress; start pairing before submitting a PIN")]
    NotAwaitingPin,

    /// The device did not accept the PIN
    #[error("PIN verification failed: check the PIN shown on the TV screen and try again")]
    VerificationFailed,
}

/// Observable phase of the pairing machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairingPhase {
    /// No attempt in progress
    Idle,
    /// A PIN is on screen, waiting to be read back
    AwaitingPin,
    /// The last attempt produced a device record
    Completed,
    /// The last attempt failed after the device was reached
    Failed,
}

/// Returned by [`PairingFlow::begin_pairing`]: the device at
/// `host:port` is now displaying a PIN that the user must read back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinChallenge {
    /// Host that is displaying the PIN
    pub host: String,
    /// Port the pairing continues on
    pub port: u16,
}

/// Transient data carried from `begin_pairing` to `submit_pin`.
/// Exists only while the machine is awaiting a PIN.
#[derive(Debug, Clone)]
struct PairingContext {
    host: String,
    port: u16,
    name: String,
}

enum State {
    Idle,
    AwaitingPin(PairingContext),
    Completed,
    Failed,
}

/// Two-step pairing state machine.
///
/// One instance handles one attempt at a time; starting a new attempt
/// discards whatever the previous one left behind. Temporary clients
/// created for the exchange are closed on every exit path.
pub struct PairingFlow {
    state: State,
    settle_delay: Duration,
    connect_retries: u32,
    connect_retry_delay: Duration,
}

impl Default for PairingFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl PairingFlow {
    /// Create a flow with production timing (3 s settle, 3 probes
    /// spaced 3 s apart)
    pub fn new() -> Self {
        Self::with_timing(SETTLE_DELAY, CONNECT_RETRIES, CONNECT_RETRY_DELAY)
    }

    /// Create a flow with custom timing, meant for tests and callers
    /// that know the device is already awake
    pub fn with_timing(
        settle_delay: Duration,
        connect_retries: u32,
        connect_retry_delay: Duration,
    ) -> Self {
        Self {
            state: State::Idle,
            settle_delay,
            connect_retries,
            connect_retry_delay,
        }
    }

    /// Current phase of the machine
    pub fn phase(&self) -> PairingPhase {
        match &self.state {
            State::Idle => PairingPhase::Idle,
            State::AwaitingPin(_) => PairingPhase::AwaitingPin,
            State::Completed => PairingPhase::Completed,
            State::Failed => PairingPhase::Failed,
        }
    }

    /// Abandon the current attempt and drop its context
    pub fn reset(&mut self) {
        self.state = State::Idle;
    }

    /// Step one: wake the device, verify it answers, and have it
    /// display a pairing PIN.
    ///
    /// `name` becomes the stored device name; when absent it defaults
    /// to `Fire TV ({host})`. On success the machine holds the pairing
    /// context and waits for [`submit_pin`](Self::submit_pin). A blank
    /// host fails immediately without any network traffic.
    #[instrument(skip(self))]
    pub async fn begin_pairing(
        &mut self,
        host: &str,
        port: u16,
        name: Option<&str>,
    ) -> Result<PinChallenge> {
        // a new attempt always starts from scratch
        self.state = State::Idle;

        let host = host.trim();
        if host.is_empty() {
            return Err(PairingError::MissingHost);
        }

        info!(host, port, "starting pairing");
        let mut client =
            FireTvClient::new(host, port).map_err(|err| PairingError::InvalidAddress {
                host: host.to_string(),
                port,
                reason: err.to_string(),
            })?;

        // wake first: a sleeping device will not answer probes
        client.wake().await;
        tokio::time::sleep(self.settle_delay).await;

        let reachable = client
            .test_connection(self.connect_retries, self.connect_retry_delay)
            .await;
        if !reachable {
            client.close();
            warn!(host, port, "device unreachable, aborting pairing");
            return Err(PairingError::Unreachable {
                host: host.to_string(),
                port,
            });
        }

        let accepted = client.request_pin(CLIENT_FRIENDLY_NAME).await;
        client.close();
        if !accepted {
            self.state = State::Failed;
            return Err(PairingError::PinRequestRejected);
        }

        let name = name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(ToString::to_string)
            .unwrap_or_else(|| format!("Fire TV ({host})"));

        self.state = State::AwaitingPin(PairingContext {
            host: host.to_string(),
            port,
            name,
        });
        info!(host, port, "device is displaying a PIN");
        Ok(PinChallenge {
            host: host.to_string(),
            port,
        })
    }

    /// Step two: exchange the on-screen PIN for a bearer token and
    /// assemble the device record.
    ///
    /// A blank PIN is a validation error and clears the pairing
    /// context; calling this without a pending attempt is a usage
    /// error. Neither touches the network. On a wrong PIN the machine
    /// returns to idle so the whole flow can be retried.
    #[instrument(skip(self, pin))]
    pub async fn submit_pin(&mut self, pin: &str) -> Result<DeviceConfig> {
        let pin = pin.trim();
        if pin.is_empty() {
            // clear any pending context so the next attempt starts clean
            self.state = State::Idle;
            return Err(PairingError::EmptyPin);
        }

        let context = match std::mem::replace(&mut self.state, State::Idle) {
            State::AwaitingPin(context) => context,
            previous => {
                self.state = previous;
                return Err(PairingError::NotAwaitingPin);
            }
        };

        let mut client = FireTvClient::new(&context.host, context.port).map_err(|err| {
            PairingError::InvalidAddress {
                host: context.host.clone(),
                port: context.port,
                reason: err.to_string(),
            }
        })?;
        let token = client.verify_pin(pin).await;
        client.close();

        match token {
            Some(token) => {
                let config = DeviceConfig::new(context.name, context.host, context.port, token);
                self.state = State::Completed;
                info!(identifier = %config.identifier, "pairing completed");
                Ok(config)
            }
            None => {
                warn!(host = %context.host, "PIN verification failed");
                Err(PairingError::VerificationFailed)
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Timing that would make any accidental sleep or retry obvious
    fn sluggish_flow() -> PairingFlow {
        PairingFlow::with_timing(Duration::from_secs(60), 3, Duration::from_secs(60))
    }

    #[tokio::test]
    async fn blank_host_fails_before_any_network_or_sleep() {
        let mut flow = sluggish_flow();
        let started = std::time::Instant::now();

        let result = flow.begin_pairing("   ", 8080, None).await;

        assert!(matches!(result, Err(PairingError::MissingHost)));
        assert_eq!(flow.phase(), PairingPhase::Idle);
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn submit_without_begin_is_a_usage_error() {
        let mut flow = sluggish_flow();
        let started = std::time::Instant::now();

        let result = flow.submit_pin("1234").await;

        assert!(matches!(result, Err(PairingError::NotAwaitingPin)));
        assert_eq!(flow.phase(), PairingPhase::Idle);
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn blank_pin_is_a_validation_error() {
        let mut flow = sluggish_flow();

        let result = flow.submit_pin("  ").await;

        assert!(matches!(result, Err(PairingError::EmptyPin)));
        assert_eq!(flow.phase(), PairingPhase::Idle);
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut flow = PairingFlow::new();
        flow.reset();
        assert_eq!(flow.phase(), PairingPhase::Idle);
    }

    #[test]
    fn errors_read_like_instructions() {
        let unreachable = PairingError::Unreachable {
            host: "192.168.1.10".to_string(),
            port: 8080,
        };
        let message = unreachable.to_string();
        assert!(message.contains("192.168.1.10:8080"));
        assert!(message.contains("powered on"));
        assert!(message.contains("8443"));
    }
}
