//! Simulated device state
//!
//! One [`FireTvSimulator`] value is one device. Tests construct their
//! own instance, share it with the router through an `Arc`, and use the
//! introspection methods to observe what the device saw.

use std::collections::HashSet;

use parking_lot::RwLock;
use rand::Rng;
use tracing::{debug, info};
use uuid::Uuid;

/// What kind of command route a request arrived on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Navigation, volume and power (`/v1/FireTV`)
    Control,
    /// Playback (`/v1/media`)
    Media,
    /// App launch (`/v1/FireTV/app/{package}`)
    Launch,
}

/// A command the simulated device accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedCommand {
    /// Route the command arrived on
    pub kind: CommandKind,
    /// Action name, or the package for launches
    pub value: String,
}

/// Outcome of a PIN verification attempt
pub(crate) enum PinOutcome {
    /// No pairing request is active
    NoWindow,
    /// A request is active but the PIN does not match
    WrongPin,
    /// PIN matched; carries the freshly issued token
    Issued(String),
}

/// In-memory Fire TV device.
///
/// Mirrors the observable behavior of the real device's local API:
/// a pairing request opens a PIN window, a correct PIN mints a durable
/// bearer token, and command routes accept any token minted here until
/// it is revoked.
pub struct FireTvSimulator {
    /// When set, every pairing request displays this PIN instead of a
    /// random one
    fixed_pin: Option<String>,
    pin_request_active: RwLock<bool>,
    current_pin: RwLock<Option<String>>,
    issued_tokens: RwLock<HashSet<String>>,
    command_log: RwLock<Vec<ReceivedCommand>>,
    wake_count: RwLock<u32>,
    probe_count: RwLock<u32>,
    pin_verify_count: RwLock<u32>,
    probe_failures_remaining: RwLock<u32>,
}

impl Default for FireTvSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl FireTvSimulator {
    /// Create a device that shows a fresh random PIN per pairing request
    pub fn new() -> Self {
        Self {
            fixed_pin: None,
            pin_request_active: RwLock::new(false),
            current_pin: RwLock::new(None),
            issued_tokens: RwLock::new(HashSet::new()),
            command_log: RwLock::new(Vec::new()),
            wake_count: RwLock::new(0),
            probe_count: RwLock::new(0),
            pin_verify_count: RwLock::new(0),
            probe_failures_remaining: RwLock::new(0),
        }
    }

    /// Create a device that always shows the given PIN
    pub fn with_fixed_pin(pin: &str) -> Self {
        let mut sim = Self::new();
        sim.fixed_pin = Some(pin.to_string());
        sim
    }

    // =========================================================================
    // Device behavior (called by the handlers)
    // =========================================================================

    pub(crate) fn record_wake(&self) {
        *self.wake_count.write() += 1;
        debug!("wake request received");
    }

    /// Count a probe; false means the device should answer 503
    pub(crate) fn record_probe(&self) -> bool {
        *self.probe_count.write() += 1;
        let mut remaining = self.probe_failures_remaining.write();
        if *remaining > 0 {
            *remaining -= 1;
            return false;
        }
        true
    }

    /// Open the pairing window and return the PIN now "on screen"
    pub(crate) fn open_pin_window(&self) -> String {
        let pin = match &self.fixed_pin {
            Some(pin) => pin.clone(),
            None => format!("{:04}", rand::thread_rng().gen_range(0..10000u32)),
        };
        *self.current_pin.write() = Some(pin.clone());
        *self.pin_request_active.write() = true;
        pin
    }

    /// Check a submitted PIN against the open window.
    ///
    /// A match closes the window and mints a token; a mismatch leaves
    /// the window open for another attempt.
    pub(crate) fn check_pin(&self, pin: &str) -> PinOutcome {
        *self.pin_verify_count.write() += 1;
        if !*self.pin_request_active.read() {
            return PinOutcome::NoWindow;
        }
        let matches = self
            .current_pin
            .read()
            .as_deref()
            .is_some_and(|current| current == pin);
        if !matches {
            return PinOutcome::WrongPin;
        }

        *self.pin_request_active.write() = false;
        *self.current_pin.write() = None;
        let token = self.issue_token();
        info!("pairing completed, token issued");
        PinOutcome::Issued(token)
    }

    /// Whether the token was minted here and is still valid
    pub(crate) fn token_valid(&self, token: Option<&str>) -> bool {
        match token {
            Some(token) => self.issued_tokens.read().contains(token),
            None => false,
        }
    }

    pub(crate) fn record_command(&self, kind: CommandKind, value: &str) {
        self.command_log.write().push(ReceivedCommand {
            kind,
            value: value.to_string(),
        });
    }

    // =========================================================================
    // Test introspection and fault injection
    // =========================================================================

    /// The PIN currently on screen, if a pairing window is open
    pub fn current_pin(&self) -> Option<String> {
        self.current_pin.read().clone()
    }

    /// Whether a pairing window is open
    pub fn is_pin_request_active(&self) -> bool {
        *self.pin_request_active.read()
    }

    /// Every command the device accepted, in arrival order
    pub fn command_log(&self) -> Vec<ReceivedCommand> {
        self.command_log.read().clone()
    }

    /// Number of wake requests received
    pub fn wake_count(&self) -> u32 {
        *self.wake_count.read()
    }

    /// Number of probes received
    pub fn probe_count(&self) -> u32 {
        *self.probe_count.read()
    }

    /// Number of PIN verification attempts received
    pub fn pin_verify_count(&self) -> u32 {
        *self.pin_verify_count.read()
    }

    /// Make the next `count` probes answer 503
    pub fn inject_probe_failures(&self, count: u32) {
        *self.probe_failures_remaining.write() = count;
    }

    /// Mint a valid token directly, bypassing pairing
    pub fn issue_token(&self) -> String {
        let token = Uuid::new_v4().simple().to_string();
        self.issued_tokens.write().insert(token.clone());
        token
    }

    /// Invalidate every issued token, as a factory reset would
    pub fn revoke_all_tokens(&self) {
        self.issued_tokens.write().clear();
        info!("all client tokens revoked");
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pin_window_lifecycle() {
        let sim = FireTvSimulator::with_fixed_pin("4321");
        assert!(!sim.is_pin_request_active());

        let shown = sim.open_pin_window();
        assert_eq!(shown, "4321");
        assert!(sim.is_pin_request_active());
        assert_eq!(sim.current_pin().as_deref(), Some("4321"));

        // wrong attempt leaves the window open
        assert!(matches!(sim.check_pin("0000"), PinOutcome::WrongPin));
        assert!(sim.is_pin_request_active());

        // correct attempt closes it and issues a token
        let PinOutcome::Issued(token) = sim.check_pin("4321") else {
            panic!("expected a token");
        };
        assert!(!sim.is_pin_request_active());
        assert!(sim.current_pin().is_none());
        assert!(sim.token_valid(Some(&token)));
    }

    #[test]
    fn verify_without_window_is_rejected() {
        let sim = FireTvSimulator::new();
        assert!(matches!(sim.check_pin("1234"), PinOutcome::NoWindow));
    }

    #[test]
    fn random_pin_is_four_digits() {
        let sim = FireTvSimulator::new();
        let pin = sim.open_pin_window();
        assert_eq!(pin.len(), 4);
        assert!(pin.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn revocation_invalidates_tokens() {
        let sim = FireTvSimulator::new();
        let token = sim.issue_token();
        assert!(sim.token_valid(Some(&token)));

        sim.revoke_all_tokens();
        assert!(!sim.token_valid(Some(&token)));
        assert!(!sim.token_valid(None));
    }

    #[test]
    fn probe_failure_injection_is_consumed() {
        let sim = FireTvSimulator::new();
        sim.inject_probe_failures(2);
        assert!(!sim.record_probe());
        assert!(!sim.record_probe());
        assert!(sim.record_probe());
        assert_eq!(sim.probe_count(), 3);
    }
}
