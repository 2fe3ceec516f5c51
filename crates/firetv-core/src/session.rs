//! Device-session capability trait

use async_trait::async_trait;

use crate::error::DeviceResult;

/// Capability contract between a supervisor and one controlled device.
///
/// Implementations own the underlying transport session. Supervisors
/// drive the lifecycle: `connect` when the device should come online,
/// `is_healthy` on whatever cadence they choose, `connect` again when
/// health is lost, `disconnect` on shutdown. The trait deliberately
/// exposes nothing else; reconnect policy and scheduling belong to the
/// supervisor, not the device.
///
/// Callers are expected to serialize operations on one session; the
/// trait takes `&mut self` to make that explicit.
#[async_trait]
pub trait DeviceSession: Send {
    /// Stable identifier of the controlled device
    fn identifier(&self) -> &str;

    /// Establish the transport session and verify the device answers.
    ///
    /// Replaces any existing session. Returns
    /// [`DeviceError::Unreachable`](crate::DeviceError::Unreachable)
    /// when the device does not answer within the probe budget.
    async fn connect(&mut self) -> DeviceResult<()>;

    /// Tear down the transport session. Safe to call when not connected.
    async fn disconnect(&mut self);

    /// Cheap liveness check: the session exists and has not been
    /// closed. Performs no network traffic; a `true` result means
    /// commands can be attempted, not that they will succeed.
    fn is_healthy(&self) -> bool;

    /// Translate and send one external command string.
    ///
    /// Returns `Ok(true)` when the device accepted the command and
    /// `Ok(false)` for every failure that retrying or re-pairing will
    /// not fix by itself (unknown command, malformed package, device
    /// or transport failure, not connected). The single exception is a
    /// rejected credential, which surfaces as
    /// [`DeviceError::TokenInvalid`](crate::DeviceError::TokenInvalid)
    /// so the supervisor can prompt for re-pairing.
    async fn send_command(&mut self, command: &str) -> DeviceResult<bool>;
}
