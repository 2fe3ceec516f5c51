//! End-to-end command tests
//!
//! External command strings go in at the device session, typed requests
//! come out on the simulator's routes. These tests pin down the whole
//! translation table over a real socket.
//!
//! Run with: cargo test -p firetv-tests --test command_e2e_test

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;

use firetv_client::testing::TestServer;
use firetv_core::{ControlCommand, DeviceConfig, DeviceSession, MediaCommand};
use firetv_device::FireTvDevice;
use firetv_sim::{create_router, CommandKind, FireTvSimulator};

// =============================================================================
// Test Helpers
// =============================================================================

struct CommandHarness {
    sim: Arc<FireTvSimulator>,
    server: TestServer,
}

impl CommandHarness {
    async fn start() -> Self {
        let sim = Arc::new(FireTvSimulator::new());
        let server = TestServer::start(create_router(sim.clone()))
            .await
            .expect("Failed to start simulator");
        Self { sim, server }
    }

    /// A connected device session holding a valid token
    async fn connected_device(&self) -> FireTvDevice {
        let config = DeviceConfig::new(
            "Test TV",
            self.server.host(),
            self.server.port(),
            self.sim.issue_token(),
        );
        let mut device =
            FireTvDevice::with_connect_timing(config, 1, Duration::from_millis(10));
        device.connect().await.expect("device should connect");
        device
    }
}

// =============================================================================
// Control and Media Round-Trips
// =============================================================================

#[tokio::test]
async fn every_control_action_reaches_the_control_route() {
    let harness = CommandHarness::start().await;
    let mut device = harness.connected_device().await;

    for command in ControlCommand::ALL {
        assert!(
            device.send_command(command.action()).await.unwrap(),
            "{} should be accepted",
            command.action()
        );
    }

    let log = harness.sim.command_log();
    assert_eq!(log.len(), ControlCommand::ALL.len());
    for (received, sent) in log.iter().zip(ControlCommand::ALL) {
        assert_eq!(received.kind, CommandKind::Control);
        assert_eq!(received.value, sent.action());
    }
}

#[tokio::test]
async fn every_media_action_reaches_the_media_route() {
    let harness = CommandHarness::start().await;
    let mut device = harness.connected_device().await;

    for command in MediaCommand::ALL {
        assert!(
            device.send_command(command.action()).await.unwrap(),
            "{} should be accepted",
            command.action()
        );
    }

    let log = harness.sim.command_log();
    assert_eq!(log.len(), MediaCommand::ALL.len());
    for (received, sent) in log.iter().zip(MediaCommand::ALL) {
        assert_eq!(received.kind, CommandKind::Media);
        assert_eq!(received.value, sent.action());
    }
}

#[tokio::test]
async fn command_names_are_case_insensitive() {
    let harness = CommandHarness::start().await;
    let mut device = harness.connected_device().await;

    assert!(device.send_command("HOME").await.unwrap());
    assert!(device.send_command("Play_Pause").await.unwrap());

    let log = harness.sim.command_log();
    // the wire always carries the canonical lowercase action names
    assert_eq!(log[0].value, "home");
    assert_eq!(log[1].value, "play_pause");
}

// =============================================================================
// App Launches
// =============================================================================

#[tokio::test]
async fn launch_command_resolves_the_registered_package() {
    let harness = CommandHarness::start().await;
    let mut device = harness.connected_device().await;

    assert!(device.send_command("LAUNCH_NETFLIX").await.unwrap());
    assert!(device.send_command("LAUNCH_PRIME_VIDEO").await.unwrap());

    let log = harness.sim.command_log();
    assert_eq!(log[0].kind, CommandKind::Launch);
    assert_eq!(log[0].value, "com.netflix.ninja");
    assert_eq!(log[1].value, "com.amazon.avod");
}

#[tokio::test]
async fn custom_app_launches_the_package_verbatim() {
    let harness = CommandHarness::start().await;
    let mut device = harness.connected_device().await;

    assert!(device
        .send_command("custom_app:org.videolan.vlc")
        .await
        .unwrap());

    let log = harness.sim.command_log();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].kind, CommandKind::Launch);
    assert_eq!(log[0].value, "org.videolan.vlc");
}

// =============================================================================
// Rejected Input
// =============================================================================

#[tokio::test]
async fn invalid_commands_never_touch_the_wire() {
    let harness = CommandHarness::start().await;
    let mut device = harness.connected_device().await;

    for bad in [
        "warp_drive",
        "LAUNCH_NOSUCHAPP",
        "custom_app:not-a-package",
        "custom_app:singleword",
        "",
    ] {
        assert!(
            !device.send_command(bad).await.unwrap(),
            "{bad:?} should be rejected"
        );
    }

    assert!(harness.sim.command_log().is_empty());
}
