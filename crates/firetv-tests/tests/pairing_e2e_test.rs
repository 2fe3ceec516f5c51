//! End-to-end pairing tests
//!
//! These tests run the complete PIN exchange against the device
//! simulator over a real socket: wake, reachability probing, PIN
//! display, verification and the assembled device record.
//!
//! Run with: cargo test -p firetv-tests --test pairing_e2e_test

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;

use firetv_client::testing::TestServer;
use firetv_client::{FireTvClient, PairingError, PairingFlow, PairingPhase};
use firetv_sim::{create_router, FireTvSimulator};

// =============================================================================
// Test Helpers
// =============================================================================

/// Simulated device plus the server publishing it on localhost
struct PairingHarness {
    sim: Arc<FireTvSimulator>,
    server: TestServer,
}

impl PairingHarness {
    async fn start() -> Self {
        let sim = Arc::new(FireTvSimulator::with_fixed_pin("1234"));
        let server = TestServer::start(create_router(sim.clone()))
            .await
            .expect("Failed to start simulator");
        Self { sim, server }
    }

    fn host(&self) -> String {
        self.server.host()
    }

    fn port(&self) -> u16 {
        self.server.port()
    }
}

/// Pairing flow without the production sleeps
fn fast_flow() -> PairingFlow {
    PairingFlow::with_timing(Duration::ZERO, 3, Duration::from_millis(20))
}

/// A localhost port with nothing listening on it
fn dead_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

// =============================================================================
// Happy Path
// =============================================================================

#[tokio::test]
async fn pairing_happy_path_produces_a_working_record() {
    let harness = PairingHarness::start().await;
    let mut flow = fast_flow();

    let challenge = flow
        .begin_pairing(&harness.host(), harness.port(), None)
        .await
        .unwrap();
    assert_eq!(challenge.host, harness.host());
    assert_eq!(flow.phase(), PairingPhase::AwaitingPin);

    // the device woke up, answered a probe and is showing the PIN
    assert_eq!(harness.sim.wake_count(), 1);
    assert!(harness.sim.probe_count() >= 1);
    assert!(harness.sim.is_pin_request_active());
    assert_eq!(harness.sim.current_pin().as_deref(), Some("1234"));

    let config = flow.submit_pin("1234").await.unwrap();
    assert_eq!(flow.phase(), PairingPhase::Completed);
    assert_eq!(
        config.identifier,
        format!("firetv_127_0_0_1_{}", harness.port())
    );
    assert_eq!(config.name, format!("Fire TV ({})", harness.host()));
    assert!(config.paired_at.is_some());

    // the stored token must authenticate command routes
    let client = FireTvClient::for_config(&config).unwrap();
    assert!(client.send_control_command("home").await.unwrap());
}

#[tokio::test]
async fn pairing_keeps_the_requested_device_name() {
    let harness = PairingHarness::start().await;
    let mut flow = fast_flow();

    flow.begin_pairing(&harness.host(), harness.port(), Some("Living Room"))
        .await
        .unwrap();
    let config = flow.submit_pin("1234").await.unwrap();

    assert_eq!(config.name, "Living Room");
    assert_eq!(config.log_label(), format!("Living Room ({})", harness.host()));
}

// =============================================================================
// Failure Paths
// =============================================================================

#[tokio::test]
async fn wrong_pin_returns_the_flow_to_idle() {
    let harness = PairingHarness::start().await;
    let mut flow = fast_flow();

    flow.begin_pairing(&harness.host(), harness.port(), None)
        .await
        .unwrap();

    let result = flow.submit_pin("0000").await;
    assert!(matches!(result, Err(PairingError::VerificationFailed)));
    assert_eq!(flow.phase(), PairingPhase::Idle);

    // the device keeps its window open; a fresh attempt succeeds
    assert!(harness.sim.is_pin_request_active());
    flow.begin_pairing(&harness.host(), harness.port(), None)
        .await
        .unwrap();
    assert!(flow.submit_pin("1234").await.is_ok());
}

#[tokio::test]
async fn blank_pin_clears_the_pending_attempt_without_network() {
    let harness = PairingHarness::start().await;
    let mut flow = fast_flow();

    flow.begin_pairing(&harness.host(), harness.port(), None)
        .await
        .unwrap();
    let verifies_before = harness.sim.pin_verify_count();

    let result = flow.submit_pin("   ").await;
    assert!(matches!(result, Err(PairingError::EmptyPin)));
    assert_eq!(flow.phase(), PairingPhase::Idle);
    assert_eq!(harness.sim.pin_verify_count(), verifies_before);

    // the context is gone, a bare retry is now a usage error
    let result = flow.submit_pin("1234").await;
    assert!(matches!(result, Err(PairingError::NotAwaitingPin)));
}

#[tokio::test]
async fn submit_without_begin_makes_no_requests() {
    let harness = PairingHarness::start().await;
    let mut flow = fast_flow();

    let result = flow.submit_pin("1234").await;
    assert!(matches!(result, Err(PairingError::NotAwaitingPin)));

    assert_eq!(harness.sim.wake_count(), 0);
    assert_eq!(harness.sim.probe_count(), 0);
    assert_eq!(harness.sim.pin_verify_count(), 0);
}

#[tokio::test]
async fn unreachable_device_aborts_the_attempt() {
    let mut flow = PairingFlow::with_timing(Duration::ZERO, 1, Duration::from_millis(10));

    let result = flow.begin_pairing("127.0.0.1", dead_port(), None).await;
    assert!(matches!(result, Err(PairingError::Unreachable { .. })));
    assert_eq!(flow.phase(), PairingPhase::Idle);
}

#[tokio::test]
async fn abandoning_an_attempt_drops_its_context() {
    let harness = PairingHarness::start().await;
    let mut flow = fast_flow();

    flow.begin_pairing(&harness.host(), harness.port(), None)
        .await
        .unwrap();
    assert_eq!(flow.phase(), PairingPhase::AwaitingPin);

    flow.reset();
    assert_eq!(flow.phase(), PairingPhase::Idle);

    let result = flow.submit_pin("1234").await;
    assert!(matches!(result, Err(PairingError::NotAwaitingPin)));
}

#[tokio::test]
async fn restarting_pairing_discards_the_previous_attempt() {
    let harness = PairingHarness::start().await;
    let mut flow = fast_flow();

    flow.begin_pairing(&harness.host(), harness.port(), Some("First"))
        .await
        .unwrap();
    flow.begin_pairing(&harness.host(), harness.port(), Some("Second"))
        .await
        .unwrap();
    assert_eq!(harness.sim.wake_count(), 2);

    let config = flow.submit_pin("1234").await.unwrap();
    assert_eq!(config.name, "Second");
}
