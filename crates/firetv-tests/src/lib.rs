//! End-to-end tests for the Fire TV bridge
//!
//! This crate contains tests that exercise the full stack over real
//! sockets:
//! - pairing flow against the device simulator
//! - command translation and dispatch through the device session
//! - session lifecycle and token revocation
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p firetv-tests
//! ```
//!
//! # Test Structure
//!
//! - `pairing_e2e_test.rs` - PIN pairing flow against the simulator
//! - `command_e2e_test.rs` - command round-trips through the device
//! - `session_e2e_test.rs` - connect/disconnect lifecycle and revocation

// This crate only contains tests, no library code
