//! Fire TV Client Library
//!
//! Provides the HTTP transport client for the Fire TV local remote API
//! and the two-step PIN pairing flow that obtains its bearer token.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use firetv_client::FireTvClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = FireTvClient::with_token("192.168.1.10", 8080, "token-from-pairing")?;
//!
//!     if client.test_connection(3, Duration::from_secs(2)).await {
//!         client.send_control_command("home").await?;
//!         client.launch_app("com.netflix.ninja").await?;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Pairing
//!
//! A client without a token can only wake, probe and pair. The
//! [`pairing::PairingFlow`] drives the exchange that produces a stored
//! device record:
//!
//! ```rust,ignore
//! use firetv_client::pairing::PairingFlow;
//!
//! let mut flow = PairingFlow::new();
//! let challenge = flow.begin_pairing("192.168.1.10", 8080, Some("Living Room")).await?;
//! // ... read the PIN from the TV screen ...
//! let config = flow.submit_pin("1234").await?;
//! ```
//!
//! # Testing
//!
//! The `testing` module serves any axum router on an ephemeral port:
//!
//! ```rust,ignore
//! use firetv_client::testing::TestServer;
//! use firetv_sim::{create_router, FireTvSimulator};
//!
//! let sim = std::sync::Arc::new(FireTvSimulator::with_fixed_pin("1234"));
//! let server = TestServer::start(create_router(sim)).await?;
//! ```

mod client;
mod error;
pub mod pairing;
pub mod testing;

pub use client::{FireTvClient, TOKEN_HEADER};
pub use error::{FireTvClientError, Result};

// Re-export pairing entry points for convenience
pub use pairing::{PairingError, PairingFlow, PairingPhase, PinChallenge};

// Re-export core types for convenience
pub use firetv_core::DeviceConfig;
