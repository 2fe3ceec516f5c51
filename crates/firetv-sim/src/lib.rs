//! firetv-sim - Simulated Fire TV device
//!
//! Implements the device side of the local remote API for integration
//! tests and manual experiments: the PIN pairing window, token issuing,
//! and the authenticated command routes. All state lives in an explicit
//! [`FireTvSimulator`] value, so every test owns its own device.
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use firetv_sim::{create_router, FireTvSimulator};
//!
//! let sim = Arc::new(FireTvSimulator::with_fixed_pin("1234"));
//! let router = create_router(sim.clone());
//! // serve the router, or hand it to a test server
//! ```

pub mod error;
pub mod handlers;
pub mod state;

pub use error::SimError;
pub use state::{CommandKind, FireTvSimulator, ReceivedCommand};

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

/// Create the device API router backed by the given simulator state
pub fn create_router(sim: Arc<FireTvSimulator>) -> Router {
    Router::new()
        // Reachability probe
        .route("/", get(handlers::probe))
        // Wake, unauthenticated
        .route("/apps/FireTVRemote", post(handlers::wake))
        // Pairing
        .route("/v1/FireTV/pin/display", post(handlers::pin_display))
        .route("/v1/FireTV/pin/verify", post(handlers::pin_verify))
        // Authenticated command routes
        .route("/v1/FireTV", post(handlers::control_command))
        .route("/v1/media", post(handlers::media_command))
        .route("/v1/FireTV/app/{package}", post(handlers::launch_app))
        .layer(TraceLayer::new_for_http())
        .with_state(sim)
}

// ============================================================================
// Tests
// ============================================================================
