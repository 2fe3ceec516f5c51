//! Fire TV device simulator
//!
//! Runs the simulated device as a standalone HTTP server so clients
//! can be exercised without real hardware.
//!
//! # Usage
//!
//! ```bash
//! ./firetv-sim --port 8080
//! ```
//!
//! With a fixed pairing PIN instead of a random one:
//! ```bash
//! ./firetv-sim --port 8080 --pin 1234
//! ```
//!
//! The PIN that would be shown on the TV screen is printed to the log
//! whenever a pairing request arrives.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use firetv_sim::{create_router, FireTvSimulator};

#[derive(Parser, Debug)]
#[command(name = "firetv-sim")]
#[command(about = "Simulated Fire TV device for bridge development")]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    bind: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Fixed pairing PIN; a fresh random PIN per request when omitted
    #[arg(long)]
    pin: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose {
        "firetv_sim=debug,tower_http=debug"
    } else {
        "firetv_sim=info"
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let sim = Arc::new(match &args.pin {
        Some(pin) => FireTvSimulator::with_fixed_pin(pin),
        None => FireTvSimulator::new(),
    });

    let addr = format!("{}:{}", args.bind, args.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("Starting Fire TV simulator");
    info!("Listening on {addr}");
    info!("Pair against host {} port {}", args.bind, args.port);

    axum::serve(listener, create_router(sim)).await?;

    Ok(())
}
