//! FireTV CLI - Command-line remote control for Fire TV devices
//!
//! Pairs with devices over the local HTTP remote API, keeps their
//! records in a TOML file, and drives them with navigation, playback
//! and app-launch commands.

mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use firetv_core::DEFAULT_PORT;

use crate::config::CliConfig;
use crate::output::{OutputContext, OutputFormat};

#[derive(Parser)]
#[command(name = "firetv-cli")]
#[command(author, version, about = "Fire TV remote control CLI")]
#[command(propagate_version = true)]
struct Cli {
    /// Device file path (defaults to the user config directory)
    #[arg(short, long, env = "FIRETV_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    output: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Minimal output (for scripting)
    #[arg(short, long)]
    quiet: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pair with a Fire TV and save its record
    Pair {
        /// Device IP address or hostname
        #[arg(long)]
        host: String,

        /// Device port
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Display name for the saved record
        #[arg(long)]
        name: Option<String>,

        /// PIN to submit without prompting (for scripting)
        #[arg(long)]
        pin: Option<String>,
    },

    /// Send a remote command to a paired device
    Send {
        /// Command name, e.g. home, play_pause, LAUNCH_NETFLIX
        command: String,

        /// Saved device identifier
        #[arg(short, long)]
        device: Option<String>,
    },

    /// Wake a paired device
    Wake {
        /// Saved device identifier
        #[arg(short, long)]
        device: Option<String>,
    },

    /// Check whether a paired device answers
    Ping {
        /// Saved device identifier
        #[arg(short, long)]
        device: Option<String>,

        /// Probe attempts
        #[arg(long, default_value = "3")]
        retries: u32,
    },

    /// List saved devices
    Devices,

    /// List launchable applications
    Apps,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => CliConfig::default_path()?,
    };

    let ctx = OutputContext::new(cli.output, cli.no_color, cli.quiet);

    match &cli.command {
        Commands::Pair {
            host,
            port,
            name,
            pin,
        } => {
            commands::pair(
                host,
                *port,
                name.as_deref(),
                pin.as_deref(),
                &config_path,
                &ctx,
            )
            .await?;
        }

        Commands::Send { command, device } => {
            let records = CliConfig::load_from(&config_path)?;
            let record = records.select(device.as_deref())?;
            commands::send(record, command, &ctx).await?;
        }

        Commands::Wake { device } => {
            let records = CliConfig::load_from(&config_path)?;
            let record = records.select(device.as_deref())?;
            commands::wake(record, &ctx).await?;
        }

        Commands::Ping { device, retries } => {
            let records = CliConfig::load_from(&config_path)?;
            let record = records.select(device.as_deref())?;
            commands::ping(record, *retries, &ctx).await?;
        }

        Commands::Devices => {
            let records = CliConfig::load_from(&config_path)?;
            commands::devices(&records, &ctx)?;
        }

        Commands::Apps => {
            commands::apps(&ctx)?;
        }
    }

    Ok(())
}
