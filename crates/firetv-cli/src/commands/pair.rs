//! Pair command - exchange the on-screen PIN for a client token

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use firetv_client::PairingFlow;

use crate::config::CliConfig;
use crate::output::OutputContext;

/// Pair with a device and save the resulting record
pub async fn pair(
    host: &str,
    port: u16,
    name: Option<&str>,
    pin: Option<&str>,
    config_path: &Path,
    ctx: &OutputContext,
) -> Result<()> {
    let mut flow = PairingFlow::new();

    ctx.info(&format!("Contacting {}:{}...", host, port));
    let challenge = flow
        .begin_pairing(host, port, name)
        .await
        .context("Pairing could not be started")?;

    ctx.info(&format!(
        "A PIN should now be visible on the Fire TV at {}:{}.",
        challenge.host, challenge.port
    ));

    let pin = match pin {
        Some(pin) => pin.to_string(),
        None => prompt_pin()?,
    };

    let device = flow
        .submit_pin(&pin)
        .await
        .context("Pairing was not completed")?;

    let mut records = CliConfig::load_from(config_path)?;
    records.upsert(device.clone());
    records.save_to(config_path)?;

    ctx.success(&format!(
        "Paired with {}, saved as '{}'",
        device.log_label(),
        device.identifier
    ));
    Ok(())
}

/// Read the PIN from stdin
fn prompt_pin() -> Result<String> {
    print!("Enter the PIN shown on the TV: ");
    std::io::stdout().flush()?;

    let mut buf = String::new();
    std::io::stdin()
        .read_line(&mut buf)
        .context("Failed to read the PIN")?;
    Ok(buf.trim().to_string())
}
