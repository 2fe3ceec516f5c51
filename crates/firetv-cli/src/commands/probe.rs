//! Wake and ping commands - reachability without a pairing

use std::time::Duration;

use anyhow::{bail, Result};

use firetv_client::FireTvClient;
use firetv_core::DeviceConfig;

use crate::output::OutputContext;

/// Delay between ping probes
const PING_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Send a wake request to a device
pub async fn wake(record: &DeviceConfig, ctx: &OutputContext) -> Result<()> {
    let mut client = FireTvClient::for_config(record)?;
    let delivered = client.wake().await;
    client.close();

    if !delivered {
        bail!("wake request to {} was not delivered", record.log_label());
    }
    ctx.success(&format!("Wake request delivered to {}", record.log_label()));
    Ok(())
}

/// Probe a device until it answers or the attempts run out
pub async fn ping(record: &DeviceConfig, retries: u32, ctx: &OutputContext) -> Result<()> {
    let mut client = FireTvClient::for_config(record)?;
    ctx.info(&format!(
        "Probing {} (up to {} attempts)...",
        record.log_label(),
        retries
    ));
    let answered = client.test_connection(retries, PING_RETRY_DELAY).await;
    client.close();

    if !answered {
        bail!(
            "{} did not answer after {} attempts",
            record.log_label(),
            retries
        );
    }
    ctx.success(&format!("{} is reachable", record.log_label()));
    Ok(())
}
