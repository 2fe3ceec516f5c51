//! Send command - dispatch one remote command to a device

use anyhow::{bail, Result};

use firetv_core::{DeviceConfig, DeviceError, DeviceSession, RemoteCommand};
use firetv_device::FireTvDevice;

use crate::output::OutputContext;

/// Connect to a device, dispatch one command and disconnect
pub async fn send(record: &DeviceConfig, command: &str, ctx: &OutputContext) -> Result<()> {
    // reject typos before any network traffic
    RemoteCommand::parse(command)?;

    let mut device = FireTvDevice::new(record.clone());
    device.connect().await?;

    let outcome = device.send_command(command).await;
    device.disconnect().await;

    match outcome {
        Ok(true) => {
            ctx.success(&format!("'{}' accepted by {}", command, record.log_label()));
        }
        Ok(false) => {
            ctx.error(&format!("{} refused '{}'", record.log_label(), command));
        }
        Err(DeviceError::TokenInvalid) => bail!(
            "the saved token for {} was rejected; run 'firetv-cli pair --host {}' to pair again",
            record.log_label(),
            record.host
        ),
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
