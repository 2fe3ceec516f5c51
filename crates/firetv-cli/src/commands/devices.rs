//! Devices command - list saved device records

use anyhow::Result;

use firetv_core::mask_token;

use crate::config::CliConfig;
use crate::output::{DeviceRow, OutputContext};

/// List all saved devices
pub fn devices(config: &CliConfig, ctx: &OutputContext) -> Result<()> {
    let rows: Vec<DeviceRow> = config
        .devices
        .iter()
        .map(|device| DeviceRow {
            identifier: device.identifier.clone(),
            name: device.name.clone(),
            address: format!("{}:{}", device.host, device.port),
            paired_at: device
                .paired_at
                .map(|at| at.format("%Y-%m-%d %H:%M UTC").to_string())
                .unwrap_or_else(|| "unknown".to_string()),
            token: mask_token(&device.token),
        })
        .collect();

    ctx.print(&rows);
    Ok(())
}
