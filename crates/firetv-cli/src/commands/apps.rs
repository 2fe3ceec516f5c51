//! Apps command - list launchable applications

use anyhow::Result;

use firetv_core::{launch_name, LAUNCH_PREFIX, TOP_APPS};

use crate::output::{AppRow, OutputContext};

/// List the known applications and their launch commands
pub fn apps(ctx: &OutputContext) -> Result<()> {
    let rows: Vec<AppRow> = TOP_APPS
        .iter()
        .map(|app| AppRow {
            command: format!("{}{}", LAUNCH_PREFIX, launch_name(app.name)),
            name: app.name.to_string(),
            package: app.package.to_string(),
        })
        .collect();

    ctx.print(&rows);
    Ok(())
}
