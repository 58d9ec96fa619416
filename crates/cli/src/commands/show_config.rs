use anyhow::{Context, Result};

use crate::args::ConfigArgs;

/// Print the effective configuration (file plus overrides) as JSON.
pub fn show_config(args: &ConfigArgs) -> Result<()> {
    let config = args.load()?;
    let json = config
        .to_json_string()
        .context("Failed to serialize configuration")?;
    println!("{json}");
    Ok(())
}
