//! Init command implementation

use anyhow::{Result, bail};
use std::path::Path;

use lessons::config::Config;

/// Write a documented config file
pub fn init_command(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    Config::write_default(config_path, force)?;
    println!("Created: {}", config_path.display());
    Ok(())
}
