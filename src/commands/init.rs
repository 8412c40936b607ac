use crate::config::{default_config_toml, DEFAULT_CONFIG_FILE};
use anyhow::Result;
use std::fs;
use std::path::PathBuf;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    fs::write(&config_path, default_config_toml())?;
    println!("Created {DEFAULT_CONFIG_FILE} configuration file");

    Ok(())
}
