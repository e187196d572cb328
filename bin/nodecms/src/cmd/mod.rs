//! Command implementations.

pub mod build;
pub mod check;
pub mod watch;

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use nodecms_core::Config;

/// Load the configuration file, with environment overrides.
fn load_config(config_path: &Path) -> Result<Config> {
    let config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;
    tracing::debug!(?config, "Loaded configuration");
    Ok(config)
}
