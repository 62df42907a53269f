//! Command module structure for the intake CLI

use anyhow::Result;
use std::path::Path;

use intake::config::Config;
use intake::paths::CONFIG_FILE;

pub mod check;
pub mod init;
pub mod list;
pub mod serve;
pub mod util;

/// Resolve the config path, defaulting to `.intake/config.md`.
pub fn config_path(path: Option<&Path>) -> &Path {
    path.unwrap_or_else(|| Path::new(CONFIG_FILE))
}

/// Load the config, failing with a hint when intake has not been initialized.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = config_path(path);
    if !path.exists() {
        anyhow::bail!(
            "Intake not initialized ({} not found). Run `intake init` first.",
            path.display()
        );
    }
    Config::load_from(path)
}
