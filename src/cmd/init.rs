//! Initialize intake in the current directory.
//!
//! Writes the config file with a fresh session secret and creates the
//! database schema so the first `intake serve` starts clean.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use intake::config::Config;
use intake::profile::Profile;
use intake::repository::SqliteSubmissionRepository;

use super::config_path;

/// Bytes of randomness in a generated secret key.
const SECRET_KEY_BYTES: usize = 32;

pub fn cmd_init(path: Option<&Path>, profile: Profile, force: bool) -> Result<()> {
    let path = config_path(path);

    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it.",
            path.display()
        );
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let content = Config::render_initial(profile, &generate_secret_key());
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("{} {}", "Created".green(), path.display());

    let config = Config::load_from(path)?;
    SqliteSubmissionRepository::open(&config.database.path)?;
    println!("{} {}", "Created".green(), config.database.path.display());

    println!(
        "\n{} Run {} to serve the {} form.",
        "→".cyan(),
        "intake serve".bold(),
        profile
    );
    Ok(())
}

fn generate_secret_key() -> String {
    let bytes: [u8; SECRET_KEY_BYTES] = rand::random();
    hex::encode(bytes)
}
