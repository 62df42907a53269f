//! Validate a payload offline.

use anyhow::{Context, Result};
use colored::Colorize;
use std::io::Read;
use std::path::Path;

use intake::form::FormData;
use intake::validation::validate_submission;

use super::load_config;

/// Validate a URL-encoded payload from `file` (or stdin) against the
/// configured profile. Nothing is stored.
pub fn cmd_check(path: Option<&Path>, file: Option<&Path>) -> Result<()> {
    let config = load_config(path)?;

    let body = match file {
        Some(file) => std::fs::read(file)
            .with_context(|| format!("Failed to read {}", file.display()))?,
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read payload from stdin")?;
            buf
        }
    };

    let form = FormData::parse(trim_trailing_newline(&body));
    match validate_submission(config.profile(), &config.rules(), &form) {
        Ok(submission) => {
            println!("{} {}", "✓".green(), submission.summary());
            Ok(())
        }
        Err(errors) => {
            for error in &errors {
                eprintln!("{} {}", "✗".red(), error.message);
            }
            anyhow::bail!("{} problem(s) found", errors.len())
        }
    }
}

fn trim_trailing_newline(body: &[u8]) -> &[u8] {
    let end = body
        .iter()
        .rposition(|b| !matches!(b, b'\n' | b'\r'))
        .map_or(0, |i| i + 1);
    &body[..end]
}
