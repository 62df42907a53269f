//! List stored submissions.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use intake::repository::{SqliteSubmissionRepository, SubmissionRepository};

use super::load_config;

pub fn cmd_list(path: Option<&Path>, json: bool, limit: Option<usize>) -> Result<()> {
    let config = load_config(path)?;
    let profile = config.profile();
    let repository = SqliteSubmissionRepository::open(&config.database.path)?;
    let rows = repository.list(profile, limit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("{}", "No submissions.".yellow());
        return Ok(());
    }

    for row in &rows {
        println!(
            "{} {} {}",
            format!("#{:<4}", row.id).cyan(),
            row.submitted_at.dimmed(),
            row.submission.summary()
        );
    }

    let total = repository.count(profile)?;
    if total > rows.len() {
        println!(
            "{}",
            format!("({} of {} {} submissions)", rows.len(), total, profile).dimmed()
        );
    }
    Ok(())
}
