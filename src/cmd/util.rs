//! Utility commands (version, completion).

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io;

use crate::cli::Cli;

/// Show version information
pub fn cmd_version(verbose: bool) -> Result<()> {
    println!("intake {}", env!("CARGO_PKG_VERSION"));

    if verbose {
        println!("commit: {}", env!("GIT_SHA"));
        println!("built: {}", env!("BUILD_DATE"));
    }

    Ok(())
}

/// Generate shell completion script
pub fn cmd_completion(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "intake", &mut io::stdout());
    Ok(())
}
