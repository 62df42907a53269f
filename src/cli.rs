//! CLI argument definitions for intake.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use intake::profile::Profile;

#[derive(Parser)]
#[command(name = "intake")]
#[command(version)]
#[command(about = "Validated web form intake", long_about = None)]
#[command(
    after_help = "GETTING STARTED:\n    intake init                Write .intake/config.md and create the database\n    intake serve               Serve the form on the configured address"
)]
pub struct Cli {
    /// Path to the config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize intake in the current directory
    Init {
        /// Form profile to serve (rich or minimal)
        #[arg(long, default_value = "rich")]
        profile: Profile,
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Serve the form over HTTP
    Serve {
        /// Address to bind, overriding the config
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },
    /// List stored submissions, newest first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Show at most N submissions
        #[arg(long, value_name = "N")]
        limit: Option<usize>,
    },
    /// Validate a URL-encoded payload without storing it
    Check {
        /// File holding the payload (reads stdin when omitted)
        file: Option<PathBuf>,
    },
    /// Show version information
    Version {
        /// Include commit and build date
        #[arg(long, short)]
        verbose: bool,
    },
    /// Generate shell completion script
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
