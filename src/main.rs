//! CLI entry point for intake.

mod cli;
mod cmd;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Init { profile, force } => cmd::init::cmd_init(config_path, profile, force),
        Commands::Serve { bind } => cmd::serve::cmd_serve(config_path, bind),
        Commands::List { json, limit } => cmd::list::cmd_list(config_path, json, limit),
        Commands::Check { file } => cmd::check::cmd_check(config_path, file.as_deref()),
        Commands::Version { verbose } => cmd::util::cmd_version(verbose),
        Commands::Completion { shell } => cmd::util::cmd_completion(shell),
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `intake=info`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("intake=info"));
    // Ignore double-init; only the first subscriber wins.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
