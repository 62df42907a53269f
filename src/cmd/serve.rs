//! Run the HTTP server.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::sync::Arc;

use intake::server::{self, AppContext};

use super::load_config;

pub fn cmd_serve(path: Option<&Path>, bind: Option<String>) -> Result<()> {
    let mut config = load_config(path)?;
    if let Some(bind) = bind {
        config.server.bind = bind;
    }

    let ctx = Arc::new(AppContext::from_config(&config)?);

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(async {
        let listener = tokio::net::TcpListener::bind(&config.server.bind)
            .await
            .with_context(|| format!("Failed to bind {}", config.server.bind))?;

        let addr = listener.local_addr()?;
        println!(
            "{} {} on {}",
            "Serving".green(),
            config.title().bold(),
            format!("http://{}", addr).cyan()
        );
        println!("{}", "Press Ctrl-C to stop.".dimmed());

        server::serve(listener, ctx).await
    })
}
