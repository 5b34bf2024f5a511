//! snip - CLI client for the snip URL shortener.
//!
//! This is a thin wrapper over the `snip-http` library: account and
//! session management, link shortening, and analytics from the terminal.

mod cli;
mod commands;
mod output;
mod session;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::Cli;
use session::FileTokenStore;
use snip_core::ApiUrl;
use snip_http::ApiClient;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.json_logs);

    let api = ApiUrl::new(&cli.api).context("Invalid API URL")?;
    let store = Arc::new(FileTokenStore::default_location()?);
    let client = ApiClient::with_store(api, store);
    debug!(api = %client.base(), "Client initialized");

    commands::handle(cli.command, &client).await
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .init();
    }
}
