//! Shorten command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use snip_http::ApiClient;

use crate::output;

#[derive(Args, Debug)]
pub struct ShortenArgs {
    /// The URL to shorten
    pub url: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ShortenArgs, client: &ApiClient) -> Result<()> {
    eprintln!("{}", "Shortening...".dimmed());
    let created = client
        .shorten(&args.url)
        .await
        .context("Failed to shorten URL")?;

    if args.json {
        return output::json(&created);
    }

    output::success("Link created");
    println!();
    output::field("Code", &created.short_code);
    output::field("Target", &created.long_url);

    Ok(())
}
