//! Global stats command implementation.

use anyhow::{Context, Result};
use clap::Args;

use snip_http::ApiClient;

use crate::output;

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: StatsArgs, client: &ApiClient) -> Result<()> {
    let stats = client
        .global_stats()
        .await
        .context("Failed to fetch stats")?;

    if args.json {
        return output::json(&stats);
    }

    output::field("Total links", &stats.total_links.to_string());
    output::field("Total requests", &stats.total_requests.to_string());

    Ok(())
}
