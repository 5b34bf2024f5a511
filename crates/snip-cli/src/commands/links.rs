//! Links listing command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use snip_http::ApiClient;

use crate::output;

#[derive(Args, Debug)]
pub struct LinksArgs {
    /// Maximum number of links to show
    #[arg(long, default_value_t = 10)]
    pub limit: u32,

    /// Number of links to skip
    #[arg(long, default_value_t = 0)]
    pub offset: u32,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: LinksArgs, client: &ApiClient) -> Result<()> {
    let page = client
        .links(Some(args.limit), Some(args.offset))
        .await
        .context("Failed to list links")?;

    if args.json {
        return output::json_pretty(&page);
    }

    if page.links.is_empty() {
        println!("No links yet.");
        return Ok(());
    }

    for link in &page.links {
        println!(
            "{}  {}  {}",
            link.short_code.bold(),
            link.created_at.format("%Y-%m-%d").to_string().dimmed(),
            link.long_url
        );
    }

    println!();
    println!(
        "{}",
        format!("Showing {} of {}", page.links.len(), page.total).dimmed()
    );

    Ok(())
}
