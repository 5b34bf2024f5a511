//! Analytics command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use snip_core::{Period, ShortCode};
use snip_http::ApiClient;

use crate::output;

#[derive(Args, Debug)]
pub struct AnalyticsArgs {
    /// The short code of the link
    pub code: String,

    /// Aggregation period: 24h, 7d, or 30d
    #[arg(long, default_value = "7d")]
    pub period: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: AnalyticsArgs, client: &ApiClient) -> Result<()> {
    let code = ShortCode::new(&args.code).context("Invalid short code")?;
    let period: Period = args.period.parse().context("Invalid period")?;

    let summary = client
        .analytics(&code, period)
        .await
        .context("Failed to fetch analytics")?;

    if args.json {
        return output::json_pretty(&summary);
    }

    println!("{} ({})", code.to_string().bold(), summary.period);
    println!();
    output::field("Total clicks", &summary.total_clicks.to_string());
    output::field("Unique visitors", &summary.unique_visitors.to_string());

    if !summary.clicks_by_date.is_empty() {
        println!();
        println!("{}", "By date".dimmed());
        for row in &summary.clicks_by_date {
            println!("  {}  {}", row.date, row.clicks);
        }
    }

    if !summary.clicks_by_device.is_empty() {
        println!();
        println!("{}", "By device".dimmed());
        for row in &summary.clicks_by_device {
            println!("  {}  {}", row.device, row.clicks);
        }
    }

    if !summary.clicks_by_browser.is_empty() {
        println!();
        println!("{}", "By browser".dimmed());
        for row in &summary.clicks_by_browser {
            println!("  {}  {}", row.browser, row.clicks);
        }
    }

    if !summary.clicks_by_os.is_empty() {
        println!();
        println!("{}", "By OS".dimmed());
        for row in &summary.clicks_by_os {
            println!("  {}  {}", row.os, row.clicks);
        }
    }

    Ok(())
}
