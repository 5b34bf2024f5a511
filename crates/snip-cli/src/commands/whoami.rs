//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use snip_http::ApiClient;

use crate::output;

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: WhoamiArgs, client: &ApiClient) -> Result<()> {
    let user = client
        .current_user()
        .await
        .context("Failed to fetch account")?;

    if args.json {
        return output::json_pretty(&user);
    }

    output::field("User ID", &user.id.to_string());
    output::field("Email", &user.email);
    if let Some(created_at) = user.created_at {
        output::field("Created", &created_at.format("%Y-%m-%d").to_string());
    }
    output::field("API", client.base().as_str());

    Ok(())
}
