//! Logout command implementation.

use anyhow::Result;
use clap::Args;

use snip_http::ApiClient;

use crate::output;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs, client: &ApiClient) -> Result<()> {
    // Best-effort server-side revocation; local state is always cleared.
    client.logout().await?;

    output::success("Logged out");
    Ok(())
}
