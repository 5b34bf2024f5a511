//! Delete command implementation.

use anyhow::{Context, Result};
use clap::Args;

use snip_core::ShortCode;
use snip_http::ApiClient;

use crate::output;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// The short code of the link to delete
    pub code: String,
}

pub async fn run(args: DeleteArgs, client: &ApiClient) -> Result<()> {
    let code = ShortCode::new(&args.code).context("Invalid short code")?;

    client
        .delete_link(&code)
        .await
        .context("Failed to delete link")?;

    output::success(&format!("Deleted {}", code));
    Ok(())
}
