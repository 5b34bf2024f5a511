//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use snip_core::Credentials;
use snip_http::ApiClient;

use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email address
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,
}

pub async fn run(args: LoginArgs, client: &ApiClient) -> Result<()> {
    let credentials = Credentials::new(&args.email, &args.password);

    eprintln!("{}", "Logging in...".dimmed());
    let user = client
        .login(&credentials)
        .await
        .context("Failed to login")?;

    output::success("Logged in successfully");
    println!();
    output::field("Email", &user.email);
    output::field("API", client.base().as_str());

    Ok(())
}
