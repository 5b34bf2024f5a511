//! Register command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use snip_core::Credentials;
use snip_http::ApiClient;

use crate::output;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Account email address
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,
}

pub async fn run(args: RegisterArgs, client: &ApiClient) -> Result<()> {
    let credentials = Credentials::new(&args.email, &args.password);

    eprintln!("{}", "Creating account...".dimmed());
    let user_id = client
        .register(&credentials)
        .await
        .context("Failed to register")?;

    // Registration issues no tokens; log in right away.
    let user = client
        .login(&credentials)
        .await
        .context("Account created, but login failed")?;

    output::success("Account created");
    println!();
    output::field("User ID", &user_id.to_string());
    output::field("Email", &user.email);
    output::field("API", client.base().as_str());

    Ok(())
}
