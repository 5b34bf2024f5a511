//! Subcommand implementations.

pub mod analytics;
pub mod delete;
pub mod links;
pub mod login;
pub mod logout;
pub mod register;
pub mod shorten;
pub mod stats;
pub mod whoami;

use anyhow::Result;

use snip_http::ApiClient;

use crate::cli::Commands;

pub async fn handle(command: Commands, client: &ApiClient) -> Result<()> {
    match command {
        Commands::Register(args) => register::run(args, client).await,
        Commands::Login(args) => login::run(args, client).await,
        Commands::Logout(args) => logout::run(args, client).await,
        Commands::Whoami(args) => whoami::run(args, client).await,
        Commands::Shorten(args) => shorten::run(args, client).await,
        Commands::Links(args) => links::run(args, client).await,
        Commands::Delete(args) => delete::run(args, client).await,
        Commands::Analytics(args) => analytics::run(args, client).await,
        Commands::Stats(args) => stats::run(args, client).await,
    }
}
