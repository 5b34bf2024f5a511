//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::{
    analytics::AnalyticsArgs, delete::DeleteArgs, links::LinksArgs, login::LoginArgs,
    logout::LogoutArgs, register::RegisterArgs, shorten::ShortenArgs, stats::StatsArgs,
    whoami::WhoamiArgs,
};

/// CLI client for the snip URL shortener.
#[derive(Parser, Debug)]
#[command(name = "snip")]
#[command(author, version = env!("SNIP_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// API base URL
    #[arg(long, global = true, default_value = "http://localhost:8080")]
    pub api: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an account (and log in)
    Register(RegisterArgs),

    /// Create a new session (login)
    Login(LoginArgs),

    /// End the session and clear stored tokens
    Logout(LogoutArgs),

    /// Display the authenticated account
    Whoami(WhoamiArgs),

    /// Shorten a URL
    Shorten(ShortenArgs),

    /// List the account's links
    Links(LinksArgs),

    /// Delete a link by its short code
    Delete(DeleteArgs),

    /// Show analytics for a link
    Analytics(AnalyticsArgs),

    /// Show service-wide public stats
    Stats(StatsArgs),
}
