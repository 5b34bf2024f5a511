//! snip-core - Core types and traits for the snip URL shortener client.

pub mod credentials;
pub mod error;
pub mod model;
pub mod store;
pub mod tokens;
pub mod types;

pub use credentials::Credentials;
pub use error::Error;
pub use model::{
    AnalyticsSummary, ClicksByBrowser, ClicksByDate, ClicksByDevice, ClicksByOs, CreatedLink,
    GlobalStats, Link, LinksPage, User,
};
pub use store::{MemoryTokenStore, SessionEvent, TokenStore};
pub use tokens::{AccessToken, RefreshToken, TokenPair};
pub use types::{ApiUrl, Period, ShortCode};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
