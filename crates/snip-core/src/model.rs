//! Data model for API resources.
//!
//! These types mirror the JSON bodies of the REST contract. The client
//! forwards them as decoded; it does not validate shapes beyond the
//! decode itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A shortened link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub id: i64,
    pub short_code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

/// One page of a user's links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksPage {
    pub links: Vec<Link>,
    /// Total number of links across all pages.
    pub total: u64,
}

/// The result of shortening a URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedLink {
    pub short_code: String,
    pub long_url: String,
}

/// Click counts for one calendar date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClicksByDate {
    pub date: String,
    pub clicks: u64,
}

/// Click counts for one device class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClicksByDevice {
    pub device: String,
    pub clicks: u64,
}

/// Click counts for one browser family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClicksByBrowser {
    pub browser: String,
    pub clicks: u64,
}

/// Click counts for one operating system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClicksByOs {
    pub os: String,
    pub clicks: u64,
}

/// Aggregated analytics for a single link over a period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub link_id: i64,
    pub period: String,
    pub total_clicks: u64,
    pub unique_visitors: u64,
    #[serde(default)]
    pub clicks_by_date: Vec<ClicksByDate>,
    #[serde(default)]
    pub clicks_by_device: Vec<ClicksByDevice>,
    #[serde(default)]
    pub clicks_by_browser: Vec<ClicksByBrowser>,
    #[serde(default)]
    pub clicks_by_os: Vec<ClicksByOs>,
}

/// Service-wide public counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalStats {
    pub total_links: u64,
    pub total_requests: u64,
}
