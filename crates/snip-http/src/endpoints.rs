//! API endpoint definitions and request/response types.

use serde::{Deserialize, Serialize};

use snip_core::{ShortCode, User};

// ============================================================================
// Endpoint Paths (relative to /api/v1)
// ============================================================================

/// POST /auth/register
pub const REGISTER: &str = "/auth/register";

/// POST /auth/login
pub const LOGIN: &str = "/auth/login";

/// POST /auth/refresh
pub const REFRESH: &str = "/auth/refresh";

/// POST /auth/logout
pub const LOGOUT: &str = "/auth/logout";

/// GET /auth/me
pub const ME: &str = "/auth/me";

/// POST /links/shorten
pub const SHORTEN: &str = "/links/shorten";

/// GET /links
pub const LINKS: &str = "/links";

/// GET /links/stats
pub const STATS: &str = "/links/stats";

/// DELETE /links/{code}
pub fn link_path(code: &ShortCode) -> String {
    format!("/links/{}", code)
}

/// GET /links/{code}/analytics
pub fn link_analytics_path(code: &ShortCode) -> String {
    format!("/links/{}/analytics", code)
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for register.
#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Response from register.
#[derive(Debug, Deserialize)]
pub struct RegisterResponse {
    pub user_id: i64,
}

/// Request body for login.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Response from login.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

/// Request body for refresh.
#[derive(Debug, Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

/// Response from refresh.
/// Note: only a new access token is minted; the refresh token is unchanged.
#[derive(Debug, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

/// Request body for logout.
#[derive(Debug, Serialize)]
pub struct LogoutRequest<'a> {
    pub refresh_token: &'a str,
}

/// Request body for shorten.
#[derive(Debug, Serialize)]
pub struct ShortenRequest<'a> {
    pub url: &'a str,
}

/// Query parameters for listing links.
#[derive(Debug, Serialize)]
pub struct ListLinksQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

/// Query parameters for link analytics.
#[derive(Debug, Serialize)]
pub struct AnalyticsQuery<'a> {
    pub period: &'a str,
}

/// API error response format.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: Option<String>,
    pub message: Option<String>,
}
