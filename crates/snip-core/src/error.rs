//! Error types for the snip client.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, API, storage, and input validation errors.

use std::fmt;
use thiserror::Error;

/// The unified error type for snip operations.
///
/// This error type covers all possible failure modes in the client,
/// with explicit variants to allow callers to handle specific cases.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, malformed body).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (expired session, missing credentials).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// API errors (non-2xx responses outside the handled 401 path).
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Token storage errors (unreadable or corrupt session state).
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Input validation errors (invalid URL, short code, period).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Response body could not be decoded as the expected type.
    #[error("failed to decode response body: {message}")]
    Decode { message: String },

    /// Generic HTTP transport error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The session expired and could not be recovered via refresh.
    /// The local token state has been cleared.
    #[error("session expired")]
    SessionExpired,
}

/// An error response from the API.
///
/// Covers every non-2xx status outside the 401-with-refresh path. The
/// `error` and `message` fields are populated when the server returned
/// a parseable `{error, message}` JSON body.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Machine-readable error code (if present).
    pub error: Option<String>,
    /// Human-readable message from the server.
    pub message: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP error {}", self.status)?;
        if let Some(ref error) = self.error {
            write!(f, " [{}]", error)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, error: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            error,
            message,
        }
    }

    /// Check if this is an authentication failure.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401
    }
}

impl std::error::Error for ApiError {}

/// Token storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The storage backend could not be read or written.
    #[error("failed to access token storage: {message}")]
    Access { message: String },

    /// The stored session state is not valid.
    #[error("stored session state is invalid: {message}")]
    Invalid { message: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Invalid short code format.
    #[error("invalid short code '{value}': {reason}")]
    ShortCode { value: String, reason: String },

    /// Invalid analytics period.
    #[error("invalid period '{value}': expected one of 24h, 7d, 30d")]
    Period { value: String },
}
