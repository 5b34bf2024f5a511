//! snip-http - reqwest-backed client for the snip URL shortener API.
//!
//! The entry point is [`ApiClient`], which owns the session token state,
//! attaches bearer credentials to requests, and transparently recovers
//! from access-token expiry with a single-flight refresh.

mod client;
mod endpoints;
mod http;

pub use client::ApiClient;
