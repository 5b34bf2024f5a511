//! Token storage and session events.
//!
//! The token store is injected into the HTTP client rather than held as
//! ambient global state, so embedders and tests can run multiple
//! independent sessions in one process. Its API is deliberately narrow:
//! the four methods below are the only legal session-state transitions.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::Result;
use crate::tokens::{AccessToken, TokenPair};

/// A session lifecycle event, published by the client over a watch channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// No session activity has been observed yet.
    Idle,
    /// A login succeeded and a token pair is held.
    Authenticated,
    /// The session could not be recovered via refresh; the token state
    /// has been cleared and the user must log in again.
    Invalidated,
    /// The user logged out; the token state has been cleared.
    LoggedOut,
}

/// Durable storage for the session token pair.
///
/// Implementations must uphold the pairing invariant: tokens are stored
/// and cleared as a whole pair, and only [`TokenStore::replace_access`]
/// may touch one half on its own.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Returns a snapshot of the stored token pair, if any.
    async fn tokens(&self) -> Result<Option<TokenPair>>;

    /// Store a whole token pair, replacing any existing one.
    ///
    /// Called on successful login.
    async fn set_pair(&self, pair: TokenPair) -> Result<()>;

    /// Replace only the access token, leaving the refresh token untouched.
    ///
    /// Called on successful refresh. If the store holds no pair (the
    /// session was cleared while the refresh was in flight), this is a
    /// no-op: a late refresh result must not resurrect a logged-out
    /// session.
    async fn replace_access(&self, access: AccessToken) -> Result<()>;

    /// Clear the stored pair.
    ///
    /// Called on logout and on failed refresh.
    async fn clear(&self) -> Result<()>;
}

/// An in-memory token store.
///
/// The default store for embedded use and tests. State does not survive
/// the process; use a durable implementation where that matters.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    inner: RwLock<Option<TokenPair>>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with an existing pair.
    pub fn with_pair(pair: TokenPair) -> Self {
        Self {
            inner: RwLock::new(Some(pair)),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn tokens(&self) -> Result<Option<TokenPair>> {
        Ok(self.inner.read().unwrap().clone())
    }

    async fn set_pair(&self, pair: TokenPair) -> Result<()> {
        *self.inner.write().unwrap() = Some(pair);
        Ok(())
    }

    async fn replace_access(&self, access: AccessToken) -> Result<()> {
        let mut guard = self.inner.write().unwrap();
        *guard = guard.take().map(|pair| pair.with_access(access));
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.inner.write().unwrap() = None;
        Ok(())
    }
}
