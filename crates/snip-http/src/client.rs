//! Authenticated API client with transparent token refresh.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, watch};
use tracing::{debug, info, instrument, warn};

use snip_core::error::{AuthError, Error};
use snip_core::{
    AccessToken, AnalyticsSummary, ApiUrl, CreatedLink, Credentials, GlobalStats, LinksPage,
    MemoryTokenStore, Period, RefreshToken, Result, SessionEvent, ShortCode, TokenPair,
    TokenStore, User,
};

use crate::endpoints::{
    AnalyticsQuery, LINKS, LOGIN, LOGOUT, ListLinksQuery, LoginRequest, LoginResponse,
    LogoutRequest, ME, REFRESH, REGISTER, RefreshRequest, RefreshResponse, RegisterRequest,
    RegisterResponse, SHORTEN, STATS, ShortenRequest, link_analytics_path, link_path,
};
use crate::http::HttpClient;

/// Authenticated client for the snip API.
///
/// Owns the session token state, attaches bearer credentials to requests,
/// and transparently recovers from access-token expiry: a 401 triggers one
/// shared refresh and exactly one retry of the failed request. If recovery
/// fails the local session is torn down, a [`SessionEvent::Invalidated`]
/// event is published, and the call fails with
/// [`AuthError::SessionExpired`].
///
/// # Thread Safety
///
/// Clients are cheap to clone (they use internal `Arc`) and are safe to
/// share across tasks. Concurrent requests that expire around the same
/// time coordinate through a single-flight gate, so at most one refresh
/// call is ever in flight.
///
/// # Example
///
/// ```no_run
/// use snip_core::{ApiUrl, Credentials};
/// use snip_http::ApiClient;
///
/// # async fn example() -> snip_core::Result<()> {
/// let client = ApiClient::new(ApiUrl::new("https://snip.example")?);
/// let user = client.login(&Credentials::new("a@b.com", "secret123")).await?;
/// println!("Logged in as {}", user.email);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    store: Arc<dyn TokenStore>,
    /// Single-flight gate: the holder is the one task allowed to issue a
    /// refresh call; waiters consume its settled outcome.
    refresh_gate: Mutex<()>,
    /// Bumped exactly once per settled refresh, success or failure, so
    /// waiters can tell a refresh completed while they were queued.
    refresh_epoch: AtomicU64,
    events: watch::Sender<SessionEvent>,
}

impl ApiClient {
    /// Create a client with an in-memory token store.
    pub fn new(base: ApiUrl) -> Self {
        Self::with_store(base, Arc::new(MemoryTokenStore::new()))
    }

    /// Create a client with an injected token store.
    ///
    /// Every legal session mutation goes through the store, so a durable
    /// implementation persists the session automatically.
    pub fn with_store(base: ApiUrl, store: Arc<dyn TokenStore>) -> Self {
        let (events, _) = watch::channel(SessionEvent::Idle);
        Self {
            inner: Arc::new(ClientInner {
                http: HttpClient::new(base),
                store,
                refresh_gate: Mutex::new(()),
                refresh_epoch: AtomicU64::new(0),
                events,
            }),
        }
    }

    /// Returns the API base URL this client is configured for.
    pub fn base(&self) -> &ApiUrl {
        self.inner.http.base()
    }

    /// Subscribe to session lifecycle events.
    ///
    /// Any number of receivers may be held; each observes every
    /// transition, including exactly one [`SessionEvent::Invalidated`]
    /// per failed-refresh event.
    pub fn session_events(&self) -> watch::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    /// Returns true if a token pair is currently held.
    pub async fn is_authenticated(&self) -> bool {
        matches!(self.inner.store.tokens().await, Ok(Some(_)))
    }

    /// Export the current token pair for inspection or persistence.
    ///
    /// # Security
    ///
    /// Handle the returned tokens securely. They grant access to the
    /// account.
    pub async fn export_tokens(&self) -> Result<Option<TokenPair>> {
        self.inner.store.tokens().await
    }

    // ========================================================================
    // Auth Operations
    // ========================================================================

    /// Create a new account.
    ///
    /// Returns the created user's id; no tokens are issued. Callers are
    /// expected to follow up with [`ApiClient::login`].
    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    pub async fn register(&self, credentials: &Credentials) -> Result<i64> {
        info!("Registering account");

        let request = RegisterRequest {
            email: credentials.email(),
            password: credentials.password(),
        };

        let response: RegisterResponse = self.inner.http.post(REGISTER, &request, None).await?;
        Ok(response.user_id)
    }

    /// Authenticate and store the issued token pair.
    ///
    /// On success the whole pair is stored atomically and
    /// [`SessionEvent::Authenticated`] is published. On failure no token
    /// state is mutated.
    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<User> {
        info!("Logging in");

        let request = LoginRequest {
            email: credentials.email(),
            password: credentials.password(),
        };

        let response: LoginResponse = self.inner.http.post(LOGIN, &request, None).await?;

        let pair = TokenPair::new(
            AccessToken::new(response.access_token),
            RefreshToken::new(response.refresh_token),
        );
        self.inner.store.set_pair(pair).await?;
        self.inner.events.send_replace(SessionEvent::Authenticated);

        debug!(user_id = response.user.id, "Login succeeded");
        Ok(response.user)
    }

    /// End the session.
    ///
    /// Best-effort notifies the backend so it can revoke the refresh
    /// token; failures there are swallowed. Local token state is always
    /// cleared as the last step, and [`SessionEvent::LoggedOut`] is
    /// published.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        if let Some(pair) = self.inner.store.tokens().await? {
            let request = LogoutRequest {
                refresh_token: pair.refresh().as_str(),
            };

            if let Err(err) = self
                .inner
                .http
                .post::<_, serde_json::Value>(LOGOUT, &request, Some(pair.access().as_str()))
                .await
            {
                debug!(error = %err, "Server-side logout failed, clearing local session anyway");
            }
        }

        self.inner.store.clear().await?;
        self.inner.events.send_replace(SessionEvent::LoggedOut);

        info!("Logged out");
        Ok(())
    }

    /// Refresh the access token now.
    ///
    /// Normally refresh happens transparently on 401; this entry point
    /// exists for session restore at startup. Coordination is shared with
    /// the transparent path, so a concurrent 401-triggered refresh and a
    /// manual one still produce a single wire call.
    pub async fn refresh(&self) -> Result<()> {
        let seen = self.inner.refresh_epoch.load(Ordering::Acquire);
        self.refresh_shared(seen).await
    }

    /// Fetch the authenticated user.
    pub async fn current_user(&self) -> Result<User> {
        let http = self.inner.http.clone();
        self.with_auth_retry(move |token| {
            let http = http.clone();
            async move { http.get(ME, token.as_deref()).await }
        })
        .await
    }

    // ========================================================================
    // Link Operations
    // ========================================================================

    /// Shorten a URL.
    ///
    /// Works without a session; when one is held the link is attributed
    /// to the account.
    #[instrument(skip(self))]
    pub async fn shorten(&self, url: &str) -> Result<CreatedLink> {
        debug!("Shortening URL");

        let http = self.inner.http.clone();
        let url = url.to_string();
        self.with_auth_retry(move |token| {
            let http = http.clone();
            let url = url.clone();
            async move {
                let request = ShortenRequest { url: &url };
                http.post(SHORTEN, &request, token.as_deref()).await
            }
        })
        .await
    }

    /// List the account's links, newest first.
    ///
    /// # Arguments
    ///
    /// * `limit` - Maximum number of links to return
    /// * `offset` - Number of links to skip (pagination)
    #[instrument(skip(self))]
    pub async fn links(&self, limit: Option<u32>, offset: Option<u32>) -> Result<LinksPage> {
        debug!("Listing links");

        let http = self.inner.http.clone();
        self.with_auth_retry(move |token| {
            let http = http.clone();
            async move {
                let query = ListLinksQuery { limit, offset };
                http.get_query(LINKS, &query, token.as_deref()).await
            }
        })
        .await
    }

    /// Delete a link by its short code.
    #[instrument(skip(self), fields(%code))]
    pub async fn delete_link(&self, code: &ShortCode) -> Result<()> {
        debug!("Deleting link");

        let http = self.inner.http.clone();
        let path = link_path(code);
        self.with_auth_retry(move |token| {
            let http = http.clone();
            let path = path.clone();
            async move { http.delete(&path, token.as_deref()).await }
        })
        .await
    }

    /// Fetch aggregated analytics for a link.
    #[instrument(skip(self), fields(%code, period = %period))]
    pub async fn analytics(&self, code: &ShortCode, period: Period) -> Result<AnalyticsSummary> {
        debug!("Fetching analytics");

        let http = self.inner.http.clone();
        let path = link_analytics_path(code);
        self.with_auth_retry(move |token| {
            let http = http.clone();
            let path = path.clone();
            async move {
                let query = AnalyticsQuery {
                    period: period.as_str(),
                };
                http.get_query(&path, &query, token.as_deref()).await
            }
        })
        .await
    }

    /// Fetch service-wide public counters.
    pub async fn global_stats(&self) -> Result<GlobalStats> {
        let http = self.inner.http.clone();
        self.with_auth_retry(move |token| {
            let http = http.clone();
            async move { http.get(STATS, token.as_deref()).await }
        })
        .await
    }

    // ========================================================================
    // Request Execution
    // ========================================================================

    /// Issue a request with the current access token, recovering from a
    /// 401 via one shared refresh and at most one retry.
    ///
    /// The retry bound is deliberate: a 401 on the freshly minted token
    /// means the backend is rejecting tokens it just issued, and looping
    /// would never terminate.
    async fn with_auth_retry<T, F, Fut>(&self, call: F) -> Result<T>
    where
        F: Fn(Option<String>) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        // Snapshot the refresh epoch alongside the token: if a refresh
        // settles after this point, the 401 below was earned by a token
        // that refresh already superseded, and no second wire call is
        // warranted.
        let seen = self.inner.refresh_epoch.load(Ordering::Acquire);
        let token = self.access_token_string().await?;
        let first_error = match call(token).await {
            Err(Error::Api(err)) if err.is_auth_error() => err,
            other => return other,
        };

        // A 401 is only recoverable while a refresh token is held;
        // otherwise surface it like any other API error.
        if self.inner.store.tokens().await?.is_none() {
            return Err(Error::Api(first_error));
        }

        self.refresh_shared(seen).await?;

        let token = self.access_token_string().await?;
        match call(token).await {
            Err(Error::Api(err)) if err.is_auth_error() => {
                warn!("Retried request was rejected with a fresh token");
                self.invalidate().await;
                Err(AuthError::SessionExpired.into())
            }
            other => other,
        }
    }

    /// Perform one refresh on behalf of every caller that needs it.
    ///
    /// `seen` is the epoch the caller observed when it read the token
    /// that was then rejected. The first such caller acquires the gate
    /// and issues the wire call; callers that queue behind it (or whose
    /// 401 arrives after it settled) observe the bumped epoch and
    /// consume the settled outcome instead of racing the backend's
    /// refresh endpoint (which may rotate refresh tokens, so a duplicate
    /// call could fail spuriously).
    #[instrument(skip(self, seen))]
    async fn refresh_shared(&self, seen: u64) -> Result<()> {
        let _gate = self.inner.refresh_gate.lock().await;

        if self.inner.refresh_epoch.load(Ordering::Acquire) != seen {
            // A refresh already settled after the caller's token was read.
            return match self.inner.store.tokens().await? {
                Some(_) => Ok(()),
                None => Err(AuthError::SessionExpired.into()),
            };
        }

        let refresh_token = match self.inner.store.tokens().await? {
            Some(pair) => pair.refresh().as_str().to_string(),
            None => {
                self.inner.refresh_epoch.fetch_add(1, Ordering::AcqRel);
                return Err(AuthError::SessionExpired.into());
            }
        };

        info!("Refreshing session");
        let request = RefreshRequest {
            refresh_token: &refresh_token,
        };
        let result = self
            .inner
            .http
            .post::<_, RefreshResponse>(REFRESH, &request, None)
            .await;

        // Settle the gate exactly once, success or failure, so a future
        // expiry can trigger a fresh cycle.
        self.inner.refresh_epoch.fetch_add(1, Ordering::AcqRel);

        match result {
            Ok(response) => {
                // Only the access token is replaced; the refresh token
                // stays as issued at login.
                self.inner
                    .store
                    .replace_access(AccessToken::new(response.access_token))
                    .await?;
                debug!("Session refreshed");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Refresh failed, clearing session");
                self.invalidate().await;
                Err(AuthError::SessionExpired.into())
            }
        }
    }

    /// Tear down the local session and notify subscribers.
    async fn invalidate(&self) {
        if let Err(err) = self.inner.store.clear().await {
            warn!(error = %err, "Failed to clear token store");
        }
        self.inner.events.send_replace(SessionEvent::Invalidated);
    }

    async fn access_token_string(&self) -> Result<Option<String>> {
        Ok(self
            .inner
            .store
            .tokens()
            .await?
            .map(|pair| pair.access().as_str().to_string()))
    }
}

// Custom Debug impl that hides sensitive data
impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base", self.inner.http.base())
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}
