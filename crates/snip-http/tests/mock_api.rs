//! Mock API tests for the snip client.
//!
//! These tests use wiremock to simulate the backend and exercise the
//! client's token lifecycle without network access: login/logout state
//! transitions, transparent retry-on-401, single-flight refresh
//! coordination, and session-invalidation events.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

use snip_core::error::{AuthError, Error};
use snip_core::{
    AccessToken, ApiUrl, Credentials, MemoryTokenStore, Period, RefreshToken, SessionEvent,
    ShortCode, TokenPair,
};
use snip_http::ApiClient;

/// Helper to create an API URL from a mock server.
fn mock_api_url(server: &MockServer) -> ApiUrl {
    // For tests, we need to allow HTTP localhost
    ApiUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap()
}

/// Client with no stored session.
fn anonymous_client(server: &MockServer) -> ApiClient {
    ApiClient::new(mock_api_url(server))
}

/// Client seeded with a stored token pair.
fn seeded_client(server: &MockServer, access: &str, refresh: &str) -> ApiClient {
    let pair = TokenPair::new(AccessToken::new(access), RefreshToken::new(refresh));
    ApiClient::with_store(
        mock_api_url(server),
        Arc::new(MemoryTokenStore::with_pair(pair)),
    )
}

/// Matches requests carrying no Authorization header at all.
struct NoAuthHeader;

impl Match for NoAuthHeader {
    fn matches(&self, request: &Request) -> bool {
        !request.headers.contains_key("authorization")
    }
}

fn link_json() -> serde_json::Value {
    json!({
        "id": 1,
        "short_code": "Ab3xYz",
        "long_url": "https://example.com/some/long/path",
        "created_at": "2026-01-15T10:30:00Z",
        "user_id": 1
    })
}

// ============================================================================
// Authentication Tests
// ============================================================================

#[tokio::test]
async fn test_login_stores_token_pair() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .and(body_json(json!({
            "email": "a@b.com",
            "password": "secret123"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "A1",
            "refresh_token": "R1",
            "user": {"id": 1, "email": "a@b.com"}
        })))
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    let user = client
        .login(&Credentials::new("a@b.com", "secret123"))
        .await
        .unwrap();

    assert_eq!(user.id, 1);
    assert_eq!(user.email, "a@b.com");

    let pair = client.export_tokens().await.unwrap().unwrap();
    assert_eq!(pair.access().as_str(), "A1");
    assert_eq!(pair.refresh().as_str(), "R1");
    assert!(client.is_authenticated().await);
}

#[tokio::test]
async fn test_login_failure_mutates_no_token_state() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "invalid_credentials",
            "message": "Invalid email or password"
        })))
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    let result = client.login(&Credentials::new("a@b.com", "wrongpass")).await;

    let err = result.unwrap_err();
    assert!(err.to_string().contains("Invalid email or password"));
    assert!(client.export_tokens().await.unwrap().is_none());
}

#[tokio::test]
async fn test_register_returns_user_id_without_tokens() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/register"))
        .and(body_json(json!({
            "email": "a@b.com",
            "password": "secret123"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"user_id": 42})))
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    let user_id = client
        .register(&Credentials::new("a@b.com", "secret123"))
        .await
        .unwrap();

    assert_eq!(user_id, 42);
    assert!(!client.is_authenticated().await);
}

#[tokio::test]
async fn test_current_user_attaches_bearer() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/auth/me"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": 1, "email": "a@b.com"})),
        )
        .mount(&server)
        .await;

    let client = seeded_client(&server, "A1", "R1");
    let user = client.current_user().await.unwrap();
    assert_eq!(user.email, "a@b.com");
}

#[tokio::test]
async fn test_logout_is_best_effort_and_always_clears() {
    let server = MockServer::start().await;

    // Server-side revocation fails; logout must still succeed locally.
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/logout"))
        .and(body_json(json!({"refresh_token": "R1"})))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let client = seeded_client(&server, "A1", "R1");
    let mut events = client.session_events();

    client.logout().await.unwrap();

    assert!(client.export_tokens().await.unwrap().is_none());
    assert!(events.has_changed().unwrap());
    assert_eq!(*events.borrow_and_update(), SessionEvent::LoggedOut);
}

// ============================================================================
// Refresh / Retry Tests
// ============================================================================

#[tokio::test]
async fn test_stale_token_refreshes_and_retries_transparently() {
    let server = MockServer::start().await;

    // The stale token is rejected once.
    Mock::given(method("GET"))
        .and(path("/api/v1/links"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "token_expired",
            "message": "Access token has expired"
        })))
        .expect(1)
        .mount(&server)
        .await;

    // Exactly one refresh call, carrying the stored refresh token.
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/refresh"))
        .and(body_json(json!({"refresh_token": "R1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "A2"})))
        .expect(1)
        .mount(&server)
        .await;

    // The retried request succeeds with the fresh token.
    Mock::given(method("GET"))
        .and(path("/api/v1/links"))
        .and(header("authorization", "Bearer A2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "links": [link_json()],
            "total": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = seeded_client(&server, "A1", "R1");
    let page = client.links(Some(10), Some(0)).await.unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.links[0].short_code, "Ab3xYz");

    // The refresh replaced only the access token.
    let pair = client.export_tokens().await.unwrap().unwrap();
    assert_eq!(pair.access().as_str(), "A2");
    assert_eq!(pair.refresh().as_str(), "R1");
}

#[tokio::test]
async fn test_failed_refresh_clears_session_and_notifies_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/links"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "token_expired"})))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/refresh"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "token_revoked"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = seeded_client(&server, "A1", "R1");
    let mut events = client.session_events();

    let err = client.links(None, None).await.unwrap_err();
    assert!(matches!(err, Error::Auth(AuthError::SessionExpired)));

    // Both tokens gone, invalidation observed.
    assert!(client.export_tokens().await.unwrap().is_none());
    assert!(events.has_changed().unwrap());
    assert_eq!(*events.borrow_and_update(), SessionEvent::Invalidated);
}

#[tokio::test]
async fn test_concurrent_requests_share_one_refresh() {
    let server = MockServer::start().await;

    // Both concurrent requests start out with the stale token.
    Mock::given(method("GET"))
        .and(path("/api/v1/links"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "token_expired"})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/links/Ab3xYz/analytics"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "token_expired"})))
        .mount(&server)
        .await;

    // The wire-level property: exactly one refresh call for both callers.
    // The delay widens the race window so the second 401 lands while the
    // first caller's refresh is still in flight.
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/refresh"))
        .and(body_json(json!({"refresh_token": "R1"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "fresh"}))
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/links"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "links": [link_json()],
            "total": 1
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/links/Ab3xYz/analytics"))
        .and(header("authorization", "Bearer fresh"))
        .and(query_param("period", "7d"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "link_id": 1,
            "period": "7d",
            "total_clicks": 5,
            "unique_visitors": 3
        })))
        .mount(&server)
        .await;

    let client = seeded_client(&server, "stale", "R1");
    let code = ShortCode::new("Ab3xYz").unwrap();

    let (links, analytics) = tokio::join!(
        client.links(None, None),
        client.analytics(&code, Period::Week),
    );

    assert_eq!(links.unwrap().total, 1);
    assert_eq!(analytics.unwrap().total_clicks, 5);
}

#[tokio::test]
async fn test_concurrent_callers_all_fail_when_shared_refresh_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/links"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "token_expired"})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/links/Ab3xYz/analytics"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "token_expired"})))
        .mount(&server)
        .await;

    // Still exactly one refresh on the wire; this time it fails. The
    // delay keeps it in flight while the second caller's 401 queues
    // behind the gate, so both consume the same failed outcome.
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/refresh"))
        .and(body_json(json!({"refresh_token": "R1"})))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"error": "token_revoked"}))
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = seeded_client(&server, "stale", "R1");
    let code = ShortCode::new("Ab3xYz").unwrap();

    let (links, analytics) = tokio::join!(
        client.links(None, None),
        client.analytics(&code, Period::Week),
    );

    assert!(matches!(
        links.unwrap_err(),
        Error::Auth(AuthError::SessionExpired)
    ));
    assert!(matches!(
        analytics.unwrap_err(),
        Error::Auth(AuthError::SessionExpired)
    ));
    assert!(client.export_tokens().await.unwrap().is_none());
}

#[tokio::test]
async fn test_retry_is_bounded_to_one() {
    let server = MockServer::start().await;

    // The backend rejects even freshly minted tokens. The client must
    // attempt the request exactly twice and then give up.
    Mock::given(method("GET"))
        .and(path("/api/v1/links"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "token_expired"})))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "A2"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = seeded_client(&server, "A1", "R1");
    let mut events = client.session_events();

    let err = client.links(None, None).await.unwrap_err();
    assert!(matches!(err, Error::Auth(AuthError::SessionExpired)));

    assert!(client.export_tokens().await.unwrap().is_none());
    assert_eq!(*events.borrow_and_update(), SessionEvent::Invalidated);
}

#[tokio::test]
async fn test_401_without_refresh_token_is_plain_api_error() {
    let server = MockServer::start().await;

    // No refresh endpoint is mounted: a refresh attempt would fail the
    // unmatched-request check.
    Mock::given(method("GET"))
        .and(path("/api/v1/links"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "unauthorized",
            "message": "Authentication required"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    let err = client.links(None, None).await.unwrap_err();

    match err {
        Error::Api(api) => {
            assert_eq!(api.status, 401);
            assert_eq!(api.message.as_deref(), Some("Authentication required"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

// ============================================================================
// Link Operation Tests
// ============================================================================

#[tokio::test]
async fn test_anonymous_shorten_sends_no_bearer() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/links/shorten"))
        .and(NoAuthHeader)
        .and(body_json(json!({"url": "https://example.com/long"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "short_code": "Ab3xYz",
            "long_url": "https://example.com/long"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    let created = client.shorten("https://example.com/long").await.unwrap();

    assert_eq!(created.short_code, "Ab3xYz");
}

#[tokio::test]
async fn test_public_endpoint_attaches_bearer_opportunistically() {
    let server = MockServer::start().await;

    // Stats needs no auth, but an authenticated caller still sends the
    // bearer so the backend can personalize if it wants to.
    Mock::given(method("GET"))
        .and(path("/api/v1/links/stats"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_links": 1234,
            "total_requests": 56789
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = seeded_client(&server, "A1", "R1");
    let stats = client.global_stats().await.unwrap();

    assert_eq!(stats.total_links, 1234);
    assert_eq!(stats.total_requests, 56789);
}

#[tokio::test]
async fn test_delete_resolves_204_as_unit() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/links/Ab3xYz"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = seeded_client(&server, "A1", "R1");
    let code = ShortCode::new("Ab3xYz").unwrap();

    client.delete_link(&code).await.unwrap();
}

#[tokio::test]
async fn test_list_links_passes_pagination() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/links"))
        .and(query_param("limit", "25"))
        .and(query_param("offset", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "links": [],
            "total": 120
        })))
        .mount(&server)
        .await;

    let client = seeded_client(&server, "A1", "R1");
    let page = client.links(Some(25), Some(50)).await.unwrap();

    assert!(page.links.is_empty());
    assert_eq!(page.total, 120);
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[tokio::test]
async fn test_error_message_taken_from_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/links/stats"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": "unavailable",
            "message": "database unavailable"
        })))
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    let err = client.global_stats().await.unwrap_err();

    let rendered = err.to_string();
    assert!(rendered.contains("503"));
    assert!(rendered.contains("database unavailable"));
}

#[tokio::test]
async fn test_generic_message_for_non_json_error_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/links/stats"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    let err = client.global_stats().await.unwrap_err();

    assert_eq!(err.to_string(), "HTTP error 500");
}

#[tokio::test]
async fn test_manual_refresh_restores_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/refresh"))
        .and(body_json(json!({"refresh_token": "R1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "A2"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = seeded_client(&server, "A1", "R1");
    client.refresh().await.unwrap();

    let pair = client.export_tokens().await.unwrap().unwrap();
    assert_eq!(pair.access().as_str(), "A2");
    assert_eq!(pair.refresh().as_str(), "R1");
}
