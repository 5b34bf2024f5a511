//! Low-level HTTP client for the snip API.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use snip_core::error::{Error, TransportError};
use snip_core::{ApiUrl, Result};

use crate::endpoints::ApiErrorResponse;

/// Default timeout for a single request, connection setup included.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for snip API requests.
///
/// Issues individual requests against the base URL; retry and token
/// handling live a layer up in [`crate::ApiClient`].
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base: ApiUrl,
}

impl HttpClient {
    /// Create a new HTTP client for the given API base URL.
    pub fn new(base: ApiUrl) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("snip/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");

        Self { client, base }
    }

    /// Returns the API base URL this client is configured for.
    pub fn base(&self) -> &ApiUrl {
        &self.base
    }

    /// Make a GET request.
    #[instrument(skip(self, token), fields(base = %self.base))]
    pub async fn get<R>(&self, path: &str, token: Option<&str>) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let url = self.base.endpoint_url(path);
        debug!(path, "GET");

        let response = self
            .client
            .get(&url)
            .headers(self.headers(token))
            .send()
            .await
            .map_err(transport_error)?;

        self.handle_response(response).await
    }

    /// Make a GET request with query parameters.
    #[instrument(skip(self, query, token), fields(base = %self.base))]
    pub async fn get_query<Q, R>(&self, path: &str, query: &Q, token: Option<&str>) -> Result<R>
    where
        Q: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        let url = self.base.endpoint_url(path);
        debug!(path, "GET");
        trace!(?query, "query parameters");

        let response = self
            .client
            .get(&url)
            .query(query)
            .headers(self.headers(token))
            .send()
            .await
            .map_err(transport_error)?;

        self.handle_response(response).await
    }

    /// Make a POST request with a JSON body.
    #[instrument(skip(self, body, token), fields(base = %self.base))]
    pub async fn post<B, R>(&self, path: &str, body: &B, token: Option<&str>) -> Result<R>
    where
        B: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        let url = self.base.endpoint_url(path);
        debug!(path, "POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .headers(self.headers(token))
            .send()
            .await
            .map_err(transport_error)?;

        self.handle_response(response).await
    }

    /// Make a DELETE request.
    #[instrument(skip(self, token), fields(base = %self.base))]
    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<()> {
        let url = self.base.endpoint_url(path);
        debug!(path, "DELETE");

        let response = self
            .client
            .delete(&url)
            .headers(self.headers(token))
            .send()
            .await
            .map_err(transport_error)?;

        self.handle_response(response).await
    }

    /// Create request headers, attaching a bearer token when one is held.
    fn headers(&self, token: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = token {
            let auth_value = format!("Bearer {}", token);
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&auth_value).expect("invalid token characters"),
            );
        }
        headers
    }

    /// Handle an API response, parsing the body or error.
    async fn handle_response<R: DeserializeOwned>(&self, response: reqwest::Response) -> Result<R> {
        let status = response.status();
        trace!(status = %status, "API response");

        // 204 decodes from JSON null, so unit results resolve cleanly
        // instead of tripping a body-parse failure.
        if status == StatusCode::NO_CONTENT {
            return serde_json::from_value(serde_json::Value::Null).map_err(|e| {
                Error::Transport(TransportError::Decode {
                    message: e.to_string(),
                })
            });
        }

        if status.is_success() {
            response.json::<R>().await.map_err(transport_error)
        } else {
            Err(Error::Api(self.parse_error_response(response).await))
        }
    }

    /// Parse an API error response body.
    async fn parse_error_response(&self, response: reqwest::Response) -> snip_core::error::ApiError {
        let status = response.status().as_u16();

        // Try to parse as the documented {error, message} format
        match response.json::<ApiErrorResponse>().await {
            Ok(body) => snip_core::error::ApiError::new(status, body.error, body.message),
            Err(_) => snip_core::error::ApiError::new(status, None, None),
        }
    }
}

/// Map a reqwest error onto the crate's transport taxonomy.
fn transport_error(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else if err.is_decode() {
        TransportError::Decode {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let base = ApiUrl::new("https://snip.example").unwrap();
        let client = HttpClient::new(base.clone());
        assert_eq!(client.base().as_str(), base.as_str());
    }

    #[test]
    fn bearer_header_only_when_token_held() {
        let client = HttpClient::new(ApiUrl::new("https://snip.example").unwrap());

        let headers = client.headers(None);
        assert!(!headers.contains_key(AUTHORIZATION));

        let headers = client.headers(Some("A1"));
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer A1");
    }
}
