//! HTTP implementation of [`UserSearchApi`].
//!
//! One GET per call, bounded by the configured timeout and never retried.
//! The response status decides how the body is decoded:
//!
//! | status | result |
//! |---|---|
//! | 401 | `BadAccessToken` |
//! | 500 | `ServerFatal` |
//! | 400 | `{"Error": code}` mapped to `BadOrderField` / `UnknownBadRequest` |
//! | other | JSON array of users, paginated by over-fetch |

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::api::rest::dto::{ErrorResponseDto, UserDto};
use crate::contract::{
    client::UserSearchApi,
    error::SearchClientError,
    model::{SearchRequest, SearchResponse, User, ACCESS_TOKEN_HEADER},
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct SearchClientConfig {
    /// Full URL of the search endpoint, query string excluded.
    pub base_url: Url,
    /// Sent verbatim in the `AccessToken` header.
    pub access_token: String,
    pub timeout: Duration,
}

impl SearchClientConfig {
    pub fn new(base_url: Url, access_token: impl Into<String>) -> Self {
        Self {
            base_url,
            access_token: access_token.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Search client talking to a remote search server.
#[derive(Clone)]
pub struct HttpSearchClient {
    inner: reqwest::Client,
    config: SearchClientConfig,
}

impl HttpSearchClient {
    pub fn new(config: SearchClientConfig) -> Result<Self, SearchClientError> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SearchClientError::Config {
                message: e.to_string(),
            })?;
        Ok(Self { inner, config })
    }

    pub fn config(&self) -> &SearchClientConfig {
        &self.config
    }
}

#[async_trait]
impl UserSearchApi for HttpSearchClient {
    #[instrument(
        name = "user_search.gateways.http.find_users",
        skip(self, req),
        fields(url = %self.config.base_url, limit = req.limit, offset = req.offset)
    )]
    async fn find_users(&self, req: SearchRequest) -> Result<SearchResponse, SearchClientError> {
        let prepared = req.prepare()?;
        let params = prepared.encoded();

        let mut url = self.config.base_url.clone();
        url.set_query(Some(&params));

        let resp = self
            .inner
            .get(url)
            .header(ACCESS_TOKEN_HEADER, &self.config.access_token)
            .send()
            .await
            .map_err(|e| map_transport(e, &params))?;

        let status = resp.status();
        debug!(status = status.as_u16(), "search response received");

        match status {
            StatusCode::UNAUTHORIZED => return Err(SearchClientError::BadAccessToken),
            StatusCode::INTERNAL_SERVER_ERROR => return Err(SearchClientError::ServerFatal),
            _ => {}
        }

        let body = resp.bytes().await.map_err(|e| map_transport(e, &params))?;

        if status == StatusCode::BAD_REQUEST {
            let err: ErrorResponseDto =
                serde_json::from_slice(&body).map_err(|e| SearchClientError::UnpackError {
                    message: e.to_string(),
                })?;
            return Err(SearchClientError::from_bad_request(
                &err.error,
                &prepared.order_field,
            ));
        }

        let users: Vec<UserDto> =
            serde_json::from_slice(&body).map_err(|e| SearchClientError::UnpackResult {
                message: e.to_string(),
            })?;
        let users: Vec<User> = users.into_iter().map(User::from).collect();

        Ok(SearchResponse::from_overfetched(users, prepared.fetch_limit))
    }
}

/// A timeout while sending or while reading the body is `Timeout`; anything
/// else reqwest reports is a transport failure.
fn map_transport(e: reqwest::Error, params: &str) -> SearchClientError {
    if e.is_timeout() {
        warn!(params, "search request timed out");
        SearchClientError::Timeout {
            params: params.to_owned(),
        }
    } else {
        SearchClientError::transport(e.to_string())
    }
}
