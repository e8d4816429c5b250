//! Backend API client module
//!
//! A thin JSON client for the slotbook backend. Every request carries the
//! current bearer token when one is known; a 401 response clears the token
//! so the caller can send the user back through login. Nothing is retried.

use crate::token::TokenStore;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use slotbook_common::{create_client, status_error, SlotbookError};
use slotbook_config::ApiConfig;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur when calling the backend API
#[derive(Error, Debug)]
pub enum ApiError {
    /// Error during HTTP request to the backend
    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// The backend rejected the bearer token; it has been cleared
    #[error("Unauthorized: session token rejected")]
    Unauthorized,

    /// Any other non-success response
    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<ApiError> for SlotbookError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::RequestError(e) => SlotbookError::from(e),
            ApiError::Unauthorized => {
                SlotbookError::AuthError("session expired, please log in again".to_string())
            }
            ApiError::Status { status, body } => status_error(status, body),
            ApiError::Decode(e) => SlotbookError::from(e),
            ApiError::InvalidInput(msg) => SlotbookError::ValidationError(msg),
        }
    }
}

/// Client for the backend JSON API
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: TokenStore,
}

impl ApiClient {
    /// Creates a client from the `[api]` config section.
    pub fn new(config: &ApiConfig, tokens: TokenStore) -> Result<Self, ApiError> {
        let client = create_client(config.timeout_secs, true)?;
        Ok(Self::with_client(client, &config.base_url, tokens))
    }

    /// Uses an existing reqwest client, e.g. one pointed at a test server.
    pub fn with_client(client: Client, base_url: &str, tokens: TokenStore) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.tokens.get() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        debug!("{} {}", status.as_u16(), response.url());

        if status == StatusCode::UNAUTHORIZED {
            warn!("Backend rejected the session token, clearing it");
            self.tokens.clear();
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        // Empty 2xx bodies decode as JSON null, so `()` and `Option<_>` work
        let body: &[u8] = if bytes.is_empty() { b"null" } else { &bytes };
        Ok(serde_json::from_slice(body)?)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.client.get(self.url(path))).await
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.send(self.client.get(self.url(path)).query(query)).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.client.post(self.url(path)).json(body)).await
    }

    /// POST without a request body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.client.post(self.url(path))).await
    }
}
