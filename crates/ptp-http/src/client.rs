//! [`ApiClient`] over HTTP using `reqwest`.

use std::sync::Arc;
use std::time::Duration;

use ptp_api::{
    ApiClient, ApiError, AppConfig, Camp, ClientError, LoginCredentials, LoginResponse, Session,
    TokenManager, TokenStore, Trainer, User,
};
use serde::de::DeserializeOwned;

use crate::HttpError;

/// REST namespace registered by the PTP plugin.
const PTP_NAMESPACE: &str = "/wp-json/ptp/v1";

/// Token endpoint of the JWT auth plugin.
const LOGIN_PATH: &str = "/wp-json/jwt-auth/v1/token";

// ---------------------------------------------------------------------------
// HttpClientConfig
// ---------------------------------------------------------------------------

/// Settings for [`HttpApiClient`].
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Site root, e.g. `https://ptpsummercamps.com`. A trailing slash is
    /// ignored.
    pub base_url: String,

    /// Upper bound for a whole request, connect included.
    pub request_timeout: Duration,

    /// Upper bound for establishing the TCP/TLS connection.
    pub connect_timeout: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://ptpsummercamps.com".to_string(),
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

// ---------------------------------------------------------------------------
// HttpApiClient
// ---------------------------------------------------------------------------

/// Talks to the PTP WordPress plugin.
///
/// Every request carries `Authorization: Bearer <token>` when the shared
/// [`TokenManager`] holds a token. Non-2xx responses become a
/// [`ClientError`] parsed from the WordPress error body.
pub struct HttpApiClient<S: TokenStore> {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<TokenManager<S>>,
}

impl<S: TokenStore> HttpApiClient<S> {
    /// Builds a client that reads its bearer token from `tokens`.
    ///
    /// # Errors
    /// - [`HttpError::InvalidBaseUrl`] if `base_url` isn't an http(s) URL
    /// - [`HttpError::Build`] if reqwest rejects the configuration
    pub fn new(config: HttpClientConfig, tokens: Arc<TokenManager<S>>) -> Result<Self, HttpError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(HttpError::InvalidBaseUrl(config.base_url));
        }

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(HttpError::Build)?;

        tracing::debug!(base_url = %base_url, "HTTP API client ready");
        Ok(Self {
            http,
            base_url,
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The token manager this client reads from.
    pub fn tokens(&self) -> &Arc<TokenManager<S>> {
        &self.tokens
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.tokens.current() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = self.url(&format!("{PTP_NAMESPACE}{endpoint}"));
        let request = self.authorize(self.http.get(&url));
        self.execute(request, endpoint).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        endpoint: &str,
    ) -> Result<T, ApiError> {
        let response = request.send().await.map_err(|e| {
            tracing::debug!(endpoint, error = %e, "request failed to complete");
            ApiError::Network(e.to_string())
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        tracing::trace!(endpoint, status, "response received");
        decode_response(status, &body)
    }
}

impl<S: TokenStore> ApiClient for HttpApiClient<S> {
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginResponse, ApiError> {
        // Login never carries an old bearer token.
        let request = self.http.post(self.url(LOGIN_PATH)).json(credentials);
        self.execute(request, LOGIN_PATH).await
    }

    async fn get_me(&self) -> Result<User, ApiError> {
        self.get("/me").await
    }

    async fn get_camps(&self) -> Result<Vec<Camp>, ApiError> {
        self.get("/camps").await
    }

    async fn get_trainers(&self) -> Result<Vec<Trainer>, ApiError> {
        self.get("/trainers").await
    }

    async fn get_sessions(&self) -> Result<Vec<Session>, ApiError> {
        self.get("/sessions").await
    }

    async fn get_app_config(&self) -> Result<AppConfig, ApiError> {
        self.get("/app-config").await
    }
}

/// Turns a status + body into the expected type or an [`ApiError`].
///
/// Kept free of I/O so the mapping can be tested without a server.
pub(crate) fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ClientError::from_response(status, body).into());
    }
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}
