//! HTTP client for network-based API calls

use std::sync::Arc;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use shared::{ApiErrorBody, NETWORK_ERROR_MESSAGE};

use crate::hooks::{LogNavigator, LogNotifier, Navigator, Notifier, LOGIN_PATH};
use crate::token::{MemoryTokenStore, TokenStore};
use crate::{ClientConfig, ClientError, ClientResult};

/// Per-request options
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Toast shown when the request succeeds
    pub success_message: Option<String>,
}

impl RequestOptions {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success_message: Some(message.into()),
        }
    }
}

/// HTTP client for making network requests to the booking backend
///
/// Every request reads the token from the store, so a logout or a 401 seen by
/// one clone is observed by all of them.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens: Arc::new(MemoryTokenStore::new(config.token.clone())),
            notifier: Arc::new(LogNotifier),
            navigator: Arc::new(LogNavigator),
        })
    }

    /// Replace the token store
    pub fn with_token_store(mut self, tokens: Arc<dyn TokenStore>) -> Self {
        self.tokens = tokens;
        self
    }

    /// Replace the toast sink
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Replace the navigator used on 401
    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the current token
    pub fn token(&self) -> Option<String> {
        self.tokens.load()
    }

    pub fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }

    /// Store a token for subsequent requests
    pub fn set_token(&self, token: &str) -> ClientResult<()> {
        self.tokens.save(token)?;
        Ok(())
    }

    /// Drop the session token
    pub fn logout(&self) -> ClientResult<()> {
        self.tokens.clear()?;
        Ok(())
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.tokens.load().map(|t| format!("Bearer {}", t))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let req = self.client.get(self.url(path));
        self.send(req, &RequestOptions::default()).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        options: &RequestOptions,
    ) -> ClientResult<T> {
        let req = self.client.post(self.url(path)).json(body);
        self.send(req, options).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        mut req: RequestBuilder,
        options: &RequestOptions,
    ) -> ClientResult<T> {
        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = match req.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Request failed before reaching the server");
                self.notifier.error(NETWORK_ERROR_MESSAGE);
                return Err(e.into());
            }
        };

        let data = self.handle_response(response).await?;
        if let Some(message) = &options.success_message {
            self.notifier.success(message);
        }
        Ok(data)
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();
        let url = response.url().path().to_string();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = ApiErrorBody::message_from(&text);
            tracing::warn!(%status, path = %url, %message, "Request rejected");

            if status == StatusCode::UNAUTHORIZED {
                if let Err(e) = self.tokens.clear() {
                    tracing::error!(error = %e, "Failed to clear token after 401");
                }
                self.navigator.navigate(LOGIN_PATH);
            }

            self.notifier.error(&message);

            return Err(match status {
                StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
                _ => ClientError::Api { status, message },
            });
        }

        let text = response.text().await?;
        if status == StatusCode::NO_CONTENT || text.trim().is_empty() {
            return empty_value();
        }

        serde_json::from_str(&text).map_err(|e| {
            tracing::warn!(path = %url, error = %e, "Unexpected response body");
            ClientError::Serialization(e)
        })
    }
}

/// Value returned for bodiless responses: `null` for `()`/`Option`, `{}` for structs
fn empty_value<T: DeserializeOwned>() -> ClientResult<T> {
    serde_json::from_str("null")
        .or_else(|_| serde_json::from_str("{}"))
        .map_err(|_| ClientError::InvalidResponse("Empty response body".to_string()))
}
