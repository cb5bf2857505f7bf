//! Main Cancionero API client.

use crate::error::{ApiError, Result};
use crate::storage::{KeyValueStore, MemoryStore, AUTH_TOKEN_KEY};
use crate::types::{ClientConfig, ErrorBody};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Per-call options for [`ApiClient::request`].
///
/// Headers given here are merged over the defaults and win on conflict.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    pub fn put() -> Self {
        Self::new(Method::PUT)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    /// Serialize `body` as the JSON request body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let bytes = serde_json::to_vec(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.body = Some(bytes);
        Ok(self)
    }

    pub fn header(mut self, name: reqwest::header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::get()
    }
}

/// Client for the catalog API.
///
/// Holds the base URL and the bearer token. The token is loaded from the
/// configured [`KeyValueStore`] at construction and written back on every
/// [`set_token`](Self::set_token).
///
/// # Example
///
/// ```ignore
/// use cancionero_client::{ApiClient, ClientConfig, Credentials};
///
/// let client = ApiClient::new(ClientConfig::new("http://localhost:8000"))?;
/// let login = client.login(&Credentials::new("ana@example.com", "secret")).await?;
/// client.set_token(Some(login.access_token)).await?;
///
/// let me = client.get_me().await?;
/// println!("Logged in as {}", me.name);
/// ```
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: RwLock<Option<String>>,
    storage: Arc<dyn KeyValueStore>,
}

impl ApiClient {
    /// Create a client whose token lives only in memory.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_storage(config, Arc::new(MemoryStore::new()))
    }

    /// Create a client that persists its token in `storage`.
    ///
    /// A token already present in `storage` is picked up immediately.
    pub fn with_storage(config: ClientConfig, storage: Arc<dyn KeyValueStore>) -> Result<Self> {
        let base_url = normalize_base_url(&config.base_url)?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(format!("Cancionero/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Connection(e.to_string()))?;

        let token = match storage.get(AUTH_TOKEN_KEY) {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Failed to load persisted token, starting without one");
                None
            }
        };

        debug!(base_url = %base_url, has_token = token.is_some(), "Created API client");

        Ok(Self {
            http,
            base_url,
            token: RwLock::new(token),
            storage,
        })
    }

    /// Get the server URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Current bearer token, if any.
    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    /// Check if the client has a bearer token.
    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// Replace the bearer token and persist it; `None` clears it.
    ///
    /// The in-memory token is updated even if persisting fails.
    pub async fn set_token(&self, token: Option<String>) -> Result<()> {
        let persisted = match &token {
            Some(value) => self.storage.set(AUTH_TOKEN_KEY, value),
            None => self.storage.remove(AUTH_TOKEN_KEY),
        };

        let cleared = token.is_none();
        *self.token.write().await = token;

        if cleared {
            info!("Cleared session token");
        } else {
            debug!("Stored session token");
        }

        persisted.map_err(ApiError::from)
    }

    /// Perform one request against `endpoint` (path plus query, relative to
    /// the base URL) and decode the JSON response as `T`.
    ///
    /// A `204 No Content` response decodes from an empty JSON object.
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = self.token.read().await.as_deref() {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ApiError::InvalidToken)?;
            headers.insert(AUTHORIZATION, value);
        }
        headers.extend(options.headers);

        debug!(method = %options.method, url = %url, "Sending request");

        let mut builder = self.http.request(options.method, &url).headers(headers);
        if let Some(body) = options.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Request failed before a response arrived");
            ApiError::Connection(e.to_string())
        })?;

        let status = response.status();

        if !status.is_success() {
            let fallback = format!("HTTP {}", status.as_u16());
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message())
                .unwrap_or(fallback);

            debug!(status = %status, message = %message, "Server returned an error");
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            });
        }

        if status == StatusCode::NO_CONTENT {
            return serde_json::from_value(serde_json::Value::Object(serde_json::Map::new()))
                .map_err(|e| ApiError::Decode(e.to_string()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Connection(e.to_string()))?;

        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Run a request whose response body is irrelevant.
    pub(crate) async fn request_discard(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<()> {
        self.request::<serde_json::Value>(endpoint, options)
            .await
            .map(|_| ())
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    if raw.is_empty() {
        return Err(ApiError::InvalidUrl("URL cannot be empty".into()));
    }

    let url = raw.trim_end_matches('/').to_string();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ApiError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }

    Ok(url)
}
