//! The HTTP client wrapper
//!
//! One dispatch path serves all four verbs: intercept the outgoing request
//! (attach the bearer token or raise the login side effects), send it, then
//! intercept the response (unwrap the body or map the failure).

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, ClientBuilder, Method, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::auth::TokenStore;
use crate::config::{self, ClientConfig};
use crate::error::ClientError;
use crate::ui::{Navigation, UiSink};

#[cfg(not(target_arch = "wasm32"))]
use crate::auth::MemoryTokenStore;
#[cfg(not(target_arch = "wasm32"))]
use crate::ui::TracingUiSink;

#[cfg(target_arch = "wasm32")]
use crate::auth::BrowserTokenStore;
#[cfg(target_arch = "wasm32")]
use crate::ui::BrowserUiSink;

/// Per-call adjustments merged over the client configuration.
#[derive(Clone, Debug, Default)]
pub struct RequestOverrides {
    headers: Vec<(String, String)>,
    query: Vec<(String, String)>,
}

impl RequestOverrides {
    /// Empty overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header to this call only.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add a query pair to this call only.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }
}

/// Response wrapper the backend uses for most endpoints.
///
/// The exact shape is owned by the backend; anything beside `data` lands in
/// `extra` untouched. Callers are free to target any other
/// [`DeserializeOwned`] type instead.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct Envelope<T> {
    /// The payload proper.
    pub data: T,
    /// Remaining envelope fields (status code, message, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Foyer API client
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: Arc<ClientConfig>,
    tokens: Arc<dyn TokenStore>,
    ui: Arc<dyn UiSink>,
}

impl ApiClient {
    /// Create a client with default configuration.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a client with the base URL taken from the environment:
    /// `API_BASE_URL` natively, `window.location.origin` in the browser.
    pub fn from_env() -> Result<Self, ClientError> {
        let base_url = config::discover_base_url().ok_or_else(|| {
            ClientError::Configuration(format!(
                "no base URL configured and {} is not set",
                config::BASE_URL_ENV
            ))
        })?;
        Self::builder().base_url(base_url).build()
    }

    /// Create a client builder.
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// The credential store backing this client.
    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// Issue a GET request.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        overrides: Option<RequestOverrides>,
    ) -> Result<T, ClientError> {
        self.send(Method::GET, path, None::<&()>, overrides).await
    }

    /// Issue a POST request with a JSON body.
    pub async fn post<T, D>(
        &self,
        path: &str,
        data: &D,
        overrides: Option<RequestOverrides>,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        D: Serialize + ?Sized,
    {
        self.send(Method::POST, path, Some(data), overrides).await
    }

    /// Issue a PUT request with a JSON body.
    pub async fn put<T, D>(
        &self,
        path: &str,
        data: &D,
        overrides: Option<RequestOverrides>,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        D: Serialize + ?Sized,
    {
        self.send(Method::PUT, path, Some(data), overrides).await
    }

    /// Issue a DELETE request.
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        overrides: Option<RequestOverrides>,
    ) -> Result<T, ClientError> {
        self.send(Method::DELETE, path, None::<&()>, overrides).await
    }

    /// The single dispatch path behind every verb.
    async fn send<T, D>(
        &self,
        method: Method,
        path: &str,
        body: Option<&D>,
        overrides: Option<RequestOverrides>,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        D: Serialize + ?Sized,
    {
        let token = self.tokens.get();
        if token.is_none() && !self.config.is_public_path(path) {
            self.ui.notify_error(&ClientError::MissingToken.to_string());
            self.ui.navigate(Navigation::Login);
            if !self.config.dispatch_without_token {
                return Err(ClientError::MissingToken);
            }
            // Dispatch anyway and let the server reject on its own terms.
        }

        let url = format!("{}{}", self.config.base_url, path);
        debug!(%method, %url, "dispatching request");

        let mut request = self.http.request(method, &url);

        if let Some(token) = &token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(overrides) = overrides {
            for (name, value) in &overrides.headers {
                request = request.header(name, value);
            }
            if !overrides.query.is_empty() {
                request = request.query(&overrides.query);
            }
        }
        #[cfg(target_arch = "wasm32")]
        if self.config.include_credentials {
            request = request.fetch_credentials_include();
        }

        // A send error means no response was received at all (connect
        // failure, timeout); error statuses come back as responses.
        let response = request.send().await.map_err(ClientError::Transport)?;
        let status = response.status();

        if status.is_success() {
            return response.json().await.map_err(ClientError::Decode);
        }

        let error = ClientError::from_status(status);
        if error.is_session_expired() {
            self.tokens.clear();
        }
        warn!(status = status.as_u16(), %url, "request failed");
        self.ui.notify_error(&error.to_string());
        if let Some(target) = error.navigation() {
            self.ui.navigate(target);
        }
        Err(error)
    }
}

/// Builder for [`ApiClient`]
#[derive(Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    include_credentials: Option<bool>,
    public_paths: Option<Vec<String>>,
    dispatch_without_token: Option<bool>,
    token_store: Option<Arc<dyn TokenStore>>,
    ui: Option<Arc<dyn UiSink>>,
}

impl ApiClientBuilder {
    /// Set the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Include cookies on cross-origin requests (browser targets only).
    pub fn include_credentials(mut self, include: bool) -> Self {
        self.include_credentials = Some(include);
        self
    }

    /// Replace the paths callable without a credential.
    pub fn public_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.public_paths = Some(paths.into_iter().map(Into::into).collect());
        self
    }

    /// Whether protected-path requests still go out with no stored
    /// credential (the original frontend behavior, and the default).
    pub fn dispatch_without_token(mut self, dispatch: bool) -> Self {
        self.dispatch_without_token = Some(dispatch);
        self
    }

    /// Use a specific credential store.
    pub fn token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.token_store = Some(store);
        self
    }

    /// Use a specific notification/navigation sink.
    pub fn ui_sink(mut self, sink: Arc<dyn UiSink>) -> Self {
        self.ui = Some(sink);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ApiClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        let mut config = ClientConfig::new(base_url);
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        if let Some(include) = self.include_credentials {
            config.include_credentials = include;
        }
        if let Some(paths) = self.public_paths {
            config.public_paths = paths;
        }
        if let Some(dispatch) = self.dispatch_without_token {
            config.dispatch_without_token = dispatch;
        }

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let mut http_builder = ClientBuilder::new().default_headers(headers);

        #[cfg(not(target_arch = "wasm32"))]
        {
            http_builder = http_builder.timeout(config.timeout);
        }

        if let Some(user_agent) = self.user_agent {
            http_builder = http_builder.user_agent(user_agent);
        } else {
            http_builder = http_builder.user_agent("foyer-client/0.1.0");
        }

        let http = http_builder
            .build()
            .map_err(|e| ClientError::Configuration(e.to_string()))?;

        #[cfg(not(target_arch = "wasm32"))]
        let tokens = self
            .token_store
            .unwrap_or_else(|| Arc::new(MemoryTokenStore::new()));
        #[cfg(target_arch = "wasm32")]
        let tokens = self
            .token_store
            .unwrap_or_else(|| Arc::new(BrowserTokenStore));

        #[cfg(not(target_arch = "wasm32"))]
        let ui = self.ui.unwrap_or_else(|| Arc::new(TracingUiSink));
        #[cfg(target_arch = "wasm32")]
        let ui = self.ui.unwrap_or_else(|| Arc::new(BrowserUiSink));

        Ok(ApiClient {
            http,
            config: Arc::new(config),
            tokens,
            ui,
        })
    }
}
