//! JSON Client
//!
//! Every request carries `Content-Type: application/json`, serializes its
//! body with serde_json and decodes the response body as JSON whatever the
//! HTTP status. There are no retries and no timeout.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::{HttpTransport, Method, NetError, Request, Transport};

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("dq/", env!("CARGO_PKG_VERSION"));

/// JSON client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base for resolving relative URLs
    pub base_url: Option<String>,
    /// User agent string
    pub user_agent: String,
    /// Headers added to every request before `Content-Type`
    pub default_headers: Vec<(String, String)>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            user_agent: DEFAULT_USER_AGENT.into(),
            default_headers: Vec::new(),
        }
    }
}

/// JSON client builder
#[derive(Debug, Default)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url(mut self, url: &str) -> Self {
        self.config.base_url = Some(url.to_string());
        self
    }

    pub fn user_agent(mut self, ua: &str) -> Self {
        self.config.user_agent = ua.to_string();
        self
    }

    pub fn default_header(mut self, key: &str, value: &str) -> Self {
        self.config.default_headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build with the reqwest transport
    pub fn build(self) -> JsonClient {
        let transport = HttpTransport::new(&self.config.user_agent);
        JsonClient::with_transport(self.config, transport)
    }

    /// Build with a custom transport
    pub fn build_with<T: Transport>(self, transport: T) -> JsonClient<T> {
        JsonClient::with_transport(self.config, transport)
    }
}

/// JSON client error
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Net(#[from] NetError),

    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Response body is not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),
}

/// JSON-over-HTTP client
#[derive(Debug, Clone)]
pub struct JsonClient<T = HttpTransport> {
    config: ClientConfig,
    transport: T,
}

impl JsonClient {
    pub fn new() -> Self {
        ClientBuilder::new().build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }
}

impl Default for JsonClient {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> JsonClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Resolve `url` against the configured base
    pub fn resolve(&self, url: &str) -> Result<Url, NetError> {
        let parsed = match &self.config.base_url {
            Some(base) => Url::parse(base).and_then(|base| base.join(url)),
            None => Url::parse(url),
        };
        parsed.map_err(|e| NetError::InvalidUrl(format!("{url}: {e}")))
    }

    /// Build the request descriptor without sending it.
    /// A `Null` body is treated as no body.
    pub fn build_request(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Request, ApiError> {
        let resolved = self.resolve(url)?;
        let mut request = Request::new(method, resolved.as_str());
        for (key, value) in &self.config.default_headers {
            request.set_header(key, value);
        }
        request.set_header("Content-Type", "application/json");

        if let Some(body) = body.filter(|b| !b.is_null()) {
            request.body = Some(serde_json::to_vec(body).map_err(ApiError::Encode)?);
        }
        Ok(request)
    }

    /// Send a request and decode the response body as `R`
    pub async fn request_as<R: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<R, ApiError> {
        let request = self.build_request(method, url, body)?;
        tracing::debug!("JSON {} {}", request.method, request.url);
        let response = self.transport.send(request).await?;
        tracing::trace!(status = response.status, bytes = response.body.len(), "JSON response");
        serde_json::from_slice(&response.body).map_err(ApiError::Decode)
    }

    /// Send a request and decode the response body as a JSON value
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        self.request_as(method, url, body).await
    }

    pub async fn get(&self, url: &str) -> Result<Value, ApiError> {
        self.request(Method::Get, url, None).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<Value, ApiError> {
        self.request(Method::Post, url, Some(&encode(body)?)).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<Value, ApiError> {
        self.request(Method::Put, url, Some(&encode(body)?)).await
    }

    pub async fn patch<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<Value, ApiError> {
        self.request(Method::Patch, url, Some(&encode(body)?)).await
    }

    pub async fn del(&self, url: &str) -> Result<Value, ApiError> {
        self.request(Method::Delete, url, None).await
    }

    pub async fn get_as<R: DeserializeOwned>(&self, url: &str) -> Result<R, ApiError> {
        self.request_as(Method::Get, url, None).await
    }

    pub async fn post_as<R: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        self.request_as(Method::Post, url, Some(&encode(body)?)).await
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(ApiError::Encode)
}
