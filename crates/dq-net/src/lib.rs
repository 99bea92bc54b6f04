//! dq Networking
//!
//! Request/response types, a pluggable async [`Transport`] and the
//! JSON-over-HTTP client built on it.

mod client;
mod request;
mod transport;

pub use client::{ApiError, ClientBuilder, ClientConfig, JsonClient};
pub use request::{Method, Request, Response};
pub use transport::{HttpTransport, Transport};
pub use url::Url;

/// Network error
#[derive(Debug, thiserror::Error)]
pub enum NetError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
