//! JSON-over-HTTP helpers
//!
//! One-shot requests through a default [`JsonClient`]. URLs must be
//! absolute; use [`Document::api`](crate::Document::api) for URLs relative
//! to a document location.
//!
//! Every request carries `Content-Type: application/json` and the response
//! body is decoded as JSON whatever the status code.

use serde::Serialize;
use serde_json::Value;

pub use dq_net::{ApiError, ClientBuilder, ClientConfig, HttpTransport, JsonClient, Method, Transport};

/// Send `body` (if any) with `method` and decode the JSON reply
pub async fn request<B: Serialize + ?Sized>(
    method: Method,
    url: &str,
    body: Option<&B>,
) -> Result<Value, ApiError> {
    let body = body
        .map(serde_json::to_value)
        .transpose()
        .map_err(ApiError::Encode)?;
    JsonClient::new().request(method, url, body.as_ref()).await
}

pub async fn get(url: &str) -> Result<Value, ApiError> {
    JsonClient::new().get(url).await
}

pub async fn post<B: Serialize + ?Sized>(url: &str, body: &B) -> Result<Value, ApiError> {
    JsonClient::new().post(url, body).await
}

pub async fn put<B: Serialize + ?Sized>(url: &str, body: &B) -> Result<Value, ApiError> {
    JsonClient::new().put(url, body).await
}

pub async fn patch<B: Serialize + ?Sized>(url: &str, body: &B) -> Result<Value, ApiError> {
    JsonClient::new().patch(url, body).await
}

pub async fn del(url: &str) -> Result<Value, ApiError> {
    JsonClient::new().del(url).await
}
