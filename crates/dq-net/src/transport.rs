//! Transport - moves one [`Request`] over the wire
//!
//! The default transport drives reqwest's blocking client on smol's
//! blocking thread pool, so callers can await it from any executor.

use std::future::Future;
use std::rc::Rc;
use std::sync::Arc;

use crate::{Method, NetError, Request, Response};

/// Something that can perform a request
pub trait Transport {
    fn send(&self, request: Request) -> impl Future<Output = Result<Response, NetError>>;
}

impl<T: Transport> Transport for Rc<T> {
    fn send(&self, request: Request) -> impl Future<Output = Result<Response, NetError>> {
        (**self).send(request)
    }
}

impl<T: Transport> Transport for Arc<T> {
    fn send(&self, request: Request) -> impl Future<Output = Result<Response, NetError>> {
        (**self).send(request)
    }
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    user_agent: String,
}

impl HttpTransport {
    pub fn new(user_agent: &str) -> Self {
        Self {
            user_agent: user_agent.to_string(),
        }
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(crate::client::DEFAULT_USER_AGENT)
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: Request) -> impl Future<Output = Result<Response, NetError>> {
        let user_agent = self.user_agent.clone();
        async move { smol::unblock(move || execute(&user_agent, request)).await }
    }
}

fn execute(user_agent: &str, request: Request) -> Result<Response, NetError> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(user_agent)
        .timeout(None)
        .build()
        .map_err(|e| NetError::Network(e.to_string()))?;

    let url = request.url.as_str();
    let mut builder = match request.method {
        Method::Get => client.get(url),
        Method::Post => client.post(url),
        Method::Put => client.put(url),
        Method::Patch => client.patch(url),
        Method::Delete => client.delete(url),
        Method::Head => client.head(url),
        Method::Options => client.request(reqwest::Method::OPTIONS, url),
    };

    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    if let Some(body) = request.body {
        builder = builder.body(body);
    }

    let response = builder
        .send()
        .map_err(|e| NetError::Network(e.to_string()))?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    let body = response
        .bytes()
        .map_err(|e| NetError::Network(e.to_string()))?
        .to_vec();

    tracing::debug!("HTTP {} {} -> {} ({} bytes)", request.method, request.url, status, body.len());
    Ok(Response { status, headers, body })
}
