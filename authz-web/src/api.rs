//! `gloo-net` transport for the authorization backend.

use async_trait::async_trait;
use authz_core::{AuthorizationBackend, HttpReply, TransportError};
use gloo_net::http::{Request, Response};

use crate::config::api_base;

#[derive(Debug, Clone)]
pub struct HttpBackend {
    base: String,
}

impl HttpBackend {
    pub fn new() -> Self {
        Self::with_base(api_base())
    }

    pub fn with_base(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base, path)
    }
}

impl Default for HttpBackend {
    fn default() -> Self {
        Self::new()
    }
}

pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

async fn read_reply(response: Response) -> Result<HttpReply, TransportError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| TransportError(format!("failed to read body: {e}")))?;
    Ok(HttpReply { status, body })
}

#[async_trait(?Send)]
impl AuthorizationBackend for HttpBackend {
    async fn get(&self, path: &str) -> Result<HttpReply, TransportError> {
        let response = Request::get(&self.url(path))
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;
        read_reply(response).await
    }

    async fn put_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<HttpReply, TransportError> {
        let response = Request::put(&self.url(path))
            .json(body)
            .map_err(|e| TransportError(format!("failed to serialize request: {e}")))?
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;
        read_reply(response).await
    }
}
