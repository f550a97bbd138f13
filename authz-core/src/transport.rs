//! Backend REST contract: endpoint paths and the HTTP seam.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::form_urlencoded;

use crate::error::TransportError;

/// Status line and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// HTTP access to the authorization backend.
///
/// `path` is relative to the backend root (e.g. `/acme/auth/<id>`); the
/// implementation prefixes its own base URL.
#[async_trait(?Send)]
pub trait AuthorizationBackend {
    async fn get(&self, path: &str) -> Result<HttpReply, TransportError>;

    async fn put_json(&self, path: &str, body: &serde_json::Value)
        -> Result<HttpReply, TransportError>;
}

/// Per-attempt random value binding the options request to the submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationId(uuid::Uuid);

impl CorrelationId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Path builders for the three backend operations, scoped to one tenant.
#[derive(Debug, Clone, Copy)]
pub struct Endpoints<'a> {
    tenant: &'a str,
}

impl<'a> Endpoints<'a> {
    pub fn for_tenant(tenant: &'a str) -> Self {
        Self { tenant }
    }

    /// `GET /{tenant}/auth/{authid}?next={next}`
    pub fn authorization(&self, authid: &str, next: Option<&str>) -> String {
        let mut path = format!("/{}/auth/{}", self.tenant, authid);
        if let Some(next) = next {
            let query = form_urlencoded::Serializer::new(String::new())
                .append_pair("next", next)
                .finish();
            path.push('?');
            path.push_str(&query);
        }
        path
    }

    /// `GET /{tenant}/fido2/authentication_options?r={corr}`
    pub fn authentication_options(&self, correlation: &CorrelationId) -> String {
        format!(
            "/{}/fido2/authentication_options?{}",
            self.tenant,
            correlation_query(correlation)
        )
    }

    /// `PUT /{tenant}/fido2/authentication?r={corr}`
    pub fn authentication(&self, correlation: &CorrelationId) -> String {
        format!(
            "/{}/fido2/authentication?{}",
            self.tenant,
            correlation_query(correlation)
        )
    }
}

fn correlation_query(correlation: &CorrelationId) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("r", &correlation.to_string())
        .finish()
}
