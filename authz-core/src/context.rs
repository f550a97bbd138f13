//! Request context derived from the page query string.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::AuthorizeError;

static AUTHID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]{64}$").expect("valid regex"));
static TENANT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]{2,64}$").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationRequestContext {
    pub authorization_id: String,
    pub tenant_id: String,
    pub next_url: Option<String>,
}

/// Raw `authid` / `tenant` / `next` values as they appear in the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct QueryParams {
    authid: Option<String>,
    tenant: Option<String>,
    next: Option<String>,
}

impl QueryParams {
    fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = Self::default();
        // First occurrence wins, like URLSearchParams.get.
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                "authid" => &mut params.authid,
                "tenant" => &mut params.tenant,
                "next" => &mut params.next,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }
}

/// Validate the page query. Authorization id is checked before tenant.
pub fn resolve_context(query: &str) -> Result<AuthorizationRequestContext, AuthorizeError> {
    let params = QueryParams::parse(query);

    let authorization_id = params
        .authid
        .filter(|v| AUTHID_RE.is_match(v))
        .ok_or(AuthorizeError::InvalidAuthorization)?;
    let tenant_id = params
        .tenant
        .filter(|v| TENANT_RE.is_match(v))
        .ok_or(AuthorizeError::InvalidTenant)?;

    Ok(AuthorizationRequestContext {
        authorization_id,
        tenant_id,
        next_url: params.next,
    })
}

/// Remembers the last resolved context so the page only re-fetches details
/// when the query actually changed.
#[derive(Debug, Default)]
pub struct ContextTracker {
    last: Option<Result<AuthorizationRequestContext, AuthorizeError>>,
}

impl ContextTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `query`; returns the new resolution when it differs from the
    /// previous one, `None` when nothing changed.
    pub fn observe(
        &mut self,
        query: &str,
    ) -> Option<Result<AuthorizationRequestContext, AuthorizeError>> {
        let resolved = resolve_context(query);
        if self.last.as_ref() == Some(&resolved) {
            return None;
        }
        self.last = Some(resolved.clone());
        Some(resolved)
    }
}
