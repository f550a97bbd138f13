use std::sync::OnceLock;

pub const PAGE_TITLE: &str = "TeskaLabs SeaCat PKI Authorization";

/// Same-origin prefix the reverse proxy maps onto the PKI backend.
pub const PROXY_API_BASE: &str = "/api/seacat-pki";

/// Backend address used when the page is served from a local dev server.
pub const DEV_API_BASE: &str = "http://localhost:8910";

/// Pick the API base URL for a page served from `hostname`.
/// - A build-time `AUTHZ_API_BASE` always wins
/// - In development (localhost): talk to the backend directly
/// - In production: go through the same-origin proxy prefix
pub fn api_base_for(hostname: &str, override_base: Option<&str>) -> String {
    if let Some(base) = override_base.filter(|b| !b.trim().is_empty()) {
        return base.trim_end_matches('/').to_string();
    }
    if hostname == "localhost" || hostname == "127.0.0.1" {
        DEV_API_BASE.to_string()
    } else {
        PROXY_API_BASE.to_string()
    }
}

fn get_api_base() -> String {
    let hostname = web_sys::window()
        .and_then(|w| w.location().hostname().ok())
        .unwrap_or_default();
    api_base_for(&hostname, option_env!("AUTHZ_API_BASE"))
}

static API_BASE_CACHE: OnceLock<String> = OnceLock::new();

/// Get the cached API base URL
pub fn api_base() -> &'static str {
    API_BASE_CACHE.get_or_init(get_api_base).as_str()
}
