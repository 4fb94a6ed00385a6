//! Runtime configuration for the frontend.

use std::sync::OnceLock;

static API_URL: OnceLock<String> = OnceLock::new();

/// Default when no API URL was baked in: same-origin deployment behind the
/// backend's reverse proxy.
const DEFAULT_API_URL: &str = "/api";

/// Initialize the API URL. Call this at startup.
pub fn init_api_url(url: String) {
    API_URL.set(url).ok();
}

/// Get the configured API URL
pub fn api_url() -> &'static str {
    API_URL.get().map(|s| s.as_str()).unwrap_or(DEFAULT_API_URL)
}
