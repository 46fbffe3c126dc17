//! Shared proxy state

/// Shared state for the proxy server
///
/// Cloned per handler invocation; both fields are immutable after startup.
#[derive(Clone)]
pub struct ProxyState {
    /// HTTP client for forwarding requests
    pub(super) client: reqwest::Client,
    /// Backend base URL, normalized without a trailing slash
    pub(super) backend_url: String,
}
