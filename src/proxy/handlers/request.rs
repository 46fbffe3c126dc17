//! Inbound request handling: mode detection and forwarding
//!
//! Reads the request body once, routes on the body's `stream` flag, and
//! builds the outbound request that the relay or collector sends. The same
//! body bytes that arrived are forwarded; parsing only reads the flag.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, Response},
};
use bytes::Bytes;

use crate::proxy::error::ProxyError;
use crate::proxy::helpers::{is_denied_header, BUFFERED_DENIED_HEADERS, STREAMING_DENIED_HEADERS};
use crate::proxy::state::ProxyState;

use super::{buffered, streaming};

/// Backend path every chat request is forwarded to
const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Handler for `POST /v1/chat/completions`
///
/// A request declaring `"stream": true` is relayed incrementally; anything
/// else is collected whole and returned with the backend's status.
pub async fn chat_completions(
    State(state): State<ProxyState>,
    req: Request<Body>,
) -> Result<Response<Body>, ProxyError> {
    let headers = req.headers().clone();

    // Read the request body
    let body_bytes = axum::body::to_bytes(req.into_body(), usize::MAX)
        .await
        .map_err(|e| ProxyError::Unexpected(format!("failed to read request body: {e}")))?;

    // Parsed only to read the stream flag; the raw bytes are what we forward
    let payload: serde_json::Value = serde_json::from_slice(&body_bytes)
        .map_err(|e| ProxyError::Unexpected(format!("invalid JSON in request body: {e}")))?;

    if is_streaming_request(&payload) {
        let forward = build_forward(&state, &headers, body_bytes, STREAMING_DENIED_HEADERS);
        streaming::relay(forward).await
    } else {
        let forward = build_forward(&state, &headers, body_bytes, BUFFERED_DENIED_HEADERS);
        buffered::collect(forward).await
    }
}

/// Read the `stream` flag; absent or non-boolean counts as false
fn is_streaming_request(payload: &serde_json::Value) -> bool {
    payload
        .get("stream")
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}

/// Build the forwarded request: same body bytes, headers minus the deny-list
fn build_forward(
    state: &ProxyState,
    headers: &HeaderMap,
    body_bytes: Bytes,
    denied: &[&str],
) -> reqwest::RequestBuilder {
    let forward_url = format!("{}{}", state.backend_url, CHAT_COMPLETIONS_PATH);

    let mut forward_req = state.client.post(&forward_url).body(body_bytes);

    // Copy headers, skipping per-mode hop metadata
    for (key, value) in headers.iter() {
        if is_denied_header(key.as_str(), denied) {
            continue;
        }
        forward_req = forward_req.header(key.as_str(), value.as_bytes().to_vec());
    }

    forward_req
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stream_true_selects_streaming() {
        assert!(is_streaming_request(&json!({ "stream": true })));
    }

    #[test]
    fn test_stream_false_selects_buffered() {
        assert!(!is_streaming_request(&json!({ "stream": false })));
    }

    #[test]
    fn test_missing_stream_defaults_to_buffered() {
        assert!(!is_streaming_request(
            &json!({ "model": "qwen3", "messages": [] })
        ));
    }

    #[test]
    fn test_non_boolean_stream_defaults_to_buffered() {
        assert!(!is_streaming_request(&json!({ "stream": "true" })));
        assert!(!is_streaming_request(&json!({ "stream": 1 })));
        assert!(!is_streaming_request(&json!({ "stream": null })));
    }
}
