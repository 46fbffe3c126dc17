//! Streaming relay for `"stream": true` requests
//!
//! Opens one backend connection and hands its byte stream straight to the
//! response body. Nothing is buffered beyond the chunk in flight: the body
//! polls upstream only as the client consumes, so a slow client slows the
//! backend read. Dropping the body (client disconnected) drops the upstream
//! connection with it.

use axum::{
    body::Body,
    http::{header, Response, StatusCode},
};
use futures::TryStreamExt;

use crate::proxy::error::ProxyError;

/// Relay a streaming backend response chunk by chunk
///
/// Failures before the response is committed to the client come back as
/// `ProxyError`. Once bytes are flowing the status line is already sent,
/// so a failure is logged and the stream ends where it broke; the client
/// sees the truncation.
pub(super) async fn relay(forward: reqwest::RequestBuilder) -> Result<Response<Body>, ProxyError> {
    let upstream = forward
        .send()
        .await
        .map_err(|e| ProxyError::Connect(e.to_string()))?;

    let status = upstream.status();
    if !status.is_success() {
        return Err(ProxyError::Unexpected(format!(
            "backend refused stream with status {status}"
        )));
    }

    let stream = upstream.bytes_stream().inspect_err(|e| {
        tracing::error!("Stream relay interrupted: {}", e);
    });

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/event-stream")
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from_stream(stream))
        .map_err(|e| ProxyError::Unexpected(e.to_string()))
}
