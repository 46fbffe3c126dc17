//! Buffered collector for non-streaming requests
//!
//! Sends the forwarded request once and returns the backend's JSON verbatim.
//! The backend's status code passes through untouched whenever the exchange
//! completes with a JSON body, success or not; only transport failures and
//! non-JSON bodies become proxy errors. No retries.

use axum::{
    body::Body,
    http::{header, Response},
};

use crate::proxy::error::ProxyError;

/// Forward the request and collect the whole response
pub(super) async fn collect(forward: reqwest::RequestBuilder) -> Result<Response<Body>, ProxyError> {
    let upstream = forward
        .send()
        .await
        .map_err(|e| ProxyError::Connect(e.to_string()))?;

    let status = upstream.status();

    // A timeout while draining the body still means the backend never
    // delivered; anything else here is a proxy-side fault
    let body = upstream.bytes().await.map_err(|e| {
        if e.is_timeout() {
            ProxyError::Connect(e.to_string())
        } else {
            ProxyError::Unexpected(e.to_string())
        }
    })?;

    if let Err(parse_err) = serde_json::from_slice::<serde_json::Value>(&body) {
        tracing::warn!(
            "Backend returned non-JSON body ({} bytes): {}",
            body.len(),
            parse_err
        );
        return Err(ProxyError::NonJson {
            status: status.as_u16(),
            excerpt: ProxyError::excerpt(&String::from_utf8_lossy(&body)),
        });
    }

    Response::builder()
        .status(status.as_u16())
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .map_err(|e| ProxyError::Unexpected(e.to_string()))
}
