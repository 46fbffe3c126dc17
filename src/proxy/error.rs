//! Proxy error types and response handling

use axum::{
    body::Body,
    http::{Response, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;

/// How many characters of a raw backend body to quote in an error detail
const EXCERPT_CHARS: usize = 500;

/// Failures observed while talking to the backend, classified for the client
#[derive(Debug)]
pub(crate) enum ProxyError {
    /// Backend unreachable, or the exchange timed out with nothing delivered
    Connect(String),
    /// Backend completed the exchange but the body is not valid JSON
    NonJson { status: u16, excerpt: String },
    /// Anything else that broke inside the proxy
    Unexpected(String),
}

impl ProxyError {
    /// Truncate a raw backend body to a diagnostic excerpt
    pub(crate) fn excerpt(body: &str) -> String {
        body.chars().take(EXCERPT_CHARS).collect()
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response<Body> {
        let (status, detail) = match self {
            ProxyError::Connect(cause) => (
                StatusCode::BAD_GATEWAY,
                format!("Error connecting to backend: {cause}"),
            ),
            ProxyError::NonJson { status, excerpt } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Backend returned non-JSON response. Status: {status}. Content: {excerpt}..."),
            ),
            ProxyError::Unexpected(cause) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("An unexpected error occurred in proxy: {cause}"),
            ),
        };

        tracing::error!("Proxy error: {} - {}", status, detail);

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn detail_of(response: Response<Body>) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_connect_maps_to_502() {
        let resp = ProxyError::Connect("connection refused".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            detail_of(resp).await["detail"],
            "Error connecting to backend: connection refused"
        );
    }

    #[tokio::test]
    async fn test_non_json_maps_to_500_with_status_and_excerpt() {
        let resp = ProxyError::NonJson {
            status: 200,
            excerpt: "<html>oops</html>".into(),
        }
        .into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            detail_of(resp).await["detail"],
            "Backend returned non-JSON response. Status: 200. Content: <html>oops</html>..."
        );
    }

    #[tokio::test]
    async fn test_unexpected_maps_to_500() {
        let resp = ProxyError::Unexpected("body read failed".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            detail_of(resp).await["detail"],
            "An unexpected error occurred in proxy: body read failed"
        );
    }

    #[test]
    fn test_excerpt_caps_at_500_chars() {
        let long = "x".repeat(2000);
        assert_eq!(ProxyError::excerpt(&long).len(), 500);

        // Counted in characters, not bytes
        let wide = "é".repeat(600);
        assert_eq!(ProxyError::excerpt(&wide).chars().count(), 500);
    }

    #[test]
    fn test_excerpt_keeps_short_bodies_whole() {
        assert_eq!(ProxyError::excerpt("not json"), "not json");
    }
}
