//! Request handlers for the proxy
//!
//! This module contains the main request handler (`chat_completions`), the
//! streaming and buffered response paths it dispatches to, and the liveness
//! handler for `/`.

mod buffered;
mod request;
mod streaming;

pub use request::chat_completions;

use axum::Json;
use serde_json::{json, Value};

/// Handler for `GET /` - liveness message
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "lmrelay is running. Use the /v1/chat/completions endpoint to interact with the model."
    }))
}
