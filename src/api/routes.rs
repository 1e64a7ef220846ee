//! Route handlers and the shared-secret middleware.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use super::types::ToolRequest;
use super::AppState;
use crate::bridge::Outcome;

/// Compare the `X-Token` header against the shared secret before anything
/// else happens, unknown routes included.
pub async fn require_token<H: Send + 'static>(
    State(state): State<Arc<AppState<H>>>,
    request: Request,
    next: Next,
) -> Response {
    let provided = request
        .headers()
        .get("X-Token")
        .and_then(|value| value.to_str().ok());

    if !state.token_matches(provided) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"ok": false, "error": "unauthorized"})),
        )
            .into_response();
    }

    next.run(request).await
}

/// `GET /ping`: answered inline, never bridged.
pub async fn get_ping() -> Json<Value> {
    Json(json!({"ok": true, "result": {"message": "pong"}}))
}

/// `GET /state`: submit the built-in state snapshot task through the bridge.
pub async fn get_state<H: Send + 'static>(State(state): State<Arc<AppState<H>>>) -> Json<Value> {
    let outcome = match state.registry.lookup("get_state") {
        Ok(handler) => {
            state
                .bridge
                .submit("get_state", handler, Value::Object(Default::default()))
                .await
        }
        Err(err) => Outcome::failed(err.to_string()),
    };
    Json(outcome.to_json())
}

/// `POST /tool`: resolve the tool, then run it on the host thread.
///
/// The body is parsed by hand so malformed JSON is a 400 with no task
/// submitted. An unknown tool never reaches the bridge either; it reports
/// the available names instead.
pub async fn post_tool<H: Send + 'static>(
    State(state): State<Arc<AppState<H>>>,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let request: ToolRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"ok": false, "error": "invalid json"})),
            )
        }
    };

    let handler = match state.registry.lookup(&request.tool) {
        Ok(handler) => handler,
        Err(err) => {
            return (
                StatusCode::OK,
                Json(json!({
                    "ok": false,
                    "error": err.to_string(),
                    "available": err.available,
                })),
            )
        }
    };

    tracing::debug!(tool = %request.tool, "dispatching tool through the bridge");
    let outcome = state.bridge.submit(&request.tool, handler, request.args).await;
    (StatusCode::OK, Json(outcome.to_json()))
}

/// JSON 404 for anything the router does not know.
pub async fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"ok": false, "error": "not found"})),
    )
}
