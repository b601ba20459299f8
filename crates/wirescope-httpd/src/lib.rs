//! HTTP surface for the wirescope wire-format decoders.
//!
//! Three endpoints:
//!
//! - `POST /decode`: the body is a raw PB payload; responds with its JSON
//!   rendering.
//! - `POST /api_decode`: JSON envelope `{"type": "...", "data": "..."}`
//!   with a base64 payload; `type` selects the codec (`pb` unless `jce` is
//!   named).
//! - `GET /v1/health`: liveness probe.
//!
//! Decode failures answer 400 with a JSON error envelope. Request bodies
//! beyond the configured byte ceiling answer 413.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::Engine;
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::info;
use wirescope_pack::{Codecs, WireCodec};

/// Request envelope for `POST /api_decode`.
#[derive(Debug, Deserialize)]
struct DecodeRequest {
    /// Codec identifier; anything other than `jce` decodes as PB.
    #[serde(default, rename = "type")]
    codec: String,
    /// Base64-encoded payload bytes.
    data: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Default request body ceiling: 16 MB.
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Shared state: the codec registry and request limits.
pub struct AppState {
    pub codecs: Codecs,
    /// Request body ceiling enforced on the decode endpoints.
    pub max_body_bytes: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            codecs: Codecs::new(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// Builds the server router.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/decode", post(handle_decode))
        .route("/api_decode", post(handle_api_decode))
        .route("/v1/health", get(handle_health))
        .layer(DefaultBodyLimit::max(state.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handle `POST /decode`: the body is a raw PB payload.
async fn handle_decode(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    match state.codecs.pb.decode(&body, None) {
        Ok(js) => {
            info!(input = body.len(), output = js.len(), "decoded pb payload");
            json_body(js)
        }
        Err(err) => bad_request(err.to_string()),
    }
}

/// Handle `POST /api_decode`: base64 envelope with codec dispatch.
async fn handle_api_decode(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let request: DecodeRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(err) => return bad_request(format!("invalid request envelope: {err}")),
    };
    let raw = match base64::engine::general_purpose::STANDARD.decode(&request.data) {
        Ok(raw) => raw,
        Err(err) => return bad_request(format!("invalid base64 payload: {err}")),
    };

    let codec = state
        .codecs
        .by_id(&request.codec)
        .unwrap_or(&state.codecs.pb as &dyn WireCodec);
    match codec.decode(&raw, None) {
        Ok(js) => {
            info!(
                codec = codec.id(),
                input = raw.len(),
                output = js.len(),
                "decoded payload"
            );
            json_body(js)
        }
        Err(err) => bad_request(err.to_string()),
    }
}

/// Handle `GET /v1/health`.
async fn handle_health() -> Response {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
    .into_response()
}

fn json_body(js: String) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        js,
    )
        .into_response()
}

fn bad_request(error: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_accepts_missing_type() {
        let request: DecodeRequest =
            serde_json::from_str(r#"{"data": "CJYB"}"#).expect("valid envelope");
        assert_eq!(request.codec, "");
        assert_eq!(request.data, "CJYB");
    }

    #[test]
    fn envelope_requires_data() {
        assert!(serde_json::from_str::<DecodeRequest>(r#"{"type": "pb"}"#).is_err());
    }
}
