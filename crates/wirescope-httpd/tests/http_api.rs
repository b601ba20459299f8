//! Router-level tests for the decode endpoints.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use base64::Engine;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use wirescope_httpd::{app, AppState};

fn router() -> axum::Router {
    app(Arc::new(AppState::new()))
}

async fn json_body(resp: axum::http::Response<Body>) -> (StatusCode, Value) {
    let status = resp.status();
    let bytes = resp
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    let json: Value = serde_json::from_slice(&bytes).expect("valid JSON response");
    (status, json)
}

fn post(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::from(body))
        .expect("build request")
}

fn b64(raw: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(raw)
}

#[tokio::test]
async fn decode_renders_raw_pb_bodies() {
    let resp = router()
        .oneshot(post("/decode", vec![0x08, 0x96, 0x01]))
        .await
        .expect("request");
    let (status, body) = json_body(resp).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"0001_varint": 150}));
}

#[tokio::test]
async fn decode_rejects_malformed_payloads() {
    let resp = router()
        .oneshot(post("/decode", vec![0x80]))
        .await
        .expect("request");
    let (status, body) = json_body(resp).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn api_decode_defaults_to_pb() {
    let envelope = json!({"type": "", "data": b64(&[0x08, 0x96, 0x01])});
    let resp = router()
        .oneshot(post("/api_decode", envelope.to_string().into_bytes()))
        .await
        .expect("request");
    let (status, body) = json_body(resp).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"0001_varint": 150}));
}

#[tokio::test]
async fn api_decode_dispatches_to_jce() {
    let raw = [0x02, 0x00, 0x00, 0x00, 0x07, 0x16, 0x03, b'a', b'b', b'c'];
    let envelope = json!({"type": "jce", "data": b64(&raw)});
    let resp = router()
        .oneshot(post("/api_decode", envelope.to_string().into_bytes()))
        .await
        .expect("request");
    let (status, body) = json_body(resp).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"0000_int": 7, "0001_string": "abc"}));
}

#[tokio::test]
async fn api_decode_rejects_bad_envelopes() {
    let resp = router()
        .oneshot(post("/api_decode", b"not json".to_vec()))
        .await
        .expect("request");
    let (status, _) = json_body(resp).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let envelope = json!({"type": "pb", "data": "@@not-base64@@"});
    let resp = router()
        .oneshot(post("/api_decode", envelope.to_string().into_bytes()))
        .await
        .expect("request");
    let (status, body) = json_body(resp).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn api_decode_rejects_undecodable_payloads() {
    let envelope = json!({"type": "jce", "data": b64(&[0x0e])});
    let resp = router()
        .oneshot(post("/api_decode", envelope.to_string().into_bytes()))
        .await
        .expect("request");
    let (status, body) = json_body(resp).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn decode_rejects_oversized_bodies() {
    let mut state = AppState::new();
    state.max_body_bytes = 16;
    let resp = app(Arc::new(state))
        .oneshot(post("/decode", vec![0x08; 64]))
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn api_decode_rejects_oversized_bodies() {
    let mut state = AppState::new();
    state.max_body_bytes = 16;
    let envelope = json!({"type": "pb", "data": b64(&[0x08, 0x96, 0x01])});
    let resp = app(Arc::new(state))
        .oneshot(post("/api_decode", envelope.to_string().into_bytes()))
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn bodies_within_the_limit_still_decode() {
    let mut state = AppState::new();
    state.max_body_bytes = 16;
    let resp = app(Arc::new(state))
        .oneshot(post("/decode", vec![0x08, 0x96, 0x01]))
        .await
        .expect("request");
    let (status, body) = json_body(resp).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"0001_varint": 150}));
}

#[tokio::test]
async fn health_reports_ok() {
    let request = Request::builder()
        .method("GET")
        .uri("/v1/health")
        .body(Body::empty())
        .expect("build request");
    let resp = router().oneshot(request).await.expect("request");
    let (status, body) = json_body(resp).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
