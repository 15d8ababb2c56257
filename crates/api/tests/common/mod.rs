#![allow(dead_code)]

use axum::body::{Body, Bytes};
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use devreg_core::validation::catalog::RuleCatalog;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use devreg_api::config::{ServerConfig, ValidationConfig};
use devreg_api::router::build_app_router;
use devreg_api::state::AppState;

/// Rule catalog used by the HTTP tests.
///
/// - `PC` with `isEnabled == true`: `serialNumber` must look like `AB123456`,
///   `color` must be `red` or `blue`.
/// - `Printer` with `mode == duplex`: `trayCount` must be digits.
pub const TEST_RULES: &str = r#"{
    "validations": [
        {
            "type": "PC",
            "preRequestName": "isEnabled",
            "preRequestValue": "true",
            "rules": [
                { "paramName": "serialNumber", "regex": "^[A-Z]{2}\\d{6}$" },
                { "paramName": "color", "regex": ["red", "blue"] }
            ]
        },
        {
            "type": "Printer",
            "preRequestName": "mode",
            "preRequestValue": "duplex",
            "rules": [
                { "paramName": "trayCount", "regex": "^\\d+$" }
            ]
        }
    ]
}"#;

/// Body limit used by [`test_config`], small enough to exercise the 413 path.
pub const TEST_MAX_BODY_BYTES: usize = 4096;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        validation: ValidationConfig {
            max_body_bytes: TEST_MAX_BODY_BYTES,
            ..ValidationConfig::default()
        },
    }
}

pub fn test_state() -> AppState {
    let catalog = RuleCatalog::from_json(TEST_RULES).unwrap();
    AppState::new(test_config(), catalog)
}

/// Build the full application router, exactly as `main.rs` does.
pub fn build_test_app() -> Router {
    build_app_router(test_state())
}

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn send_raw(app: Router, method: Method, uri: &str, body: impl Into<Body>) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, json: Value) -> Response {
    send_raw(app, Method::POST, uri, json.to_string()).await
}

pub async fn put_json(app: Router, uri: &str, json: Value) -> Response {
    send_raw(app, Method::PUT, uri, json.to_string()).await
}

pub async fn body_bytes(response: Response) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

pub async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
