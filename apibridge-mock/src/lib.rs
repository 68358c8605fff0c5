//! Mock API server for exercising the bridge and helper over loopback.
//!
//! Routes cover the whole classification surface: success, each failure
//! status the helper distinguishes, a slow endpoint for cancellation
//! tests, and echo endpoints that reflect the request back so header
//! injection can be asserted.

use std::time::Duration;

use axum::extract::Json;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use serde_json::json;
use tokio::net::TcpListener;

/// What the echo endpoints reflect back to the caller.
#[derive(Debug, Serialize)]
pub struct Echo {
    pub method: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/api/system/status", get(system_status))
        .route(
            "/api/echo",
            get(echo_get).post(echo_post).delete(echo_delete),
        )
        .route("/api/unauthorized", get(unauthorized))
        .route("/api/forbidden", get(forbidden))
        .route("/api/forbidden-empty", get(forbidden_empty))
        .route("/api/forbidden-plain", get(forbidden_plain))
        .route("/api/missing", get(missing))
        .route("/api/failure", get(failure))
        .route("/api/teapot", get(teapot))
        .route("/api/slow", get(slow))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn system_status() -> Json<serde_json::Value> {
    Json(json!({"status": "UP", "version": "1.0"}))
}

fn echo(method: &str, headers: &HeaderMap, body: String) -> Json<Echo> {
    let header_text = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    };
    Json(Echo {
        method: method.to_owned(),
        authorization: header_text(header::AUTHORIZATION),
        content_type: header_text(header::CONTENT_TYPE),
        body,
    })
}

async fn echo_get(headers: HeaderMap) -> Json<Echo> {
    echo("GET", &headers, String::new())
}

async fn echo_post(headers: HeaderMap, body: String) -> Json<Echo> {
    echo("POST", &headers, body)
}

async fn echo_delete(headers: HeaderMap, body: String) -> Json<Echo> {
    echo("DELETE", &headers, body)
}

async fn unauthorized() -> impl IntoResponse {
    // Body is deliberately malformed; 401 classification must ignore it.
    (StatusCode::UNAUTHORIZED, "{not json")
}

async fn forbidden() -> impl IntoResponse {
    (
        StatusCode::FORBIDDEN,
        Json(json!({"errors": [{"msg": "insufficient privileges"}, {"msg": "project access denied"}]})),
    )
}

async fn forbidden_empty() -> impl IntoResponse {
    StatusCode::FORBIDDEN
}

async fn forbidden_plain() -> impl IntoResponse {
    (StatusCode::FORBIDDEN, "access denied by proxy")
}

async fn missing() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "no such endpoint")
}

async fn failure() -> impl IntoResponse {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"errors": [{"msg": "must never be parsed"}]})),
    )
}

async fn teapot() -> impl IntoResponse {
    (
        StatusCode::IM_A_TEAPOT,
        Json(json!({"errors": [{"msg": "short and stout"}]})),
    )
}

async fn slow() -> impl IntoResponse {
    tokio::time::sleep(Duration::from_secs(30)).await;
    StatusCode::OK
}
