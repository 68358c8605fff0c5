//! Bridge behavior against a live mock server: header injection, call
//! forms, cancellation, and transport failures.

mod common;

use std::time::Duration;

use apibridge_core::{ApiError, HttpBridge};

async fn echo_document(handle: apibridge_core::RequestHandle) -> serde_json::Value {
    let response = handle.await.unwrap();
    assert_eq!(response.status(), 200);
    let text = response.body_text().await.unwrap();
    serde_json::from_str(&text).unwrap()
}

#[tokio::test]
async fn get_injects_bearer_token() {
    let base = common::spawn_mock().await;
    let bridge = common::bridge(Some("tkn"));
    let echo = echo_document(bridge.get_async(&format!("{base}/api/echo"))).await;
    assert_eq!(echo["authorization"], "Bearer tkn");
}

#[tokio::test]
async fn anonymous_get_omits_authorization() {
    let base = common::spawn_mock().await;
    let bridge = common::bridge(Some("tkn"));
    let echo = echo_document(bridge.get_async_anonymous(&format!("{base}/api/echo"))).await;
    assert_eq!(echo["authorization"], serde_json::Value::Null);
}

#[tokio::test]
async fn get_without_token_sends_no_authorization() {
    let base = common::spawn_mock().await;
    let bridge = common::bridge(None);
    let echo = echo_document(bridge.get_async(&format!("{base}/api/echo"))).await;
    assert_eq!(echo["authorization"], serde_json::Value::Null);
}

#[tokio::test]
async fn post_carries_body_content_type_and_auth() {
    let base = common::spawn_mock().await;
    let bridge = common::bridge(Some("tkn"));
    let handle = bridge.post_async(
        &format!("{base}/api/echo"),
        "application/json",
        r#"{"key":"value"}"#,
    );
    let echo = echo_document(handle).await;
    assert_eq!(echo["method"], "POST");
    assert_eq!(echo["content_type"], "application/json");
    assert_eq!(echo["body"], r#"{"key":"value"}"#);
    assert_eq!(echo["authorization"], "Bearer tkn");
}

#[tokio::test]
async fn delete_carries_body() {
    let base = common::spawn_mock().await;
    let bridge = common::bridge(Some("tkn"));
    let handle = bridge.delete_async(&format!("{base}/api/echo"), "text/plain", "gone");
    let echo = echo_document(handle).await;
    assert_eq!(echo["method"], "DELETE");
    assert_eq!(echo["body"], "gone");
}

#[tokio::test]
async fn response_reports_resolved_url() {
    let base = common::spawn_mock().await;
    let bridge = common::bridge(None);
    let url = format!("{base}/api/system/status");
    let response = bridge.get_async(&url).await.unwrap();
    assert_eq!(response.url(), url);
}

#[tokio::test]
async fn transport_failure_propagates_unmodified() {
    common::init_logging();
    // Bind then drop to find a port nothing is listening on.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let bridge = common::bridge(None);
    let err = bridge
        .get_async(&format!("http://{addr}/api/echo"))
        .await
        .unwrap_err();
    match err {
        ApiError::Transport(e) => assert!(e.is_connect()),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn cancel_resolves_handle_to_cancelled() {
    let base = common::spawn_mock().await;
    let bridge = common::bridge(None);
    let handle = bridge.get_async(&format!("{base}/api/slow"));
    // Let the request get onto the wire before interrupting it.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(handle.cancel());
    match handle.await {
        Err(ApiError::Cancelled) => {}
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn event_stream_is_rejected_before_any_io() {
    // Deliberately unroutable URL: the call must fail without dispatching.
    let bridge = common::bridge(None);
    let result = bridge.get_event_stream("http://192.0.2.1/api/stream", |_message| {});
    match result {
        Err(ApiError::UnsupportedOperation) => {}
        Ok(_) => panic!("event stream call must not succeed"),
        Err(other) => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn blocking_forms_resolve_outside_the_runtime() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let base = runtime.block_on(common::spawn_mock());
    let bridge = HttpBridge::new(
        reqwest::Client::new(),
        Some("tkn".to_owned()),
        runtime.handle().clone(),
    );

    let response = bridge.get(&format!("{base}/api/echo")).unwrap();
    assert_eq!(response.status(), 200);

    let response = bridge
        .post(&format!("{base}/api/echo"), "application/json", "{}")
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[test]
fn blocking_form_surfaces_failures() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let bridge = HttpBridge::new(reqwest::Client::new(), None, runtime.handle().clone());
    let err = bridge.get(&format!("http://{addr}/api/echo")).unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
