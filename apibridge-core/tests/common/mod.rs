#![allow(dead_code)]

use std::sync::Once;

use apibridge_core::HttpBridge;
use tokio::net::TcpListener;
use tokio::runtime::Handle;

static INIT: Once = Once::new();

pub fn init_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .try_init();
    });
}

/// Bind the mock API on an ephemeral loopback port and serve it on the
/// current runtime. Returns the base URL.
pub async fn spawn_mock() -> String {
    init_logging();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(apibridge_mock::run(listener));
    format!("http://{addr}")
}

pub fn bridge(token: Option<&str>) -> HttpBridge {
    HttpBridge::new(
        reqwest::Client::new(),
        token.map(str::to_owned),
        Handle::current(),
    )
}
