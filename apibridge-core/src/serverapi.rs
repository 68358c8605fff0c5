//! Server API helper: endpoint URL resolution and failure classification.

use tokio::runtime::Handle;
use tracing::debug;

use crate::credentials::Credentials;
use crate::error::{ApiError, Result};
use crate::http::{HttpBridge, HttpResponse};

/// Executes GETs against a configured server and classifies failed
/// responses into the [`ApiError`] taxonomy.
///
/// Owns the base URL and the bridge; classification never retries and
/// never reclassifies transport failures, so callers can distinguish
/// "the server told us no" from "we couldn't reach the server".
#[derive(Debug, Clone)]
pub struct ApiHelper {
    bridge: HttpBridge,
    base_url: String,
}

impl ApiHelper {
    /// Build a helper with a fresh client for the given credentials.
    pub fn new(credentials: &Credentials, runtime: Handle) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        let bridge = HttpBridge::new(client, credentials.token().map(str::to_owned), runtime);
        Ok(Self::with_bridge(credentials.base_url(), bridge))
    }

    /// Build a helper around an existing bridge.
    pub fn with_bridge(base_url: impl Into<String>, bridge: HttpBridge) -> Self {
        Self {
            bridge,
            base_url: base_url.into(),
        }
    }

    pub fn bridge(&self) -> &HttpBridge {
        &self.bridge
    }

    /// GET a relative path; non-2xx responses come back as classified
    /// errors.
    pub async fn get(&self, path: &str) -> Result<HttpResponse> {
        let response = self.raw_get(path).await?;
        if !response.is_success() {
            return Err(classify_error(response).await);
        }
        Ok(response)
    }

    /// Execute GET and return the response without checking the status.
    ///
    /// Transport failures still error; status classification is left to
    /// the caller.
    pub async fn raw_get(&self, path: &str) -> Result<HttpResponse> {
        let url = self.endpoint_url(path);
        self.bridge.get_async(&url).await
    }

    fn endpoint_url(&self, relative_path: &str) -> String {
        concat(&self.base_url, relative_path)
    }
}

/// Join a base URL and a relative path with exactly one slash at the
/// junction. Interior slashes of both inputs are left untouched.
pub fn concat(base_url: &str, relative_path: &str) -> String {
    let base = base_url.strip_suffix('/').unwrap_or(base_url);
    let relative = relative_path.strip_prefix('/').unwrap_or(relative_path);
    format!("{base}/{relative}")
}

/// Translate a failed response into the error taxonomy, releasing the
/// response on every path.
///
/// The body is read only for the statuses whose message may come from the
/// server (403 and unexpected ones); 401, 404, and 5xx never touch it.
pub async fn classify_error(response: HttpResponse) -> ApiError {
    let status = response.status();
    let url = response.url().to_owned();
    debug!(status, %url, "classifying failed response");
    let server_message = if wants_server_message(status) {
        read_error_messages(response).await
    } else {
        None
    };
    classify(status, &url, server_message)
}

/// Pure status-to-error mapping, evaluated in priority order.
fn classify(status: u16, url: &str, server_message: Option<String>) -> ApiError {
    match status {
        401 => ApiError::Unauthorized,
        403 => ApiError::Forbidden(server_message.unwrap_or_else(|| "Forbidden".to_owned())),
        404 => ApiError::NotFound(format_failed_response(status, url, None)),
        s if s >= 500 => ApiError::ServerError(format_failed_response(status, url, None)),
        _ => ApiError::UnexpectedStatus(format_failed_response(
            status,
            url,
            server_message.as_deref(),
        )),
    }
}

/// Statuses whose body may carry a server-provided error document. 404
/// bodies are not trusted and 5xx bodies are not parsed.
fn wants_server_message(status: u16) -> bool {
    !matches!(status, 401 | 404) && status < 500
}

fn format_failed_response(status: u16, url: &str, error_msg: Option<&str>) -> String {
    match error_msg {
        Some(msg) => format!("Error {status} on {url}: {msg}"),
        None => format!("Error {status} on {url}"),
    }
}

async fn read_error_messages(response: HttpResponse) -> Option<String> {
    let content = response.body_text().await.ok()?;
    extract_error_messages(&content)
}

/// Extract the messages from a `{"errors":[{"msg":"..."}]}` document and
/// join them with `", "`. A blank body yields nothing; a non-blank body
/// that is not valid JSON is surfaced verbatim rather than dropped.
fn extract_error_messages(content: &str) -> Option<String> {
    if content.trim().is_empty() {
        return None;
    }
    let document: serde_json::Value = match serde_json::from_str(content) {
        Ok(value) => value,
        Err(_) => return Some(content.trim().to_owned()),
    };
    let errors = document.get("errors")?.as_array()?;
    let messages: Vec<&str> = errors
        .iter()
        .filter_map(|entry| entry.get("msg")?.as_str())
        .collect();
    if messages.is_empty() {
        return None;
    }
    Some(messages.join(", "))
}
