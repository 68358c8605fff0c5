//! HTTP bridge: adapts reqwest's future-driven execution into one-shot,
//! cancellable request handles with bearer-token injection.

mod handle;
mod response;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use tokio::runtime::Handle;
use tracing::debug;

use crate::error::{ApiError, Result};

pub use handle::RequestHandle;
pub use response::HttpResponse;

/// Dispatches requests onto a shared tokio runtime and hands back
/// cancellable [`RequestHandle`]s.
///
/// The wrapped reqwest client is safe for concurrent use; one bridge serves
/// any number of simultaneous requests without additional locking. When a
/// token is configured, every non-anonymous request carries
/// `Authorization: Bearer <token>`. No other custom header is ever set.
///
/// The runtime handle models the transport's own I/O threads: requests run
/// there, and the blocking forms ([`get`](Self::get), [`post`](Self::post))
/// park the calling thread until the runtime resolves them. The bridge
/// keeps no cache and no retry state.
#[derive(Debug, Clone)]
pub struct HttpBridge {
    client: reqwest::Client,
    token: Option<String>,
    runtime: Handle,
}

impl HttpBridge {
    pub fn new(client: reqwest::Client, token: Option<String>, runtime: Handle) -> Self {
        Self {
            client,
            token,
            runtime,
        }
    }

    /// Authenticated GET, blocking until the request resolves.
    ///
    /// Must be called from outside the runtime's worker threads; use
    /// [`get_async`](Self::get_async) from async contexts.
    pub fn get(&self, url: &str) -> Result<HttpResponse> {
        self.get_async(url).wait()
    }

    /// Authenticated GET.
    pub fn get_async(&self, url: &str) -> RequestHandle {
        debug!(%url, "dispatching GET");
        self.execute(self.client.get(url), true)
    }

    /// GET without the Authorization header, for endpoints that must not
    /// see credentials.
    pub fn get_async_anonymous(&self, url: &str) -> RequestHandle {
        debug!(%url, "dispatching anonymous GET");
        self.execute(self.client.get(url), false)
    }

    /// Authenticated POST, blocking until the request resolves.
    ///
    /// Same threading restriction as [`get`](Self::get).
    pub fn post(&self, url: &str, content_type: &str, body: impl Into<String>) -> Result<HttpResponse> {
        self.post_async(url, content_type, body).wait()
    }

    /// Authenticated POST with a body and declared content type.
    pub fn post_async(&self, url: &str, content_type: &str, body: impl Into<String>) -> RequestHandle {
        debug!(%url, content_type, "dispatching POST");
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, content_type)
            .body(body.into());
        self.execute(request, true)
    }

    /// Authenticated DELETE carrying a body.
    pub fn delete_async(&self, url: &str, content_type: &str, body: impl Into<String>) -> RequestHandle {
        debug!(%url, content_type, "dispatching DELETE");
        let request = self
            .client
            .delete(url)
            .header(CONTENT_TYPE, content_type)
            .body(body.into());
        self.execute(request, true)
    }

    /// Server-sent event streams are not supported; fails before any
    /// network activity.
    pub fn get_event_stream(
        &self,
        url: &str,
        _on_message: impl FnMut(String) + Send + 'static,
    ) -> Result<RequestHandle> {
        debug!(%url, "event stream requested");
        Err(ApiError::UnsupportedOperation)
    }

    fn execute(&self, request: reqwest::RequestBuilder, authenticated: bool) -> RequestHandle {
        let request = match &self.token {
            Some(token) if authenticated => {
                request.header(AUTHORIZATION, format!("Bearer {token}"))
            }
            _ => request,
        };
        RequestHandle::spawn(&self.runtime, request)
    }
}
