use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::AbortHandle;
use tracing::debug;

use crate::error::{ApiError, Result};
use crate::http::HttpResponse;

/// One-shot handle to an in-flight request.
///
/// Resolves exactly once, to one of: a response, a transport failure, or
/// [`ApiError::Cancelled`]. No state transition happens after resolution.
/// The handle can be `.await`ed, polled, or waited on synchronously with
/// [`wait`](Self::wait).
#[derive(Debug)]
pub struct RequestHandle {
    outcome: oneshot::Receiver<Result<HttpResponse>>,
    abort: AbortHandle,
}

impl RequestHandle {
    /// Run the request on the given runtime, resolving this handle when
    /// the transport does.
    pub(crate) fn spawn(runtime: &Handle, request: reqwest::RequestBuilder) -> Self {
        let (tx, rx) = oneshot::channel();
        let task = runtime.spawn(async move {
            let outcome = match request.send().await {
                Ok(response) => Ok(HttpResponse::new(response)),
                Err(e) => Err(ApiError::Transport(e)),
            };
            // The caller may have dropped the handle; the response is
            // released on drop either way.
            let _ = tx.send(outcome);
        });
        Self {
            outcome: rx,
            abort: task.abort_handle(),
        }
    }

    /// Best-effort interrupt of the in-flight request.
    ///
    /// Returns `true` when the request was still running and the abort was
    /// issued, `false` when it had already finished. A cancelled handle
    /// resolves to [`ApiError::Cancelled`]. Cancellation races network
    /// completion; whichever the runtime resolves first wins.
    pub fn cancel(&self) -> bool {
        if self.abort.is_finished() {
            return false;
        }
        self.abort.abort();
        debug!("in-flight request aborted");
        true
    }

    /// Block the calling thread until the request resolves.
    ///
    /// Must be called from outside the runtime's worker threads; from
    /// async contexts, `.await` the handle instead.
    pub fn wait(self) -> Result<HttpResponse> {
        // A closed channel means the task was aborted before resolving.
        self.outcome
            .blocking_recv()
            .unwrap_or(Err(ApiError::Cancelled))
    }
}

impl Future for RequestHandle {
    type Output = Result<HttpResponse>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.outcome).poll(cx) {
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            // Sender dropped without resolving: the task was aborted.
            Poll::Ready(Err(_)) => Poll::Ready(Err(ApiError::Cancelled)),
            Poll::Pending => Poll::Pending,
        }
    }
}
