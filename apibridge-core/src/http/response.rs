use crate::error::Result;

/// A resolved HTTP response.
///
/// Status and URL are captured eagerly; the body stays unread until
/// [`body_text`](Self::body_text) consumes it, so it can be read at most
/// once. Dropping the response on any path releases the underlying
/// connection.
#[derive(Debug)]
pub struct HttpResponse {
    status: u16,
    url: String,
    inner: reqwest::Response,
}

impl HttpResponse {
    pub(crate) fn new(inner: reqwest::Response) -> Self {
        // reqwest retains the resolved URL (after redirects) on the
        // response, so re-deriving it here cannot fail.
        let status = inner.status().as_u16();
        let url = inner.url().as_str().to_owned();
        Self { status, url, inner }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// The URL the request actually resolved to.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Read the body as text, consuming the response.
    pub async fn body_text(self) -> Result<String> {
        Ok(self.inner.text().await?)
    }
}
