/// Resolved server credentials: base URL plus optional bearer token.
///
/// Read-only after construction. A missing token is not an error; requests
/// simply go out unauthenticated. Validation of the pair (and any
/// environment loading) belongs to the configuration layer above this
/// crate.
#[derive(Debug, Clone)]
pub struct Credentials {
    base_url: String,
    token: Option<String>,
}

impl Credentials {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}
