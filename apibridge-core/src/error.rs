use thiserror::Error;

/// Common result type for core operations.
pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not authorized. Please check server credentials.")]
    Unauthorized,
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    ServerError(String),
    #[error("{0}")]
    UnexpectedStatus(String),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("request cancelled")]
    Cancelled,
    #[error("event streams are not supported")]
    UnsupportedOperation,
}
