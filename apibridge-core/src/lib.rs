//! Core library for authenticated API access: request bridging, bearer auth, and failure classification.

mod credentials;
mod error;
pub mod http;
pub mod serverapi;

pub use credentials::Credentials;
pub use error::{ApiError, Result};
pub use http::{HttpBridge, HttpResponse, RequestHandle};
pub use serverapi::ApiHelper;
