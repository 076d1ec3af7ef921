//! Request and response types for the HTTP API

pub mod error;
pub mod json;
pub mod query;
pub mod upload;

pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
pub use query::{QueryRequest, RagResponse, SuggestParams, SuggestResponse};
pub use upload::{UploadResponse, MAX_UPLOAD_BYTES};
