//! Backend error types.

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while talking to the Todoist API.
#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("Failed to build HTTP client: {source}")]
    #[diagnostic(code(todoist_mcp::todoist::client))]
    Client {
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid API URL {url}: {reason}")]
    #[diagnostic(
        code(todoist_mcp::todoist::base_url),
        help("Set --api-url or TODOIST_API_URL to an absolute http(s) URL.")
    )]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Invalid id {id:?}: must be a single non-empty path segment")]
    #[diagnostic(code(todoist_mcp::todoist::invalid_id))]
    InvalidId { id: String },

    #[error("Failed to execute request: {source}")]
    #[diagnostic(
        code(todoist_mcp::todoist::request),
        help("Check network connectivity and the configured API URL.")
    )]
    Request {
        #[source]
        source: reqwest::Error,
    },

    #[error("API request failed with status {status}: {body}")]
    #[diagnostic(code(todoist_mcp::todoist::request_failed))]
    RequestFailed { status: u16, body: String },

    #[error("Failed to decode response: {source}")]
    #[diagnostic(code(todoist_mcp::todoist::decode))]
    Decode {
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// HTTP status returned by the backend, if the request got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::RequestFailed { status, .. } => Some(*status),
            ApiError::Request { source } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(source: reqwest::Error) -> Self {
        ApiError::Request { source }
    }
}

/// Result type for backend operations.
pub type ApiResult<T> = Result<T, ApiError>;
