//! Converting handler outcomes into tool results.

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::todoist::ApiError;

use super::params::ParamError;

/// Anything that can go wrong while serving a single tool call.
///
/// None of these are fatal: they all end up as an error-flagged result.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("invalid parameters: {0}")]
    Param(#[from] ParamError),

    #[error("{context}: {source}")]
    Api {
        context: &'static str,
        #[source]
        source: ApiError,
    },

    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<ToolError> for CallToolResult {
    fn from(err: ToolError) -> Self {
        CallToolResult::error(vec![Content::text(err.to_string())])
    }
}

pub type ToolOutcome = Result<CallToolResult, ToolError>;

/// Build a mapper from backend errors to [`ToolError::Api`].
pub fn api_error(context: &'static str) -> impl FnOnce(ApiError) -> ToolError {
    move |source| ToolError::Api { context, source }
}

/// Serialize `payload` as the text of a successful result.
pub fn json_result(payload: &impl Serialize) -> ToolOutcome {
    let text = serde_json::to_string(payload)?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// Flatten an outcome into the result sent back to the caller.
pub fn finish(tool: &str, outcome: ToolOutcome) -> CallToolResult {
    outcome.unwrap_or_else(|err| {
        match &err {
            ToolError::Api { source, .. } => {
                warn!(tool, status = ?source.status(), error = %err, "backend call failed")
            }
            _ => warn!(tool, error = %err, "tool call rejected"),
        }
        err.into()
    })
}
