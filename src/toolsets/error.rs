use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while resolving which toolsets are enabled.
#[derive(Error, Diagnostic, Debug, PartialEq, Eq)]
pub enum ToolsetError {
    #[error("toolset {name} does not exist")]
    #[diagnostic(
        code(todoist_mcp::toolsets::not_found),
        help("Use --list-toolsets to see the available toolsets, or pass \"all\".")
    )]
    NotFound { name: String },
}

pub type ToolsetResult<T> = Result<T, ToolsetError>;
