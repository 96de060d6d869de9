use std::net::SocketAddr;

use miette::Diagnostic;
use thiserror::Error;

use crate::config::ConfigError;
use crate::todoist::ApiError;
use crate::toolsets::ToolsetError;

/// Fatal errors while starting or running the server.
#[derive(Error, Diagnostic, Debug)]
pub enum ServerError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Toolset(#[from] ToolsetError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Api(#[from] ApiError),

    #[error("Failed to bind {addr}: {source}")]
    #[diagnostic(
        code(todoist_mcp::server::bind),
        help("Is another process listening there? Choose another address with --addr.")
    )]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server I/O error: {0}")]
    #[diagnostic(code(todoist_mcp::server::io))]
    Io(#[from] std::io::Error),

    #[error("MCP transport error: {message}")]
    #[diagnostic(code(todoist_mcp::server::transport))]
    Transport { message: String },
}

pub type ServerResult<T> = Result<T, ServerError>;
