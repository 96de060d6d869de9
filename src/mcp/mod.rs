//! Model Context Protocol (MCP) server implementation
//!
//! - **server**: [`McpServer`], the rmcp `ServerHandler` that tools are
//!   registered with
//! - **service**: Streamable HTTP service factory
//! - **tools**: Todoist tool definitions and handlers, grouped into toolsets
//! - **params** / **result**: argument extraction and result envelopes
//!   shared by the handlers

pub mod params;
pub mod result;
pub mod server;
mod service;
pub mod tools;


pub use params::ParamError;
pub use result::ToolError;
pub use server::McpServer;
pub use service::create_mcp_service;
pub use tools::default_toolset_group;
