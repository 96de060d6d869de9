//! Todoist exposed as Model Context Protocol tools.
//!
//! - `config`: runtime configuration from flags and environment
//! - `todoist`: the Todoist REST client
//! - `toolsets`: named groups of read and write tools, and their activation
//! - `mcp`: the protocol server and the Todoist tools
//! - `server`: HTTP and stdio serving, shutdown and tracing

pub mod config;
pub mod mcp;
pub mod server;
pub mod todoist;
pub mod toolsets;

#[cfg(test)]
pub(crate) mod test_support;
