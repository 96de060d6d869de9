//! Toolset registry.
//!
//! Tools are grouped into named [`Toolset`]s, each split into a read-only
//! and a write partition. A [`ToolsetGroup`] owns every toolset, decides
//! which are enabled, and registers the active tools with anything that
//! implements [`ToolSink`] (normally the MCP server).
//!
//! The registry is assembled once at startup and only read afterwards, so
//! it carries no locks. Misclassifying a tool (a write tool flagged
//! read-only or the reverse) panics during assembly.

mod error;
mod group;
mod tool;
mod toolset;

#[cfg(test)]
mod group_test;

pub use error::{ToolsetError, ToolsetResult};
pub use group::{ALL_TOOLSETS, ToolsetGroup};
pub use tool::{ServerTool, ToolFuture, ToolHandlerFn, ToolSink};
pub use toolset::Toolset;

#[cfg(test)]
pub(crate) use tool::MockToolSink;
