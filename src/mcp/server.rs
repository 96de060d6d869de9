//! MCP server implementation
//!
//! [`McpServer`] holds whatever tools were registered with it and answers
//! `tools/list` and `tools/call`. It knows nothing about Todoist; the tools
//! come from a [`ToolsetGroup`](crate::toolsets::ToolsetGroup) through the
//! [`ToolSink`] trait.

use std::collections::HashMap;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    model::{
        CallToolRequestParams, CallToolResult, JsonObject, ListToolsResult,
        PaginatedRequestParams, ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::toolsets::{ServerTool, ToolSink};

/// Protocol-facing server over a fixed list of tools.
///
/// Tools are listed in registration order. Cloning is cheap enough to hand
/// one copy to every HTTP session.
#[derive(Clone, Default)]
pub struct McpServer {
    tools: Vec<ServerTool>,
    index: HashMap<String, usize>,
}

impl McpServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the registered tools, in registration order.
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(ServerTool::name).collect()
    }

    /// Descriptors of the registered tools, in registration order.
    pub fn tools(&self) -> Vec<Tool> {
        self.tools.iter().map(|t| t.tool().clone()).collect()
    }

    pub fn tool(&self, name: &str) -> Option<&ServerTool> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    /// Run the named tool, giving up when `ct` is cancelled.
    ///
    /// Unknown tools are a protocol error; everything a tool itself runs
    /// into comes back as an error-flagged result.
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: JsonObject,
        ct: CancellationToken,
    ) -> Result<CallToolResult, McpError> {
        let tool = self.tool(name).ok_or_else(|| {
            warn!(tool = name, "call to unknown tool");
            McpError::invalid_params(format!("unknown tool: {}", name), None)
        })?;

        info!(tool = name, "calling tool");
        tokio::select! {
            result = tool.call(arguments) => {
                debug!(tool = name, is_error = ?result.is_error, "tool finished");
                Ok(result)
            }
            _ = ct.cancelled() => {
                warn!(tool = name, "tool call cancelled");
                Err(McpError::internal_error(format!("call to {} was cancelled", name), None))
            }
        }
    }
}

impl ToolSink for McpServer {
    fn add_tool(&mut self, tool: ServerTool) {
        match self.index.get(tool.name()) {
            Some(&i) => self.tools[i] = tool,
            None => {
                self.index.insert(tool.name().to_string(), self.tools.len());
                self.tools.push(tool);
            }
        }
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build()).with_instructions(
            "Todoist MCP Server - Manage Todoist tasks and projects. \
             Call list-task-filter-help before building a filter query for list-tasks.",
        )
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let arguments = request.arguments.unwrap_or_default();
        self.dispatch(&request.name, arguments, context.ct).await
    }
}
