//! Tool descriptors bound to their handlers.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use rmcp::model::{CallToolResult, JsonObject, Tool};

#[cfg(test)]
use mockall::automock;

/// Future returned by a tool handler.
///
/// Handlers never fail at the protocol level: bad parameters and backend
/// errors come back as an error-flagged [`CallToolResult`].
pub type ToolFuture = BoxFuture<'static, CallToolResult>;

/// Type-erased tool handler taking the raw call arguments.
pub type ToolHandlerFn = Arc<dyn Fn(JsonObject) -> ToolFuture + Send + Sync>;

/// A tool definition bound to the function that executes it.
#[derive(Clone)]
pub struct ServerTool {
    tool: Tool,
    handler: ToolHandlerFn,
}

impl ServerTool {
    pub fn new<F, Fut>(tool: Tool, handler: F) -> Self
    where
        F: Fn(JsonObject) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CallToolResult> + Send + 'static,
    {
        let handler: ToolHandlerFn = Arc::new(move |args| -> ToolFuture { Box::pin(handler(args)) });
        Self { tool, handler }
    }

    /// The protocol-facing descriptor.
    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    pub(crate) fn tool_mut(&mut self) -> &mut Tool {
        &mut self.tool
    }

    pub fn name(&self) -> &str {
        &self.tool.name
    }

    /// Whether the descriptor carries `readOnlyHint = true`.
    pub fn is_read_only(&self) -> bool {
        self.tool
            .annotations
            .as_ref()
            .and_then(|a| a.read_only_hint)
            .unwrap_or(false)
    }

    /// Run the handler with the given arguments.
    pub fn call(&self, arguments: JsonObject) -> ToolFuture {
        (self.handler)(arguments)
    }
}

impl fmt::Debug for ServerTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerTool")
            .field("name", &self.name())
            .field("read_only", &self.is_read_only())
            .finish()
    }
}

/// Anything tools can be registered with.
///
/// Registration is additive; there is no way to take a tool back.
#[cfg_attr(test, automock)]
pub trait ToolSink {
    fn add_tool(&mut self, tool: ServerTool);
}
