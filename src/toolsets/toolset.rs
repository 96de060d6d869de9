use rmcp::model::ToolAnnotations;

use super::tool::{ServerTool, ToolSink};

/// A named group of tools split into read and write partitions.
///
/// Disabled toolsets expose nothing. Read-only toolsets expose only their
/// read partition; write tools added before the toolset was switched to
/// read-only are kept but never exposed.
#[derive(Debug)]
pub struct Toolset {
    name: String,
    description: String,
    enabled: bool,
    read_only: bool,
    read_tools: Vec<ServerTool>,
    write_tools: Vec<ServerTool>,
}

impl Toolset {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            enabled: false,
            read_only: false,
            read_tools: Vec::new(),
            write_tools: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub(crate) fn enable(&mut self) {
        self.enabled = true;
    }

    /// Add read-only tools.
    ///
    /// # Panics
    ///
    /// If any tool is not annotated with `readOnlyHint = true`. This is a
    /// wiring bug, not a runtime condition.
    pub fn add_read_tools(&mut self, tools: impl IntoIterator<Item = ServerTool>) -> &mut Self {
        for mut tool in tools {
            if !tool.is_read_only() {
                panic!("tool ({}) must be annotated as read-only", tool.name());
            }

            // Keep only the title; everything else collapses to the read-only marker
            let title = tool
                .tool()
                .annotations
                .as_ref()
                .and_then(|a| a.title.clone());
            let mut annotations = ToolAnnotations::new().read_only(true);
            annotations.title = title;
            tool.tool_mut().annotations = Some(annotations);

            self.read_tools.push(tool);
        }
        self
    }

    /// Add write tools. Dropped without error while the toolset is
    /// read-only.
    ///
    /// # Panics
    ///
    /// If any tool is annotated with `readOnlyHint = true`.
    pub fn add_write_tools(&mut self, tools: impl IntoIterator<Item = ServerTool>) -> &mut Self {
        let tools: Vec<ServerTool> = tools.into_iter().collect();
        if let Some(tool) = tools.iter().find(|t| t.is_read_only()) {
            panic!("tool ({}) is incorrectly annotated as read-only", tool.name());
        }

        if !self.read_only {
            self.write_tools.extend(tools);
        }
        self
    }

    /// Switch the toolset to read-only. Idempotent.
    pub fn set_read_only(&mut self) {
        self.read_only = true;
    }

    /// Tools exposed right now: nothing when disabled, read tools first,
    /// then write tools unless read-only. Insertion order is kept.
    pub fn active_tools(&self) -> Vec<&ServerTool> {
        if !self.enabled {
            return Vec::new();
        }
        self.available_tools()
    }

    /// Tools this toolset would expose once enabled.
    pub fn available_tools(&self) -> Vec<&ServerTool> {
        let write_tools: &[ServerTool] = if self.read_only {
            &[]
        } else {
            &self.write_tools
        };
        self.read_tools.iter().chain(write_tools).collect()
    }

    /// Register the active tools with `sink`. No-op when disabled.
    pub fn register_tools<S: ToolSink + ?Sized>(&self, sink: &mut S) {
        for tool in self.active_tools() {
            sink.add_tool(tool.clone());
        }
    }
}
