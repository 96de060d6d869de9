use std::collections::HashMap;

use tracing::debug;

use super::error::{ToolsetError, ToolsetResult};
use super::tool::ToolSink;
use super::toolset::Toolset;

/// Name that enables every registered toolset.
pub const ALL_TOOLSETS: &str = "all";

/// Registry of toolsets keyed by name.
///
/// A read-only group forces every toolset added to it into read-only mode,
/// so a read-only server can never expose a write tool.
#[derive(Debug, Default)]
pub struct ToolsetGroup {
    toolsets: HashMap<String, Toolset>,
    everything_on: bool,
    read_only: bool,
}

impl ToolsetGroup {
    pub fn new(read_only: bool) -> Self {
        Self {
            toolsets: HashMap::new(),
            everything_on: false,
            read_only,
        }
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Whether `all` has been requested.
    pub fn is_everything_on(&self) -> bool {
        self.everything_on
    }

    /// Add a toolset, replacing any toolset already registered under the
    /// same name.
    pub fn add_toolset(&mut self, mut toolset: Toolset) {
        if self.read_only {
            toolset.set_read_only();
        }
        self.toolsets.insert(toolset.name().to_string(), toolset);
    }

    /// Whether the named toolset would be exposed. Unknown names are
    /// disabled unless `all` is on.
    pub fn is_enabled(&self, name: &str) -> bool {
        if self.everything_on {
            return true;
        }
        self.toolsets.get(name).is_some_and(Toolset::is_enabled)
    }

    pub fn toolset(&self, name: &str) -> Option<&Toolset> {
        self.toolsets.get(name)
    }

    /// All toolsets, sorted by name.
    pub fn toolsets(&self) -> impl Iterator<Item = &Toolset> {
        let mut toolsets: Vec<&Toolset> = self.toolsets.values().collect();
        toolsets.sort_by(|a, b| a.name().cmp(b.name()));
        toolsets.into_iter()
    }

    pub fn enable_toolset(&mut self, name: &str) -> ToolsetResult<()> {
        let toolset = self
            .toolsets
            .get_mut(name)
            .ok_or_else(|| ToolsetError::NotFound {
                name: name.to_string(),
            })?;
        toolset.enable();
        debug!(toolset = name, "enabled toolset");
        Ok(())
    }

    /// Enable each named toolset in order.
    ///
    /// `all` switches everything on and ends the scan; any names after it
    /// are not looked at. An unknown name aborts with an error, but
    /// toolsets enabled before it stay enabled.
    pub fn enable_toolsets<I, S>(&mut self, names: I) -> ToolsetResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let name = name.as_ref();
            if name == ALL_TOOLSETS {
                self.everything_on = true;
                break;
            }
            self.enable_toolset(name)?;
        }

        if self.everything_on {
            for toolset in self.toolsets.values_mut() {
                toolset.enable();
            }
        }
        Ok(())
    }

    /// Register the active tools of every toolset with `sink`.
    ///
    /// Toolsets are visited in name order so registration is deterministic.
    pub fn register_tools<S: ToolSink + ?Sized>(&self, sink: &mut S) {
        for toolset in self.toolsets() {
            toolset.register_tools(sink);
        }
    }
}
