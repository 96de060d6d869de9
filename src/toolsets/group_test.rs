//! Tests for toolset groups: enablement, read-only propagation and
//! group-wide registration.

use super::*;
use crate::test_support::test_tool;

fn toolset(name: &str, read: &[&str], write: &[&str]) -> Toolset {
    let mut toolset = Toolset::new(name, format!("{} tools", name));
    toolset
        .add_read_tools(read.iter().map(|n| test_tool(n, true)))
        .add_write_tools(write.iter().map(|n| test_tool(n, false)));
    toolset
}

fn active_names(group: &ToolsetGroup, name: &str) -> Vec<String> {
    group
        .toolset(name)
        .expect("toolset should exist")
        .active_tools()
        .into_iter()
        .map(|t| t.name().to_string())
        .collect()
}

/// Collects registered tool names in order.
#[derive(Default)]
struct NameSink(Vec<String>);

impl ToolSink for NameSink {
    fn add_tool(&mut self, tool: ServerTool) {
        self.0.push(tool.name().to_string());
    }
}

fn sample_group(read_only: bool) -> ToolsetGroup {
    let mut group = ToolsetGroup::new(read_only);
    group.add_toolset(toolset(
        "tasks",
        &["list-tasks", "get-task"],
        &["create-task", "delete-task"],
    ));
    group.add_toolset(toolset("projects", &["list-projects"], &[]));
    group
}

#[test]
fn test_enable_toolset() {
    let mut group = sample_group(false);

    group.enable_toolset("tasks").unwrap();

    assert!(group.is_enabled("tasks"));
    assert!(!group.is_enabled("projects"));
    assert!(!group.is_everything_on());
}

#[test]
fn test_enable_unknown_toolset_fails() {
    let mut group = sample_group(false);

    let err = group.enable_toolset("labels").unwrap_err();

    assert_eq!(
        err,
        ToolsetError::NotFound {
            name: "labels".to_string()
        }
    );
    assert_eq!(err.to_string(), "toolset labels does not exist");
}

#[test]
fn test_is_enabled_unknown_name_is_false() {
    let group = sample_group(false);

    assert!(!group.is_enabled("labels"));
}

/// `all` turns on every toolset, and `is_enabled` answers true even for
/// names that were never registered.
#[test]
fn test_enable_all() {
    let mut group = sample_group(false);

    group.enable_toolsets([ALL_TOOLSETS]).unwrap();

    assert!(group.is_everything_on());
    assert!(group.is_enabled("tasks"));
    assert!(group.is_enabled("projects"));
    assert!(group.is_enabled("labels"));
    assert!(group.toolsets().all(Toolset::is_enabled));
}

#[test]
fn test_enable_all_stops_scanning_names() {
    let mut group = sample_group(false);

    // The unknown name after `all` is never looked up
    group
        .enable_toolsets(["projects", ALL_TOOLSETS, "labels"])
        .unwrap();

    assert!(group.is_enabled("tasks"));
}

#[test]
fn test_enable_nonexistent_does_not_turn_everything_on() {
    let mut group = sample_group(false);

    let result = group.enable_toolsets(["nonexistent"]);

    assert!(result.is_err());
    assert!(!group.is_everything_on());
    assert!(!group.is_enabled("tasks"));
}

/// Enablement is best-effort: names before the failing one stay enabled.
#[test]
fn test_enable_toolsets_is_not_rolled_back() {
    let mut group = sample_group(false);

    let err = group
        .enable_toolsets(["projects", "nonexistent", "tasks"])
        .unwrap_err();

    assert_eq!(err.to_string(), "toolset nonexistent does not exist");
    assert!(group.is_enabled("projects"));
    assert!(!group.is_enabled("tasks"));
}

#[test]
fn test_enable_toolsets_accepts_owned_names() {
    let mut group = sample_group(false);
    let names = vec!["tasks".to_string(), "projects".to_string()];

    group.enable_toolsets(&names).unwrap();

    assert!(group.is_enabled("tasks"));
    assert!(group.is_enabled("projects"));
}

/// A read-only group never exposes write tools, even after `all`.
#[test]
fn test_read_only_group_hides_write_tools() {
    let mut group = sample_group(true);

    group.enable_toolsets([ALL_TOOLSETS]).unwrap();

    assert!(group.is_read_only());
    assert!(group.toolset("tasks").unwrap().is_read_only());
    assert_eq!(active_names(&group, "tasks"), vec!["list-tasks", "get-task"]);
}

#[test]
fn test_duplicate_toolset_name_overwrites() {
    let mut group = ToolsetGroup::new(false);
    group.add_toolset(toolset("tasks", &["list-tasks"], &[]));
    group.add_toolset(toolset("tasks", &["get-task"], &["close-task"]));

    group.enable_toolsets([ALL_TOOLSETS]).unwrap();

    assert_eq!(group.toolsets().count(), 1);
    assert_eq!(active_names(&group, "tasks"), vec!["get-task", "close-task"]);
}

#[test]
fn test_register_tools_only_enabled_toolsets() {
    let mut group = sample_group(false);
    group.enable_toolset("tasks").unwrap();

    let mut sink = NameSink::default();
    group.register_tools(&mut sink);

    assert_eq!(
        sink.0,
        vec!["list-tasks", "get-task", "create-task", "delete-task"]
    );
}

#[test]
fn test_register_tools_all_is_sorted_by_toolset() {
    let mut group = sample_group(false);
    group.enable_toolsets([ALL_TOOLSETS]).unwrap();

    let mut sink = NameSink::default();
    group.register_tools(&mut sink);

    assert_eq!(
        sink.0,
        vec![
            "list-projects",
            "list-tasks",
            "get-task",
            "create-task",
            "delete-task"
        ]
    );
}

#[test]
fn test_register_tools_nothing_enabled() {
    let group = sample_group(false);

    let mut sink = MockToolSink::new();
    sink.expect_add_tool().never();

    group.register_tools(&mut sink);
}
