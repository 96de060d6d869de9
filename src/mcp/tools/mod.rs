//! Todoist tool definitions and handlers.
//!
//! Each tool is a [`ServerTool`] built from a static descriptor (name,
//! description, JSON schema, annotations) and a handler generic over the
//! backend. [`default_toolset_group`] wires them into the `tasks` and
//! `projects` toolsets.

mod filter_help;
mod projects;
mod tasks;

#[cfg(test)]
mod tasks_test;

use std::future::Future;
use std::sync::Arc;

use rmcp::model::{JsonObject, Tool, ToolAnnotations};
use serde_json::Value;

use crate::todoist::TodoistApi;
use crate::toolsets::{ServerTool, Toolset, ToolsetGroup};

use super::result::{ToolOutcome, finish};

pub use filter_help::FILTER_HELP;

pub const TASKS_TOOLSET: &str = "tasks";
pub const PROJECTS_TOOLSET: &str = "projects";

/// Build the group holding every Todoist toolset. Nothing is enabled yet.
pub fn default_toolset_group<C: TodoistApi + 'static>(
    client: Arc<C>,
    read_only: bool,
) -> ToolsetGroup {
    let mut tasks = Toolset::new(TASKS_TOOLSET, "Todoist task management tools");
    tasks
        .add_read_tools([
            filter_help::list_task_filter_help(),
            tasks::list_tasks(&client),
            tasks::get_task(&client),
        ])
        .add_write_tools([
            tasks::create_task(&client),
            tasks::update_task(&client),
            tasks::close_task(&client),
            tasks::reopen_task(&client),
            tasks::delete_task(&client),
        ]);

    let mut projects = Toolset::new(PROJECTS_TOOLSET, "Todoist project management tools");
    projects.add_read_tools([projects::list_projects(&client), projects::get_project(&client)]);

    let mut group = ToolsetGroup::new(read_only);
    group.add_toolset(tasks);
    group.add_toolset(projects);
    group
}

/// Build a tool descriptor. `schema` must be a JSON object.
fn define(
    name: &'static str,
    description: &'static str,
    annotations: ToolAnnotations,
    schema: Value,
) -> Tool {
    let Value::Object(schema) = schema else {
        panic!("tool ({}) input schema must be a JSON object", name);
    };
    let mut tool = Tool::new(name, description, Arc::new(schema));
    tool.annotations = Some(annotations);
    tool
}

fn read_annotations(title: &str) -> ToolAnnotations {
    let mut annotations = ToolAnnotations::new().read_only(true).open_world(true);
    annotations.title = Some(title.to_string());
    annotations
}

fn write_annotations(title: &str, destructive: bool, idempotent: bool) -> ToolAnnotations {
    let mut annotations = ToolAnnotations::new()
        .read_only(false)
        .destructive(destructive)
        .idempotent(idempotent)
        .open_world(true);
    annotations.title = Some(title.to_string());
    annotations
}

/// Bind `tool` to a handler that gets its own handle on the client.
fn bind<C, F, Fut>(tool: Tool, client: &Arc<C>, handler: F) -> ServerTool
where
    C: TodoistApi + 'static,
    F: Fn(Arc<C>, JsonObject) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ToolOutcome> + Send + 'static,
{
    let client = Arc::clone(client);
    let name = tool.name.to_string();
    ServerTool::new(tool, move |args| {
        let outcome = handler(Arc::clone(&client), args);
        let name = name.clone();
        async move { finish(&name, outcome.await) }
    })
}
