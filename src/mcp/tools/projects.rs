//! Project tools.

use std::sync::Arc;

use rmcp::model::JsonObject;
use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::mcp::params::required;
use crate::mcp::result::{ToolOutcome, api_error, json_result};
use crate::todoist::{Project, TodoistApi};
use crate::toolsets::ServerTool;

use super::{bind, define, read_annotations};

#[derive(Serialize)]
struct ProjectsPayload<'a> {
    projects: &'a [Project],
}

#[derive(Serialize)]
struct ProjectPayload<'a> {
    project: &'a Project,
}

pub fn list_projects<C: TodoistApi + 'static>(client: &Arc<C>) -> ServerTool {
    let tool = define(
        "list-projects",
        "List all projects. Use the IDs with list-tasks and create-task.",
        read_annotations("List projects"),
        json!({"type": "object", "properties": {}}),
    );
    bind(tool, client, handle_list_projects::<C>)
}

async fn handle_list_projects<C: TodoistApi>(client: Arc<C>, _args: JsonObject) -> ToolOutcome {
    info!("listing projects");
    let projects = client
        .get_projects()
        .await
        .map_err(api_error("failed to list projects"))?;

    json_result(&ProjectsPayload {
        projects: &projects,
    })
}

pub fn get_project<C: TodoistApi + 'static>(client: &Arc<C>) -> ServerTool {
    let tool = define(
        "get-project",
        "Get a single project by ID.",
        read_annotations("Get project"),
        json!({
            "type": "object",
            "required": ["id"],
            "properties": {
                "id": {"type": "string", "description": "Project ID"}
            }
        }),
    );
    bind(tool, client, handle_get_project::<C>)
}

async fn handle_get_project<C: TodoistApi>(client: Arc<C>, args: JsonObject) -> ToolOutcome {
    let id: String = required(&args, "id")?;

    info!(id = %id, "getting project");
    let project = client
        .get_project(&id)
        .await
        .map_err(api_error("failed to get project"))?;

    json_result(&ProjectPayload { project: &project })
}
