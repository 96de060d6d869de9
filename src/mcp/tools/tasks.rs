//! Task tools.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate};
use rmcp::model::JsonObject;
use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::mcp::params::{ParamError, optional, required};
use crate::mcp::result::{ToolOutcome, api_error, json_result};
use crate::todoist::{CreateTaskRequest, DueInput, Task, TodoistApi, UpdateTaskRequest};
use crate::toolsets::ServerTool;

use super::{bind, define, read_annotations, write_annotations};

#[derive(Serialize)]
struct TasksPayload<'a> {
    tasks: &'a [Task],
}

#[derive(Serialize)]
struct TaskPayload<'a> {
    task: &'a Task,
}

#[derive(Serialize)]
struct DonePayload<'a> {
    success: bool,
    id: &'a str,
}

// =============================================================================
// Parameter helpers
// =============================================================================

fn priority(args: &JsonObject) -> Result<Option<u8>, ParamError> {
    match optional::<i64>(args, "priority")? {
        None => Ok(None),
        Some(p @ 1..=4) => Ok(Some(p as u8)),
        Some(p) => Err(ParamError::invalid(
            "priority",
            format!("{} is outside 1 (normal) to 4 (urgent)", p),
        )),
    }
}

/// Collect the due fields, allowing at most one way of expressing the date.
fn due(args: &JsonObject) -> Result<DueInput, ParamError> {
    let due = DueInput {
        string: optional(args, "dueString")?,
        date: optional(args, "dueDate")?,
        datetime: optional(args, "dueDatetime")?,
        lang: optional(args, "dueLang")?,
    };

    let given = [&due.string, &due.date, &due.datetime]
        .iter()
        .filter(|v| v.is_some())
        .count();
    if given > 1 {
        return Err(ParamError::invalid(
            "due",
            "only one of dueString, dueDate or dueDatetime may be given",
        ));
    }

    if let Some(date) = &due.date {
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|e| ParamError::invalid("dueDate", format!("expected YYYY-MM-DD ({})", e)))?;
    }
    if let Some(datetime) = &due.datetime {
        DateTime::parse_from_rfc3339(datetime)
            .map_err(|e| ParamError::invalid("dueDatetime", format!("expected RFC 3339 ({})", e)))?;
    }

    Ok(due)
}

fn due_schema() -> serde_json::Value {
    json!({
        "dueString": {
            "type": "string",
            "description": "Due date in natural language, e.g. 'tomorrow at 5pm' or 'every monday'"
        },
        "dueDate": {
            "type": "string",
            "description": "Due date as YYYY-MM-DD"
        },
        "dueDatetime": {
            "type": "string",
            "description": "Due date and time in RFC 3339, e.g. 2025-03-01T09:00:00Z"
        },
        "dueLang": {
            "type": "string",
            "description": "Two-letter language code dueString is written in"
        }
    })
}

/// Extend `properties` with the due fields.
fn with_due(mut properties: serde_json::Value) -> serde_json::Value {
    if let (Some(target), serde_json::Value::Object(due)) =
        (properties.as_object_mut(), due_schema())
    {
        target.extend(due);
    }
    properties
}

fn id_schema(description: &str) -> serde_json::Value {
    json!({
        "type": "object",
        "required": ["id"],
        "properties": {
            "id": {"type": "string", "description": description}
        }
    })
}

// =============================================================================
// Read tools
// =============================================================================

pub fn list_tasks<C: TodoistApi + 'static>(client: &Arc<C>) -> ServerTool {
    let tool = define(
        "list-tasks",
        "List active tasks. Narrow the list with a project ID or a Todoist filter query; see list-task-filter-help for the query syntax.",
        read_annotations("List tasks"),
        json!({
            "type": "object",
            "properties": {
                "projectId": {
                    "type": "string",
                    "description": "Only list tasks in this project"
                },
                "filter": {
                    "type": "string",
                    "description": "Todoist filter query, e.g. 'today & p1'. Takes precedence over projectId"
                }
            }
        }),
    );
    bind(tool, client, handle_list_tasks::<C>)
}

async fn handle_list_tasks<C: TodoistApi>(client: Arc<C>, args: JsonObject) -> ToolOutcome {
    let project_id: Option<String> = optional(&args, "projectId")?;
    let filter: Option<String> = optional(&args, "filter")?;

    info!(project_id = ?project_id, filter = ?filter, "listing tasks");
    let tasks = client
        .get_tasks(project_id.as_deref(), filter.as_deref())
        .await
        .map_err(api_error("failed to list tasks"))?;

    json_result(&TasksPayload { tasks: &tasks })
}

pub fn get_task<C: TodoistApi + 'static>(client: &Arc<C>) -> ServerTool {
    let tool = define(
        "get-task",
        "Get a single task by ID.",
        read_annotations("Get task"),
        id_schema("Task ID"),
    );
    bind(tool, client, handle_get_task::<C>)
}

async fn handle_get_task<C: TodoistApi>(client: Arc<C>, args: JsonObject) -> ToolOutcome {
    let id: String = required(&args, "id")?;

    info!(id = %id, "getting task");
    let task = client
        .get_task(&id)
        .await
        .map_err(api_error("failed to get task"))?;

    json_result(&TaskPayload { task: &task })
}

// =============================================================================
// Write tools
// =============================================================================

pub fn create_task<C: TodoistApi + 'static>(client: &Arc<C>) -> ServerTool {
    let tool = define(
        "create-task",
        "Create a new task. Give at most one of dueString, dueDate or dueDatetime.",
        write_annotations("Create task", false, false),
        json!({
            "type": "object",
            "required": ["content"],
            "properties": with_due(json!({
                "content": {"type": "string", "description": "Task content (title)"},
                "description": {"type": "string", "description": "Longer task description"},
                "projectId": {"type": "string", "description": "Project to add the task to; defaults to Inbox"},
                "sectionId": {"type": "string", "description": "Section to add the task to"},
                "parentId": {"type": "string", "description": "Parent task ID, making this a sub-task"},
                "order": {"type": "integer", "description": "Position among sibling tasks"},
                "labels": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "Label names"
                },
                "priority": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": 4,
                    "description": "Priority from 1 (normal) to 4 (urgent)"
                }
            }))
        }),
    );
    bind(tool, client, handle_create_task::<C>)
}

async fn handle_create_task<C: TodoistApi>(client: Arc<C>, args: JsonObject) -> ToolOutcome {
    let req = CreateTaskRequest {
        content: required(&args, "content")?,
        description: optional(&args, "description")?,
        project_id: optional(&args, "projectId")?,
        section_id: optional(&args, "sectionId")?,
        parent_id: optional(&args, "parentId")?,
        order: optional(&args, "order")?,
        labels: optional(&args, "labels")?,
        priority: priority(&args)?,
        due: due(&args)?,
    };

    info!(project_id = ?req.project_id, "creating task");
    let task = client
        .create_task(&req)
        .await
        .map_err(api_error("failed to create task"))?;
    info!(id = %task.id, "created task");

    json_result(&TaskPayload { task: &task })
}

pub fn update_task<C: TodoistApi + 'static>(client: &Arc<C>) -> ServerTool {
    let tool = define(
        "update-task",
        "Update an existing task. Only the given fields change.",
        write_annotations("Update task", false, false),
        json!({
            "type": "object",
            "required": ["id"],
            "properties": with_due(json!({
                "id": {"type": "string", "description": "Task ID"},
                "content": {"type": "string", "description": "New task content"},
                "description": {"type": "string", "description": "New task description"},
                "labels": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "Replaces every label on the task"
                },
                "priority": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": 4,
                    "description": "Priority from 1 (normal) to 4 (urgent)"
                }
            }))
        }),
    );
    bind(tool, client, handle_update_task::<C>)
}

async fn handle_update_task<C: TodoistApi>(client: Arc<C>, args: JsonObject) -> ToolOutcome {
    let id: String = required(&args, "id")?;
    let req = UpdateTaskRequest {
        content: optional(&args, "content")?,
        description: optional(&args, "description")?,
        labels: optional(&args, "labels")?,
        priority: priority(&args)?,
        due: due(&args)?,
    };
    if req.is_empty() {
        return Err(ParamError::NoChanges {
            fields: "content, description, labels, priority, dueString, dueDate, dueDatetime",
        }
        .into());
    }

    info!(id = %id, "updating task");
    let task = client
        .update_task(&id, &req)
        .await
        .map_err(api_error("failed to update task"))?;

    json_result(&TaskPayload { task: &task })
}

pub fn close_task<C: TodoistApi + 'static>(client: &Arc<C>) -> ServerTool {
    let tool = define(
        "close-task",
        "Mark a task as completed. Recurring tasks move to their next date instead.",
        write_annotations("Close task", false, true),
        id_schema("ID of the task to complete"),
    );
    bind(tool, client, handle_close_task::<C>)
}

async fn handle_close_task<C: TodoistApi>(client: Arc<C>, args: JsonObject) -> ToolOutcome {
    let id: String = required(&args, "id")?;

    info!(id = %id, "closing task");
    client
        .close_task(&id)
        .await
        .map_err(api_error("failed to close task"))?;

    json_result(&DonePayload { success: true, id: &id })
}

pub fn reopen_task<C: TodoistApi + 'static>(client: &Arc<C>) -> ServerTool {
    let tool = define(
        "reopen-task",
        "Reopen a completed task.",
        write_annotations("Reopen task", false, true),
        id_schema("ID of the task to reopen"),
    );
    bind(tool, client, handle_reopen_task::<C>)
}

async fn handle_reopen_task<C: TodoistApi>(client: Arc<C>, args: JsonObject) -> ToolOutcome {
    let id: String = required(&args, "id")?;

    info!(id = %id, "reopening task");
    client
        .reopen_task(&id)
        .await
        .map_err(api_error("failed to reopen task"))?;

    json_result(&DonePayload { success: true, id: &id })
}

pub fn delete_task<C: TodoistApi + 'static>(client: &Arc<C>) -> ServerTool {
    let tool = define(
        "delete-task",
        "Permanently delete a task and its sub-tasks.",
        write_annotations("Delete task", true, false),
        id_schema("ID of the task to delete"),
    );
    bind(tool, client, handle_delete_task::<C>)
}

async fn handle_delete_task<C: TodoistApi>(client: Arc<C>, args: JsonObject) -> ToolOutcome {
    let id: String = required(&args, "id")?;

    info!(id = %id, "deleting task");
    client
        .delete_task(&id)
        .await
        .map_err(api_error("failed to delete task"))?;

    json_result(&DonePayload { success: true, id: &id })
}
