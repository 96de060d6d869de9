//! Backend abstraction for Todoist operations.

use std::future::Future;

use super::error::ApiResult;
use super::models::{CreateTaskRequest, Project, Task, UpdateTaskRequest};

/// Operations the MCP tools need from Todoist.
///
/// Implementors perform exactly one HTTP call per method; there is no
/// retry, caching or pagination beyond the first page.
pub trait TodoistApi: Send + Sync {
    /// List active tasks. A non-empty `filter` takes precedence over
    /// `project_id`.
    fn get_tasks(
        &self,
        project_id: Option<&str>,
        filter: Option<&str>,
    ) -> impl Future<Output = ApiResult<Vec<Task>>> + Send;

    fn get_task(&self, id: &str) -> impl Future<Output = ApiResult<Task>> + Send;

    fn create_task(&self, req: &CreateTaskRequest)
    -> impl Future<Output = ApiResult<Task>> + Send;

    fn update_task(
        &self,
        id: &str,
        req: &UpdateTaskRequest,
    ) -> impl Future<Output = ApiResult<Task>> + Send;

    /// Mark a task as completed.
    fn close_task(&self, id: &str) -> impl Future<Output = ApiResult<()>> + Send;

    /// Mark a completed task as active again.
    fn reopen_task(&self, id: &str) -> impl Future<Output = ApiResult<()>> + Send;

    fn delete_task(&self, id: &str) -> impl Future<Output = ApiResult<()>> + Send;

    fn get_projects(&self) -> impl Future<Output = ApiResult<Vec<Project>>> + Send;

    fn get_project(&self, id: &str) -> impl Future<Output = ApiResult<Project>> + Send;
}
