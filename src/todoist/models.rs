//! Todoist API v1 payloads.
//!
//! Response types default every field so partial payloads (and stub
//! servers in tests) still decode. Request types skip unset fields on the
//! wire; the API treats a missing field as "leave unchanged".

use serde::{Deserialize, Serialize};

/// List envelope used by the v1 collection endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Paginated<T> {
    pub results: Vec<T>,
    pub next_cursor: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Task {
    pub id: String,
    pub user_id: String,
    pub content: String,
    pub description: String,
    pub project_id: String,
    pub section_id: Option<String>,
    pub parent_id: Option<String>,
    pub added_by_uid: Option<String>,
    pub assigned_by_uid: Option<String>,
    pub responsible_uid: Option<String>,
    pub labels: Vec<String>,
    pub deadline: Option<Deadline>,
    pub duration: Option<Duration>,
    pub checked: bool,
    pub is_deleted: bool,
    pub added_at: Option<String>,
    pub completed_at: Option<String>,
    pub updated_at: Option<String>,
    pub due: Option<Due>,
    /// 1 (normal) to 4 (urgent), as the API counts it.
    pub priority: u8,
    pub child_order: i64,
    pub note_count: i64,
    pub day_order: i64,
    pub is_collapsed: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Due {
    pub date: String,
    pub is_recurring: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Deadline {
    pub date: String,
    pub lang: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Duration {
    pub amount: i64,
    pub unit: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub can_assign_tasks: bool,
    pub child_order: i64,
    pub color: String,
    pub created_at: Option<String>,
    pub is_archived: bool,
    pub is_deleted: bool,
    pub is_favorite: bool,
    pub is_frozen: bool,
    pub updated_at: Option<String>,
    pub view_style: String,
    pub default_order: i64,
    pub description: String,
    pub is_collapsed: bool,
    pub is_shared: bool,
    pub parent_id: Option<String>,
    pub inbox_project: bool,
}

/// Due date fields shared by create and update.
///
/// At most one of `string`, `date`, `datetime` should be set; the tool
/// layer enforces that before a request is built.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DueInput {
    #[serde(rename = "due_string", skip_serializing_if = "Option::is_none")]
    pub string: Option<String>,
    #[serde(rename = "due_date", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "due_datetime", skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    #[serde(rename = "due_lang", skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl DueInput {
    pub fn is_empty(&self) -> bool {
        self.string.is_none() && self.date.is_none() && self.datetime.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CreateTaskRequest {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(flatten)]
    pub due: DueInput,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateTaskRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(flatten)]
    pub due: DueInput,
}

impl UpdateTaskRequest {
    /// True when the request would not change anything.
    pub fn is_empty(&self) -> bool {
        self.content.is_none()
            && self.description.is_none()
            && self.labels.is_none()
            && self.priority.is_none()
            && self.due.is_empty()
    }
}
