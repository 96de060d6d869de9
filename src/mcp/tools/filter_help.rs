use rmcp::model::{CallToolResult, Content};
use serde_json::json;
use tracing::info;

use crate::toolsets::ServerTool;

use super::{define, read_annotations};

/// Todoist filter query reference handed to agents.
pub const FILTER_HELP: &str = r#"# Todoist filter queries

Pass a filter query as the `filter` parameter of `list-tasks` to narrow the
result to matching tasks.

## Operators

| Operator | Meaning | Example |
|----------|---------|---------|
| `\|` | or | `today \| overdue` |
| `&` | and | `today & p1` |
| `!` | not | `!subtask` |
| `( )` | grouping | `(today \| overdue) & #Work` |
| `,` | separate result lists | `date: yesterday, today` |
| `\` | escape a special character | `#One \& Two` |

## Dates

| Query | Matches |
|-------|---------|
| `today`, `tomorrow`, `overdue` | tasks due then |
| `date: jan 3` | due on a given day |
| `before: may 5`, `after: may 5` | due before or after a day |
| `before: +4 hours` | overdue or due within four hours |
| `7 days` | due within the next week |
| `no date`, `!no date` | without or with a due date |
| `no time` | due date without a time |
| `recurring` | recurring tasks |

## Priority, labels and structure

| Query | Matches |
|-------|---------|
| `p1` .. `p4` | tasks with that priority (`p4` is the default) |
| `no priority` | same as `p4` |
| `@email` | tasks carrying the label `email` |
| `no labels` | tasks with no label at all |
| `#Work` | tasks in project Work |
| `##Work` | project Work and its sub-projects |
| `/Meetings` | tasks in sections named Meetings |
| `!/*` | tasks outside any section |
| `subtask`, `!subtask` | only sub-tasks, only top-level tasks |

## Text, history and sharing

| Query | Matches |
|-------|---------|
| `search: meeting` | content containing "meeting" |
| `created: today` | tasks added today |
| `created before: -30 days` | tasks older than thirty days |
| `assigned to: me` | tasks assigned to you |
| `assigned by: me` | tasks you assigned to others |
| `shared` | tasks in shared projects |

## Combined examples

| Request | Query |
|---------|-------|
| urgent work for today | `today & p1 & #Work` |
| waiting on someone this week | `7 days & @waiting` |
| anything late or due today | `today \| overdue` |
| undated tasks in Inbox | `#Inbox & no date` |
"#;

pub fn list_task_filter_help() -> ServerTool {
    let tool = define(
        "list-task-filter-help",
        "Get the Todoist filter query syntax with examples. Use it to turn a natural-language request into the filter parameter of list-tasks.",
        read_annotations("Task filter syntax"),
        json!({"type": "object", "properties": {}}),
    );

    ServerTool::new(tool, |_| async {
        info!("serving task filter help");
        CallToolResult::success(vec![Content::text(FILTER_HELP)])
    })
}
