use tabled::{Table, Tabled, settings::Style};

use crate::toolsets::ToolsetGroup;

#[derive(Tabled)]
struct ToolRow {
    #[tabled(rename = "Toolset")]
    toolset: String,
    #[tabled(rename = "Tool")]
    tool: String,
    #[tabled(rename = "Read-only")]
    read_only: bool,
    #[tabled(rename = "Description")]
    description: String,
}

/// Truncate a string with ellipsis if it exceeds max length
fn truncate_with_ellipsis(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max - 3).collect();
        format!("{}...", truncated)
    }
}

/// Table of every tool each toolset can expose, whether or not it is
/// enabled.
pub fn format_toolsets(group: &ToolsetGroup) -> String {
    let rows: Vec<ToolRow> = group
        .toolsets()
        .flat_map(|toolset| {
            toolset.available_tools().into_iter().map(move |tool| ToolRow {
                toolset: toolset.name().to_string(),
                tool: tool.name().to_string(),
                read_only: tool.is_read_only(),
                description: truncate_with_ellipsis(
                    tool.tool().description.as_deref().unwrap_or_default(),
                    60,
                ),
            })
        })
        .collect();

    if rows.is_empty() {
        return "No toolsets registered.".to_string();
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}
