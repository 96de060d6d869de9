//! Tests for the task tools, driven through an `McpServer` backed by a
//! stub Todoist API.

use axum::http::{Method, StatusCode};
use serde_json::json;

use super::FILTER_HELP;
use crate::test_support::{StubBackend, call_tool, registered_server, result_json, result_text};

/// A task is created and the backend's JSON comes back in the result.
#[tokio::test]
async fn test_create_task_success() {
    // Arrange
    let stub = StubBackend::builder()
        .json(
            Method::POST,
            "/tasks",
            StatusCode::OK,
            json!({"id": "1", "content": "Buy milk"}),
        )
        .start()
        .await;
    let server = registered_server(stub.client(), false);

    // Act
    let result = call_tool(&server, "create-task", json!({"content": "Buy milk"})).await;

    // Assert
    let payload = result_json(&result);
    assert_eq!(payload["task"]["id"], "1");
    assert_eq!(payload["task"]["content"], "Buy milk");
    assert_eq!(stub.requests()[0].json_body(), json!({"content": "Buy milk"}));
}

#[tokio::test]
async fn test_create_task_maps_parameters() {
    let stub = StubBackend::builder()
        .json(
            Method::POST,
            "/tasks",
            StatusCode::OK,
            json!({"id": "2", "content": "Report"}),
        )
        .start()
        .await;
    let server = registered_server(stub.client(), false);

    let result = call_tool(
        &server,
        "create-task",
        json!({
            "content": "Report",
            "description": "Quarterly numbers",
            "projectId": "p1",
            "sectionId": "s1",
            "parentId": "t0",
            "order": 3,
            "labels": ["work", "finance"],
            "priority": 4,
            "dueString": "next friday",
            "dueLang": "en"
        }),
    )
    .await;

    assert_eq!(result.is_error, Some(false));
    assert_eq!(
        stub.requests()[0].json_body(),
        json!({
            "content": "Report",
            "description": "Quarterly numbers",
            "project_id": "p1",
            "section_id": "s1",
            "parent_id": "t0",
            "order": 3,
            "labels": ["work", "finance"],
            "priority": 4,
            "due_string": "next friday",
            "due_lang": "en"
        })
    );
}

#[tokio::test]
async fn test_create_task_accepts_rfc3339_datetime() {
    let stub = StubBackend::builder()
        .json(Method::POST, "/tasks", StatusCode::OK, json!({"id": "3"}))
        .start()
        .await;
    let server = registered_server(stub.client(), false);

    let result = call_tool(
        &server,
        "create-task",
        json!({"content": "Call", "dueDatetime": "2025-03-01T09:00:00Z"}),
    )
    .await;

    assert_eq!(result.is_error, Some(false));
    assert_eq!(
        stub.requests()[0].json_body()["due_datetime"],
        "2025-03-01T09:00:00Z"
    );
}

/// Bad input never reaches the backend.
#[tokio::test]
async fn test_create_task_validation_errors() {
    let stub = StubBackend::builder().start().await;
    let server = registered_server(stub.client(), false);

    let cases = [
        (json!({}), "missing required parameter: content"),
        (json!({"content": null}), "missing required parameter: content"),
        (json!({"content": 42}), "parameter content must be a string"),
        (json!({"content": "x", "priority": 5}), "invalid parameter priority"),
        (json!({"content": "x", "priority": "high"}), "parameter priority must be an integer"),
        (json!({"content": "x", "labels": "work"}), "must be an array of strings"),
        (
            json!({"content": "x", "dueString": "today", "dueDate": "2025-01-01"}),
            "only one of dueString, dueDate or dueDatetime",
        ),
        (json!({"content": "x", "dueDate": "01/02/2025"}), "invalid parameter dueDate"),
        (json!({"content": "x", "dueDatetime": "tomorrow 9am"}), "invalid parameter dueDatetime"),
    ];

    for (args, expected) in cases {
        let result = call_tool(&server, "create-task", args.clone()).await;

        assert_eq!(result.is_error, Some(true), "{} should be rejected", args);
        let text = result_text(&result);
        assert!(text.starts_with("invalid parameters: "), "{}", text);
        assert!(text.contains(expected), "{} does not contain {}", text, expected);
    }
    assert!(stub.requests().is_empty());
}

/// A missing id is reported without calling the backend.
#[tokio::test]
async fn test_get_task_missing_id() {
    let stub = StubBackend::builder().start().await;
    let server = registered_server(stub.client(), false);

    let result = call_tool(&server, "get-task", json!({})).await;

    assert_eq!(result.is_error, Some(true));
    assert!(result_text(&result).contains("missing required parameter: id"));
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn test_get_task_success() {
    let stub = StubBackend::builder()
        .json(
            Method::GET,
            "/tasks/42",
            StatusCode::OK,
            json!({"id": "42", "content": "Answer", "labels": ["deep"]}),
        )
        .start()
        .await;
    let server = registered_server(stub.client(), false);

    let result = call_tool(&server, "get-task", json!({"id": "42"})).await;

    let payload = result_json(&result);
    assert_eq!(payload["task"]["content"], "Answer");
    assert_eq!(payload["task"]["labels"], json!(["deep"]));
}

/// A backend failure is an error result, and the server keeps serving.
#[tokio::test]
async fn test_list_tasks_backend_error_then_recovers() {
    let stub = StubBackend::builder()
        .raw(Method::GET, "/tasks", StatusCode::INTERNAL_SERVER_ERROR, "boom")
        .json(
            Method::GET,
            "/tasks/1",
            StatusCode::OK,
            json!({"id": "1", "content": "Still here"}),
        )
        .start()
        .await;
    let server = registered_server(stub.client(), false);

    let failed = call_tool(&server, "list-tasks", json!({})).await;
    let next = call_tool(&server, "get-task", json!({"id": "1"})).await;

    assert_eq!(failed.is_error, Some(true));
    assert_eq!(
        result_text(&failed),
        "failed to list tasks: API request failed with status 500: boom"
    );
    assert_eq!(result_json(&next)["task"]["content"], "Still here");
}

#[tokio::test]
async fn test_list_tasks_with_filter() {
    let stub = StubBackend::builder()
        .json(
            Method::GET,
            "/tasks/filter",
            StatusCode::OK,
            json!({"results": [{"id": "1"}, {"id": "2"}], "next_cursor": null}),
        )
        .start()
        .await;
    let server = registered_server(stub.client(), false);

    let result = call_tool(&server, "list-tasks", json!({"filter": "today"})).await;

    let payload = result_json(&result);
    assert_eq!(payload["tasks"].as_array().map(Vec::len), Some(2));
    assert_eq!(stub.requests()[0].query.as_deref(), Some("query=today"));
}

#[tokio::test]
async fn test_update_task_sends_only_given_fields() {
    let stub = StubBackend::builder()
        .json(
            Method::POST,
            "/tasks/7",
            StatusCode::OK,
            json!({"id": "7", "content": "Renamed", "priority": 2}),
        )
        .start()
        .await;
    let server = registered_server(stub.client(), false);

    let result = call_tool(
        &server,
        "update-task",
        json!({"id": "7", "content": "Renamed", "priority": 2, "dueDate": "2025-06-30"}),
    )
    .await;

    assert_eq!(result_json(&result)["task"]["priority"], 2);
    assert_eq!(
        stub.requests()[0].json_body(),
        json!({"content": "Renamed", "priority": 2, "due_date": "2025-06-30"})
    );
}

#[tokio::test]
async fn test_update_task_without_changes_is_rejected() {
    let stub = StubBackend::builder().start().await;
    let server = registered_server(stub.client(), false);

    let result = call_tool(&server, "update-task", json!({"id": "7", "dueLang": "en"})).await;

    assert_eq!(result.is_error, Some(true));
    let text = result_text(&result);
    assert!(text.contains("no fields to update"), "{}", text);
    assert!(!text.contains("parameter id"), "{}", text);
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn test_close_reopen_delete_report_success() {
    let stub = StubBackend::builder()
        .raw(Method::POST, "/tasks/5/close", StatusCode::NO_CONTENT, "")
        .raw(Method::POST, "/tasks/5/reopen", StatusCode::NO_CONTENT, "")
        .raw(Method::DELETE, "/tasks/5", StatusCode::NO_CONTENT, "")
        .start()
        .await;
    let server = registered_server(stub.client(), false);

    for tool in ["close-task", "reopen-task", "delete-task"] {
        let result = call_tool(&server, tool, json!({"id": "5"})).await;

        assert_eq!(
            result_json(&result),
            json!({"success": true, "id": "5"}),
            "{}",
            tool
        );
    }
    assert_eq!(stub.requests().len(), 3);
}

#[tokio::test]
async fn test_delete_task_not_found() {
    let stub = StubBackend::builder().start().await;
    let server = registered_server(stub.client(), false);

    let result = call_tool(&server, "delete-task", json!({"id": "missing"})).await;

    assert_eq!(result.is_error, Some(true));
    assert!(result_text(&result).starts_with("failed to delete task: "));
    assert!(result_text(&result).contains("404"));
}

#[tokio::test]
async fn test_filter_help() {
    let stub = StubBackend::builder().start().await;
    let server = registered_server(stub.client(), false);

    let result = call_tool(&server, "list-task-filter-help", json!({})).await;

    assert_eq!(result.is_error, Some(false));
    assert_eq!(result_text(&result), FILTER_HELP);
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn test_task_tool_annotations() {
    let stub = StubBackend::builder().start().await;
    let server = registered_server(stub.client(), false);

    let annotations = |name: &str| {
        server
            .tool(name)
            .and_then(|t| t.tool().annotations.clone())
            .unwrap_or_else(|| panic!("{} should be annotated", name))
    };

    let list = annotations("list-tasks");
    assert_eq!(list.read_only_hint, Some(true));
    assert_eq!(list.title.as_deref(), Some("List tasks"));

    let create = annotations("create-task");
    assert_eq!(create.read_only_hint, Some(false));
    assert_eq!(create.destructive_hint, Some(false));
    assert_eq!(create.open_world_hint, Some(true));

    assert_eq!(annotations("delete-task").destructive_hint, Some(true));
    assert_eq!(annotations("close-task").idempotent_hint, Some(true));
    assert_eq!(annotations("reopen-task").idempotent_hint, Some(true));
}

#[tokio::test]
async fn test_read_only_server_has_no_task_writes() {
    let stub = StubBackend::builder().start().await;
    let server = registered_server(stub.client(), true);

    for name in ["create-task", "update-task", "close-task", "reopen-task", "delete-task"] {
        assert!(server.tool(name).is_none(), "{} should not be exposed", name);
    }
    assert!(server.tool("list-tasks").is_some());
}
