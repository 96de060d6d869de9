//! Shared test helpers: an axum stub standing in for the Todoist API, and
//! throwaway tools for registry tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use rmcp::model::{CallToolResult, Content, JsonObject, RawContent, Tool, ToolAnnotations};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use tokio_util::sync::CancellationToken;

use crate::mcp::{McpServer, default_toolset_group};
use crate::todoist::TodoistClient;
use crate::toolsets::{ALL_TOOLSETS, ServerTool};

/// Text of the first content item of a tool result.
pub(crate) fn result_text(result: &CallToolResult) -> String {
    match &result.content[0].raw {
        RawContent::Text(text) => text.text.clone(),
        other => panic!("expected text content, got {:?}", other),
    }
}

/// First content item of a successful tool result, parsed as JSON.
pub(crate) fn result_json(result: &CallToolResult) -> Value {
    assert_eq!(
        result.is_error,
        Some(false),
        "expected success, got: {}",
        result_text(result)
    );
    serde_json::from_str(&result_text(result)).expect("result should be JSON")
}

/// An MCP server with every default toolset enabled against `client`.
pub(crate) fn registered_server(client: TodoistClient, read_only: bool) -> McpServer {
    let mut group = default_toolset_group(Arc::new(client), read_only);
    group
        .enable_toolsets([ALL_TOOLSETS])
        .expect("enabling all never fails");
    let mut server = McpServer::new();
    group.register_tools(&mut server);
    server
}

/// Call a tool on `server` with JSON arguments.
pub(crate) async fn call_tool(server: &McpServer, name: &str, args: Value) -> CallToolResult {
    let args: JsonObject = args.as_object().cloned().unwrap_or_default();
    server
        .dispatch(name, args, CancellationToken::new())
        .await
        .expect("tool should exist")
}

/// A tool whose handler echoes its own name.
pub(crate) fn test_tool(name: &str, read_only: bool) -> ServerTool {
    let schema = json!({"type": "object", "properties": {}});
    let mut tool = Tool::new(
        name.to_string(),
        format!("{} (test)", name),
        Arc::new(schema.as_object().cloned().unwrap_or_default()),
    );
    let mut annotations = ToolAnnotations::new()
        .read_only(read_only)
        .open_world(true);
    annotations.title = Some(format!("Title of {}", name));
    tool.annotations = Some(annotations);

    let reply = name.to_string();
    ServerTool::new(tool, move |_| {
        let reply = reply.clone();
        async move { CallToolResult::success(vec![Content::text(reply)]) }
    })
}

/// A request the stub received.
#[derive(Debug, Clone)]
pub(crate) struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

impl Recorded {
    pub fn json_body(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body should be JSON")
    }
}

type Canned = HashMap<(Method, String), (StatusCode, String)>;

#[derive(Default)]
struct StubState {
    routes: Canned,
    delay: Option<Duration>,
    requests: Mutex<Vec<Recorded>>,
}

#[derive(Default)]
pub(crate) struct StubBuilder {
    routes: Canned,
    delay: Option<Duration>,
}

impl StubBuilder {
    /// Answer `method path` with a JSON body.
    pub fn json(mut self, method: Method, path: &str, status: StatusCode, body: Value) -> Self {
        self.routes
            .insert((method, path.to_string()), (status, body.to_string()));
        self
    }

    /// Answer `method path` with a raw (possibly empty) body.
    pub fn raw(mut self, method: Method, path: &str, status: StatusCode, body: &str) -> Self {
        self.routes
            .insert((method, path.to_string()), (status, body.to_string()));
        self
    }

    /// Hold every response back for `delay`.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub async fn start(self) -> StubBackend {
        let state = Arc::new(StubState {
            routes: self.routes,
            delay: self.delay,
            requests: Mutex::new(Vec::new()),
        });
        let app = Router::new()
            .fallback(handle)
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        StubBackend { url, state, handle }
    }
}

async fn handle(
    State(state): State<Arc<StubState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let path = uri.path().to_string();
    state.requests.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    if let Some(delay) = state.delay {
        tokio::time::sleep(delay).await;
    }

    match state.routes.get(&(method, path)) {
        Some((status, body)) => (
            *status,
            [("content-type", "application/json")],
            body.clone(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "not found").into_response(),
    }
}

/// Running stub server; aborted on drop.
pub(crate) struct StubBackend {
    url: String,
    state: Arc<StubState>,
    handle: JoinHandle<()>,
}

impl StubBackend {
    pub fn builder() -> StubBuilder {
        StubBuilder::default()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn client(&self) -> TodoistClient {
        TodoistClient::new("test-token", self.url.clone(), Duration::from_secs(5))
            .expect("client should build")
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
