//! Server shell: owns the Todoist client and toolset group and serves them
//! over HTTP or stdio.

mod error;
mod http;
mod listing;
mod logging;
mod shutdown;
mod stdio;


use std::sync::Arc;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::{Config, ServerMode};
use crate::mcp::{McpServer, default_toolset_group};
use crate::todoist::{TodoistApi, TodoistClient};
use crate::toolsets::ToolsetGroup;

pub use error::{ServerError, ServerResult};
pub use listing::format_toolsets;
pub use logging::{DEFAULT_LOG_FILTER, init_tracing};
pub use shutdown::shutdown_signal;

/// A configured server, ready to be served on either transport.
///
/// The toolset group is built and enabled once, before anything is
/// served, and only read afterwards.
pub struct Server<C> {
    client: Arc<C>,
    group: ToolsetGroup,
}

impl<C: TodoistApi + 'static> Server<C> {
    /// Build the default toolsets around `client` and enable `toolsets`.
    pub fn new<S: AsRef<str>>(client: C, read_only: bool, toolsets: &[S]) -> ServerResult<Self> {
        let client = Arc::new(client);
        let mut group = default_toolset_group(Arc::clone(&client), read_only);
        group.enable_toolsets(toolsets)?;
        Ok(Self { client, group })
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn group(&self) -> &ToolsetGroup {
        &self.group
    }

    /// A fresh MCP server holding every active tool.
    pub fn mcp_server(&self) -> McpServer {
        let mut server = McpServer::new();
        self.group.register_tools(&mut server);
        server
    }
}

/// Run the server described by `config` until shutdown.
pub async fn run(config: Config) -> ServerResult<()> {
    config.validate()?;

    let client = TodoistClient::new(config.token()?, config.api_url.as_str(), config.timeout)?;
    let server = Server::new(client, config.read_only, config.toolsets.as_slice())?;
    info!(
        mode = %config.mode,
        read_only = config.read_only,
        toolsets = ?config.toolsets,
        tools = server.mcp_server().tool_names().len(),
        "starting Todoist MCP server"
    );

    let ct = CancellationToken::new();
    tokio::spawn(shutdown_signal(ct.clone()));

    match config.mode {
        ServerMode::Http => {
            let listener = TcpListener::bind(config.addr)
                .await
                .map_err(|source| ServerError::Bind {
                    addr: config.addr,
                    source,
                })?;
            server
                .serve_http(listener, config.shutdown_grace, ct)
                .await
        }
        ServerMode::Stdio => server.serve_stdio(ct).await,
    }
}
