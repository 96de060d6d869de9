//! Todoist MCP server binary.
//!
//! Parses flags, layers them over the environment and hands the result to
//! the library's server shell.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use todoist_mcp::config::{Config, ServerMode};
use todoist_mcp::mcp::default_toolset_group;
use todoist_mcp::server::{self, format_toolsets, init_tracing};
use todoist_mcp::todoist::TodoistClient;

#[derive(Parser)]
#[command(name = "todoist-mcp-server")]
#[command(author, version, about = "MCP server for Todoist tasks and projects", long_about = None)]
struct Cli {
    /// Todoist API token (default: $TODOIST_API_TOKEN)
    #[arg(long)]
    token: Option<String>,

    /// Todoist API base URL (default: $TODOIST_API_URL or the public v1 API)
    #[arg(long)]
    api_url: Option<String>,

    /// Backend request timeout in seconds (default: $TODOIST_TIMEOUT_SECS or 10)
    #[arg(long)]
    timeout: Option<u64>,

    /// Transport to serve on (default: $TODOIST_MCP_MODE or http)
    #[arg(long, value_enum)]
    mode: Option<ServerMode>,

    /// HTTP listen address (default: $TODOIST_MCP_ADDR or 0.0.0.0:8080)
    #[arg(long)]
    addr: Option<SocketAddr>,

    /// Comma separated toolsets to enable, or "all" (default: $TODOIST_TOOLSETS or all)
    #[arg(long, value_delimiter = ',')]
    toolsets: Option<Vec<String>>,

    /// Expose read-only tools only (also: $TODOIST_READ_ONLY)
    #[arg(long)]
    read_only: bool,

    /// Seconds in-flight HTTP requests may take to finish after a shutdown signal
    #[arg(long, default_value = "5")]
    shutdown_grace: u64,

    /// Tracing filter directives (default: $RUST_LOG or todoist_mcp=info,tower_http=info)
    #[arg(long)]
    log: Option<String>,

    /// Print the available toolsets and their tools, then exit
    #[arg(long)]
    list_toolsets: bool,
}

impl Cli {
    fn into_config(self) -> miette::Result<Config> {
        let mut config = Config::new()?
            .with_read_only(self.read_only)
            .with_shutdown_grace(Duration::from_secs(self.shutdown_grace));

        if let Some(token) = self.token {
            config = config.with_token(token);
        }
        if let Some(api_url) = self.api_url {
            config = config.with_api_url(api_url);
        }
        if let Some(secs) = self.timeout {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Some(mode) = self.mode {
            config = config.with_mode(mode);
        }
        if let Some(addr) = self.addr {
            config = config.with_addr(addr);
        }
        if let Some(toolsets) = self.toolsets {
            config = config.with_toolsets(toolsets);
        }
        if let Some(filter) = self.log {
            config = config.with_log_filter(filter);
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    let list_toolsets = cli.list_toolsets;
    let config = cli.into_config()?;

    init_tracing(config.log_filter.as_deref());

    if list_toolsets {
        // Listing needs no token; the client is never called
        let client = TodoistClient::new("", config.api_url.as_str(), config.timeout)?;
        let group = default_toolset_group(Arc::new(client), config.read_only);
        println!("{}", format_toolsets(&group));
        return Ok(());
    }

    server::run(config).await?;
    Ok(())
}
