use rmcp::ServiceExt;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::todoist::TodoistApi;

use super::{Server, ServerError, ServerResult};

impl<C: TodoistApi + 'static> Server<C> {
    /// Serve one MCP session over stdin/stdout.
    ///
    /// Returns when stdin closes or `ct` is cancelled.
    pub async fn serve_stdio(&self, ct: CancellationToken) -> ServerResult<()> {
        info!("MCP server listening on stdio");

        let running = self
            .mcp_server()
            .serve_with_ct(rmcp::transport::io::stdio(), ct)
            .await
            .map_err(|err| ServerError::Transport {
                message: err.to_string(),
            })?;

        let reason = running
            .waiting()
            .await
            .map_err(|err| ServerError::Transport {
                message: err.to_string(),
            })?;

        info!(reason = ?reason, "stdio session ended");
        Ok(())
    }
}
