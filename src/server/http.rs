use std::future::IntoFuture;
use std::pin::pin;
use std::time::Duration;

use axum::{Json, Router, routing::get};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::mcp::create_mcp_service;
use crate::todoist::TodoistApi;

use super::{Server, ServerResult};

#[derive(Debug, Serialize)]
pub(crate) struct Health {
    status: &'static str,
    message: &'static str,
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        message: "Todoist MCP Server is running",
    })
}

impl<C: TodoistApi + 'static> Server<C> {
    /// Router with the health endpoints and the MCP service at `/mcp`.
    ///
    /// Cancelling `ct` closes every open MCP session.
    pub fn router(&self, ct: CancellationToken) -> Router {
        Router::new()
            .route("/", get(health))
            .route("/health", get(health))
            .nest_service("/mcp", create_mcp_service(self.mcp_server(), ct))
            .layer(TraceLayer::new_for_http())
    }

    /// Serve HTTP on `listener` until `ct` is cancelled.
    ///
    /// After cancellation in-flight requests get `grace` to finish; whatever
    /// is still running then is dropped. MCP sessions live on their own
    /// token and are closed only once the listener has drained or the grace
    /// period is over.
    pub async fn serve_http(
        &self,
        listener: TcpListener,
        grace: Duration,
        ct: CancellationToken,
    ) -> ServerResult<()> {
        let addr = listener.local_addr()?;
        let sessions = CancellationToken::new();
        let app = self.router(sessions.clone());
        info!("MCP server listening on http://{}/mcp", addr);

        let shutdown = ct.clone();
        let server = axum::serve(listener, app)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .into_future();
        let mut server = pin!(server);

        let grace_expired = async {
            ct.cancelled().await;
            info!(?grace, "shutting down, waiting for in-flight requests");
            tokio::time::sleep(grace).await;
        };

        let outcome = tokio::select! {
            result = &mut server => result,
            _ = grace_expired => {
                warn!(?grace, "grace period expired, dropping open connections");
                Ok(())
            }
        };
        sessions.cancel();

        outcome?;
        info!("HTTP server stopped");
        Ok(())
    }
}
