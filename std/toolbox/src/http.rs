//! Streamable HTTP transport for the toolbox server.

use crate::{Config, ToolboxServer, db};
use anyhow::Context;
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

/// Route the MCP endpoint is mounted on.
pub const MCP_PATH: &str = "/mcp";

/// Build the axum router serving MCP at [`MCP_PATH`].
///
/// Each session gets its own [`ToolboxServer`] over a clone of `config`.
/// Open event streams end when `shutdown` is cancelled.
pub fn router(config: Config, shutdown: CancellationToken) -> axum::Router {
    let service = StreamableHttpService::new(
        move || Ok(ToolboxServer::new(config.clone())),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig {
            cancellation_token: shutdown,
            ..Default::default()
        },
    );
    axum::Router::new().nest_service(MCP_PATH, service)
}

/// Seed the example store, then serve on `listener` until `shutdown` fires.
pub async fn serve(
    config: Config,
    listener: TcpListener,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    db::ensure_db(&config.db_path)
        .await
        .with_context(|| format!("failed to initialize {}", config.db_path.display()))?;

    let addr = listener.local_addr()?;
    tracing::info!(root = %config.root.display(), "starting MCP server on http://{addr}{MCP_PATH}");

    let app = router(config, shutdown.child_token());
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .context("server error")?;

    tracing::info!("shutting down");
    Ok(())
}
