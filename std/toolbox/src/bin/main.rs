//! Binary entry point for the toolbox-mcp server.

use anyhow::Context;
use clap::Parser;
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;
use toolbox_mcp::{
    Config,
    config::{DEFAULT_BIND, parse_loopback},
    http,
};
use tracing_subscriber::EnvFilter;

/// Toolbox MCP Server: bounded tools confined to the working directory.
#[derive(Parser)]
#[command(name = "toolbox-mcp", version, about)]
struct Cli {
    /// Loopback address to listen on.
    #[arg(long, default_value_t = DEFAULT_BIND, value_parser = parse_loopback)]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_current_dir()
        .context("failed to resolve working directory")?
        .with_bind(cli.bind);
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                shutdown.cancel();
            }
        }
    });

    http::serve(config, listener, shutdown).await
}
