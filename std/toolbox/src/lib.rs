//! MCP server providing a small set of bounded tools.
//!
//! Six tools are exposed: `ping`, `echo`, `list_dir`, `read_file`,
//! `query_db`, and `summarize`. File access is confined to the configured
//! root directory, and `query_db` runs read-only SELECTs against an example
//! SQLite store that is seeded on first start.

use rmcp::{
    ServerHandler,
    handler::server::router::tool::ToolRouter,
    model::{Implementation, ServerCapabilities, ServerInfo},
    tool_handler,
};

pub mod config;
pub mod db;
pub mod fs;
pub mod http;
pub mod outcome;
pub mod text;
pub mod tools;
pub mod validate;

pub use config::Config;

/// MCP toolbox server.
#[derive(Debug, Clone)]
pub struct ToolboxServer {
    pub(crate) config: Config,
    pub(crate) tool_router: ToolRouter<Self>,
}

#[tool_handler]
impl ServerHandler for ToolboxServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "toolbox-mcp".into(),
                title: Some("Toolbox MCP Server".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "Toolbox server providing health check, echo, sandboxed file access, \
                 read-only SQL over an example database, and text summarization."
                    .into(),
            ),
        }
    }
}
