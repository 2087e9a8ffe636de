//! Tool implementations for the toolbox MCP server.

use crate::{
    ToolboxServer,
    config::Config,
    db,
    fs::{self, DEFAULT_MAX_BYTES},
    text::{self, DEFAULT_MAX_SENTENCES},
};
use rmcp::{
    handler::server::wrapper::Parameters,
    schemars::{self, JsonSchema},
    tool, tool_router,
};
use serde::Deserialize;

/// Parameters for echoing text.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct EchoParams {
    /// Text to echo back.
    pub text: String,
    /// Number of repetitions, clamped to 1..=10. Defaults to 1.
    pub repeat: Option<i64>,
}

/// Parameters for listing a directory.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListDirParams {
    /// Directory to list, relative to the server root. Defaults to ".".
    pub path: Option<String>,
}

/// Parameters for reading a file.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ReadFileParams {
    /// Path to the file, relative to the server root.
    pub path: String,
    /// Maximum number of characters returned. Defaults to 2000.
    pub max_bytes: Option<i64>,
}

/// Parameters for querying the example database.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct QueryDbParams {
    /// A SELECT statement.
    pub sql: String,
    /// Row cap appended when the statement has none, 1..=1000. Defaults to 100.
    pub limit: Option<i64>,
}

/// Parameters for summarizing text.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SummarizeParams {
    /// Text to summarize.
    pub text: String,
    /// Number of sentences to keep, at least 1. Defaults to 3.
    pub max_sentences: Option<i64>,
}

#[tool_router]
impl ToolboxServer {
    /// Create a new toolbox server.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            tool_router: Self::tool_router(),
        }
    }

    /// Health check.
    #[tool(description = "Simple health check. Returns \"pong\"")]
    async fn ping(&self) -> String {
        "pong".into()
    }

    /// Echo text back, bounded.
    #[tool(description = "Echo text back, repeated up to 10 times and capped at 2000 characters")]
    async fn echo(&self, Parameters(params): Parameters<EchoParams>) -> String {
        text::echo(&params.text, params.repeat.unwrap_or(1))
    }

    /// List a directory inside the server root.
    #[tool(
        description = "List directory contents (non-recursive) as a JSON array. Directories end with '/'"
    )]
    async fn list_dir(
        &self,
        Parameters(params): Parameters<ListDirParams>,
    ) -> Result<String, String> {
        let path = params.path.as_deref().unwrap_or(".");
        let entries = fs::list_dir(path, &self.config.root).await?.into_inner();
        serde_json::to_string(&entries).map_err(|e| e.to_string())
    }

    /// Read a small text file inside the server root.
    #[tool(description = "Read a text file, truncated to max_bytes characters")]
    async fn read_file(&self, Parameters(params): Parameters<ReadFileParams>) -> String {
        let max_bytes = params.max_bytes.unwrap_or(DEFAULT_MAX_BYTES);
        fs::read_file(&params.path, max_bytes, &self.config.root)
            .await
            .into_inner()
    }

    /// Run a read-only SELECT against the example database.
    #[tool(
        description = "Run a read-only SELECT query against the example SQLite database. Returns JSON with columns and rows"
    )]
    async fn query_db(
        &self,
        Parameters(params): Parameters<QueryDbParams>,
    ) -> Result<String, String> {
        let limit = params.limit.unwrap_or(db::DEFAULT_LIMIT);
        let result = db::query(&self.config.db_path, &params.sql, limit)
            .await
            .map_err(|e| e.to_string())?;
        serde_json::to_string(&result).map_err(|e| e.to_string())
    }

    /// Extractive summary by sentence splitting.
    #[tool(description = "Summarize text by keeping its first sentences (split on periods)")]
    async fn summarize(&self, Parameters(params): Parameters<SummarizeParams>) -> String {
        let max_sentences = params.max_sentences.unwrap_or(DEFAULT_MAX_SENTENCES);
        text::summarize(&params.text, max_sentences)
    }
}
