use rmcp::{
    RoleClient, ServiceExt,
    model::{CallToolRequestParams, CallToolResult, JsonObject},
    service::RunningService,
    transport::StreamableHttpClientTransport,
};
use serde_json::json;
use std::borrow::Cow;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use toolbox_mcp::{Config, http};

async fn call(
    client: &RunningService<RoleClient, ()>,
    name: &'static str,
    arguments: serde_json::Value,
) -> CallToolResult {
    let arguments: JsonObject = serde_json::from_value(arguments).unwrap();
    client
        .peer()
        .call_tool(CallToolRequestParams {
            meta: None,
            name: Cow::Borrowed(name),
            arguments: Some(arguments),
            task: None,
        })
        .await
        .unwrap()
}

fn text(result: &CallToolResult) -> String {
    result.content[0].as_text().unwrap().text.clone()
}

#[tokio::test]
async fn serves_tools_over_streamable_http() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("notes.txt"), "hello from disk").unwrap();
    let config = Config::new(tmp.path()).unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = CancellationToken::new();
    let server = tokio::spawn(http::serve(config.clone(), listener, shutdown.clone()));

    let transport = StreamableHttpClientTransport::from_uri(format!("http://{addr}/mcp"));
    let client = ().serve(transport).await.unwrap();

    let tools = client.peer().list_all_tools().await.unwrap();
    assert_eq!(tools.len(), 6);

    let result = call(&client, "ping", json!({})).await;
    assert_eq!(text(&result), "pong");

    let result = call(&client, "read_file", json!({ "path": "notes.txt", "max_bytes": 5 })).await;
    assert_eq!(text(&result), "hello");

    let result = call(&client, "summarize", json!({ "text": "A. B. C. D.", "max_sentences": 2 })).await;
    assert_eq!(text(&result), "A. B.");

    let result = call(&client, "query_db", json!({ "sql": "SELECT count(*) AS n FROM users" })).await;
    assert_ne!(result.is_error, Some(true));
    let value: serde_json::Value = serde_json::from_str(&text(&result)).unwrap();
    assert_eq!(value, json!({ "columns": ["n"], "rows": [[4]] }));

    let result = call(&client, "query_db", json!({ "sql": "DROP TABLE users" })).await;
    assert_eq!(result.is_error, Some(true));

    client.cancel().await.ok();
    shutdown.cancel();
    server.await.unwrap().unwrap();
    assert!(config.db_path.exists());
}
