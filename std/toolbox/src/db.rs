//! Example SQLite store: one-time seeding and read-only queries.

use serde::Serialize;
use serde_json::Value;
use sqlx::{
    Column, Connection, Row, TypeInfo, ValueRef,
    sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow},
};
use std::path::Path;
use thiserror::Error;

/// Default row cap appended to queries.
pub const DEFAULT_LIMIT: i64 = 100;
/// Largest accepted row cap.
pub const MAX_LIMIT: i64 = 1000;

const SEED_USERS: [(&str, i64); 4] = [("alice", 5), ("bob", 3), ("carol", 12), ("dave", 0)];

/// Errors from the example store.
#[derive(Error, Debug)]
pub enum DbError {
    /// The statement is not a SELECT.
    #[error("Only SELECT queries are allowed.")]
    NotSelect,
    /// The text holds more than one statement.
    #[error("You can only execute one statement at a time.")]
    MultipleStatements,
    /// The storage engine failed.
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Rows of a query, positionally aligned with `columns`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    /// Column names in result order.
    pub columns: Vec<String>,
    /// One entry per row, each with exactly `columns.len()` values.
    pub rows: Vec<Vec<Value>>,
}

/// Create and seed the `users` table unless the store already exists.
///
/// Returns `true` if the store was created.
pub async fn ensure_db(path: &Path) -> Result<bool, DbError> {
    if tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Ok(false);
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let mut conn = SqliteConnection::connect_with(&options).await?;
    let mut tx = conn.begin().await?;
    sqlx::query("CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT, message_count INTEGER)")
        .execute(&mut *tx)
        .await?;
    for (name, message_count) in SEED_USERS {
        sqlx::query("INSERT INTO users (name, message_count) VALUES (?, ?)")
            .bind(name)
            .bind(message_count)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    conn.close().await?;

    tracing::info!(path = %path.display(), "created example database");
    Ok(true)
}

/// Run a SELECT against the store at `path`.
///
/// Opens a fresh read-only connection per call.
pub async fn query(path: &Path, sql: &str, limit: i64) -> Result<QueryResult, DbError> {
    let sql = bound_statement(sql, limit)?;

    let mut conn = open_read_only(path).await?;
    let rows = sqlx::query(&sql).fetch_all(&mut conn).await;
    conn.close().await?;
    let rows = rows?;

    let columns: Vec<String> = rows
        .first()
        .map(|row| row.columns().iter().map(|c| c.name().to_string()).collect())
        .unwrap_or_default();
    let rows = rows
        .iter()
        .map(|row| {
            (0..columns.len())
                .map(|i| convert_cell(row, i))
                .collect::<Vec<_>>()
        })
        .collect();
    Ok(QueryResult { columns, rows })
}

async fn open_read_only(path: &Path) -> Result<SqliteConnection, sqlx::Error> {
    let options = SqliteConnectOptions::new().filename(path).read_only(true);
    SqliteConnection::connect_with(&options).await
}

/// Check that `sql` is a single SELECT and cap it with a LIMIT clause.
///
/// Trailing `;` are dropped. Any other `;` counts as a statement separator,
/// even inside a string literal, and the text is refused.
///
/// The presence check is a plain substring search for `limit`, so a
/// statement that merely mentions it (say, a `limit_reached` column) is left
/// uncapped. Out-of-range limits fall back to [`DEFAULT_LIMIT`].
pub fn bound_statement(sql: &str, limit: i64) -> Result<String, DbError> {
    let sql = sql.trim();
    let lower = sql.to_lowercase();
    if !lower.starts_with("select") {
        return Err(DbError::NotSelect);
    }
    let body = sql.trim_end_matches(|c: char| c == ';' || c.is_whitespace());
    if body.contains(';') {
        return Err(DbError::MultipleStatements);
    }
    if lower.contains("limit") {
        return Ok(sql.to_string());
    }
    let limit = if (1..=MAX_LIMIT).contains(&limit) {
        limit
    } else {
        DEFAULT_LIMIT
    };
    tracing::debug!(limit, "appending limit clause");
    Ok(format!("{body} LIMIT {limit}"))
}

/// Map one SQLite cell to JSON by its storage class.
fn convert_cell(row: &SqliteRow, index: usize) -> Value {
    let type_name = match row.try_get_raw(index) {
        Ok(raw) if raw.is_null() => return Value::Null,
        Ok(raw) => raw.type_info().name().to_string(),
        Err(_) => return Value::Null,
    };

    match type_name.as_str() {
        "INTEGER" => row.try_get::<i64, _>(index).map(Value::from),
        "REAL" => row.try_get::<f64, _>(index).map(Value::from),
        "BLOB" => row
            .try_get::<Vec<u8>, _>(index)
            .map(|b| Value::String(String::from_utf8_lossy(&b).into_owned())),
        _ => row.try_get::<String, _>(index).map(Value::String),
    }
    .unwrap_or(Value::Null)
}
