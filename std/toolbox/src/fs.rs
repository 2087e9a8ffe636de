//! Filesystem tools: `list_dir` and `read_file`.

use crate::{outcome::Outcome, text::truncate_chars, validate::resolve_path};
use std::{io, path::Path};
use tokio::io::AsyncReadExt;

/// Default `read_file` output cap, in characters.
pub const DEFAULT_MAX_BYTES: i64 = 2000;

/// List the entries of a directory inside `root`, non-recursively.
///
/// Directory names get a trailing `/`. Entries are sorted by name.
pub async fn list_dir(path: &str, root: &Path) -> Result<Outcome<Vec<String>>, String> {
    let path = match resolve_path(path, root) {
        Ok(path) => path,
        Err(e) => {
            tracing::debug!(%e, "list_dir rejected");
            return Ok(Outcome::Rejected(e.to_string()));
        }
    };
    if !tokio::fs::metadata(&path).await.is_ok_and(|m| m.is_dir()) {
        return Ok(Outcome::Empty);
    }

    let mut entries = Vec::new();
    let mut read_dir = tokio::fs::read_dir(&path)
        .await
        .map_err(|e| e.to_string())?;
    while let Some(entry) = read_dir.next_entry().await.map_err(|e| e.to_string())? {
        let name = entry.file_name().to_string_lossy().into_owned();
        // Follows symlinks, so a link to a directory is listed as one.
        let is_dir = tokio::fs::metadata(entry.path())
            .await
            .is_ok_and(|m| m.is_dir());
        if is_dir {
            entries.push(format!("{name}/"));
        } else {
            entries.push(name);
        }
    }
    entries.sort();
    Ok(Outcome::Success(entries))
}

/// Read a text file inside `root`, cut to `max_bytes` characters.
///
/// Invalid UTF-8 is replaced rather than rejected. Read failures other than
/// "missing" come back as an `ERROR: ...` string.
pub async fn read_file(path: &str, max_bytes: i64, root: &Path) -> Outcome<String> {
    let path = match resolve_path(path, root) {
        Ok(path) => path,
        Err(e) => {
            tracing::debug!(%e, "read_file rejected");
            return Outcome::Rejected(e.to_string());
        }
    };
    if !tokio::fs::metadata(&path).await.is_ok_and(|m| m.is_file()) {
        return Outcome::Empty;
    }

    let max = usize::try_from(max_bytes).unwrap_or(0);
    Outcome::Success(read_text(&path, max).await)
}

async fn read_text(path: &Path, max_chars: usize) -> String {
    match read_prefix(path, max_chars).await {
        Ok(bytes) => {
            let text = String::from_utf8_lossy(&bytes).into_owned();
            truncate_chars(text, max_chars)
        }
        Err(e) => format!("ERROR: {e}"),
    }
}

/// Read no more bytes than `max_chars` UTF-8 characters can occupy.
async fn read_prefix(path: &Path, max_chars: usize) -> io::Result<Vec<u8>> {
    let file = tokio::fs::File::open(path).await?;
    let cap = u64::try_from(max_chars)
        .unwrap_or(u64::MAX)
        .saturating_mul(4);
    let mut bytes = Vec::new();
    file.take(cap).read_to_end(&mut bytes).await?;
    Ok(bytes)
}
