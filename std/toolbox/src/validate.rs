//! Path confinement for the filesystem tools.
//!
//! Every path-taking tool must go through [`resolve_path`], which maps a
//! user-supplied string to a canonical path inside the configured root.

use std::{
    ffi::OsStr,
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Errors from path resolution.
#[derive(Error, Debug)]
pub enum ValidateError {
    /// The resolved path lies outside the root directory.
    #[error("path not allowed: {0}")]
    NotAllowed(PathBuf),
    /// The path contains a null byte.
    #[error("path contains null byte")]
    NullByte,
    /// An I/O error occurred during path resolution.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Resolve `path` against `root` and check that it stays inside it.
///
/// Steps:
/// 1. Reject paths containing null bytes
/// 2. Expand a leading `~` or `~/` to the home directory
/// 3. Anchor relative paths under `root`
/// 4. Canonicalize (resolves symlinks, `..`, etc.)
///    - Missing trailing components are applied lexically on top of the
///      longest prefix that exists, so `missing/..` is the directory itself
/// 5. Accept only `root` itself or a descendant of it
///
/// `root` must already be canonical.
pub fn resolve_path(path: &str, root: &Path) -> Result<PathBuf, ValidateError> {
    if path.contains('\0') {
        return Err(ValidateError::NullByte);
    }

    let expanded = expand_home(path);
    let anchored = if expanded.is_absolute() {
        expanded
    } else {
        root.join(expanded)
    };

    let canonical = canonicalize_lenient(&anchored)?;

    // Component-wise, so `/srv/rootx` is not inside `/srv/root`.
    if !canonical.starts_with(root) {
        return Err(ValidateError::NotAllowed(canonical));
    }

    Ok(canonical)
}

/// Canonicalize the longest existing prefix of `path`, then apply the
/// missing components lexically.
///
/// Failures other than "not found" (say, a file used as a directory) are
/// returned as is.
fn canonicalize_lenient(path: &Path) -> Result<PathBuf, ValidateError> {
    let mut existing = path.to_path_buf();
    let mut missing = Vec::new();
    loop {
        match existing.canonicalize() {
            Ok(mut resolved) => {
                for part in missing.iter().rev() {
                    if part == OsStr::new("..") {
                        resolved.pop();
                    } else {
                        resolved.push(part);
                    }
                }
                return Ok(resolved);
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let Some(last) = existing.components().next_back() else {
                    return Err(e.into());
                };
                missing.push(last.as_os_str().to_os_string());
                if !existing.pop() {
                    return Err(e.into());
                }
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Only the current user's home is expanded; `~name/...` stays a plain
/// relative path under the root.
fn expand_home(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some("") => "",
        Some(rest) if rest.starts_with('/') => &rest[1..],
        _ => return PathBuf::from(path),
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use crate::validate::{ValidateError, resolve_path};
    use std::fs;

    fn root() -> (tempfile::TempDir, std::path::PathBuf) {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().canonicalize().unwrap();
        (tmp, root)
    }

    #[test]
    fn accepts_root_itself() {
        let (_tmp, root) = root();
        assert_eq!(resolve_path(".", &root).unwrap(), root);
        assert_eq!(resolve_path("", &root).unwrap(), root);
        assert_eq!(resolve_path(root.to_str().unwrap(), &root).unwrap(), root);
    }

    #[test]
    fn accepts_existing_descendant() {
        let (_tmp, root) = root();
        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("sub/a.txt"), "a").unwrap();
        let resolved = resolve_path("sub/a.txt", &root).unwrap();
        assert_eq!(resolved, root.join("sub/a.txt"));
        let resolved = resolve_path("sub/../sub/a.txt", &root).unwrap();
        assert_eq!(resolved, root.join("sub/a.txt"));
    }

    #[test]
    fn rejects_absolute_path_outside_root() {
        let (_tmp, root) = root();
        let result = resolve_path("/etc/passwd", &root);
        assert!(matches!(result, Err(ValidateError::NotAllowed(_))));
    }

    #[test]
    fn rejects_parent_traversal() {
        let (_tmp, root) = root();
        assert!(resolve_path("../../secret", &root).is_err());
        assert!(resolve_path("..", &root).is_err());
    }

    #[test]
    fn rejects_sibling_with_shared_prefix() {
        let parent = tempfile::tempdir().unwrap();
        let base = parent.path().canonicalize().unwrap();
        fs::create_dir(base.join("root")).unwrap();
        fs::create_dir(base.join("rootx")).unwrap();
        let root = base.join("root");
        let sibling = base.join("rootx");
        assert!(resolve_path(sibling.to_str().unwrap(), &root).is_err());
    }

    #[test]
    fn rejects_null_byte() {
        let (_tmp, root) = root();
        let result = resolve_path("foo\0bar", &root);
        assert!(matches!(result, Err(ValidateError::NullByte)));
    }

    #[test]
    fn resolves_missing_file_inside_root() {
        let (_tmp, root) = root();
        let resolved = resolve_path("not_there.txt", &root).unwrap();
        assert_eq!(resolved, root.join("not_there.txt"));
    }

    #[test]
    fn resolves_missing_components_lexically() {
        let (_tmp, root) = root();
        assert_eq!(
            resolve_path("no/such/file", &root).unwrap(),
            root.join("no/such/file")
        );
        assert_eq!(resolve_path("missing_dir/..", &root).unwrap(), root);
        assert!(matches!(
            resolve_path("missing_dir/../../x", &root),
            Err(ValidateError::NotAllowed(_))
        ));
    }

    #[test]
    fn file_used_as_directory_is_rejected() {
        let (_tmp, root) = root();
        fs::write(root.join("file.txt"), "x").unwrap();
        assert!(matches!(
            resolve_path("file.txt/child", &root),
            Err(ValidateError::Io(_))
        ));
    }

    #[test]
    fn named_home_is_not_expanded() {
        let (_tmp, root) = root();
        assert_eq!(resolve_path("~alice/x", &root).unwrap(), root.join("~alice/x"));
    }

    #[cfg(unix)]
    #[test]
    fn rejects_symlink_escaping_root() {
        let (_tmp, root) = root();
        let outside = tempfile::tempdir().unwrap();
        fs::write(outside.path().join("secret"), "s").unwrap();
        std::os::unix::fs::symlink(outside.path(), root.join("link")).unwrap();
        assert!(resolve_path("link/secret", &root).is_err());
    }

    #[test]
    fn home_shorthand_outside_root_is_rejected() {
        let (_tmp, root) = root();
        if let Some(home) = dirs::home_dir() {
            if !home.starts_with(&root) {
                assert!(resolve_path("~", &root).is_err());
            }
        }
    }
}
