//! Server configuration.

use std::{
    io,
    net::{Ipv4Addr, SocketAddr, SocketAddrV4},
    path::{Path, PathBuf},
};

/// File name of the example SQLite store, relative to the root directory.
pub const DB_FILE: &str = "mcp_example.db";

/// Default listen address of the HTTP transport.
pub const DEFAULT_BIND: SocketAddr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 3333));

/// Parse a listen address, refusing anything but loopback.
pub fn parse_loopback(s: &str) -> Result<SocketAddr, String> {
    let addr: SocketAddr = s.parse().map_err(|e| format!("{s}: {e}"))?;
    if !addr.ip().is_loopback() {
        return Err(format!("{addr} is not a loopback address"));
    }
    Ok(addr)
}

/// Paths and addresses shared by every component of the server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Canonical directory that all path-taking tools are confined to.
    pub root: PathBuf,
    /// Location of the example SQLite store.
    pub db_path: PathBuf,
    /// Address the HTTP transport listens on.
    pub bind: SocketAddr,
}

impl Config {
    /// Build a configuration rooted at `root`.
    ///
    /// The root is canonicalized here, so it must already exist.
    pub fn new(root: impl AsRef<Path>) -> io::Result<Self> {
        let root = root.as_ref().canonicalize()?;
        let db_path = root.join(DB_FILE);
        Ok(Self {
            root,
            db_path,
            bind: DEFAULT_BIND,
        })
    }

    /// Build a configuration rooted at the process working directory.
    pub fn from_current_dir() -> io::Result<Self> {
        Self::new(std::env::current_dir()?)
    }

    /// Override the listen address.
    pub fn with_bind(mut self, bind: SocketAddr) -> Self {
        self.bind = bind;
        self
    }
}
