use std::fs;
use std::path::PathBuf;

use tracing::{error, info};

pub const DEFAULT_BASE_DIR: &str = "file-to-extract";
pub const DEFAULT_PORT: u16 = 45452;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    Stdio,
    Http,
    StreamableHttp,
}

impl TransportMode {
    /// Path the JSON-RPC message endpoint is mounted at in HTTP modes.
    pub fn message_path(self) -> &'static str {
        match self {
            TransportMode::StreamableHttp => "/message",
            _ => "/",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub base_dir: PathBuf,
    pub mode: TransportMode,
    pub port: u16,
}

impl ServerConfig {
    pub fn new(base_dir: impl Into<PathBuf>, mode: TransportMode, port: u16) -> Self {
        ServerConfig {
            base_dir: base_dir.into(),
            mode,
            port,
        }
    }

    /// Create the base directory if absent. Failure is not fatal: the server
    /// still starts and every extraction then reports NotFound.
    pub fn ensure_base_dir(&self) {
        if self.base_dir.exists() {
            return;
        }
        match fs::create_dir_all(&self.base_dir) {
            Ok(()) => info!(dir = %self.base_dir.display(), "created base directory"),
            Err(e) => {
                error!(dir = %self.base_dir.display(), error = %e, "failed to create base directory")
            }
        }
    }
}
