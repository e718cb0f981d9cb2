//! Log setup. The TUI owns the terminal, so logs always go to a file.

use crate::error::{HolonetError, Result};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Default log location (~/.cache/holonet/holonet.log)
pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("holonet").join("holonet.log"))
}

/// Builds the level filter; `RUST_LOG` takes precedence over `verbose`
pub fn env_filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose { "holonet=debug" } else { "holonet=info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Installs the global subscriber writing to `path` (appending)
pub fn init(path: &Path, verbose: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| HolonetError::ConfigError(format!("Failed to initialise logging: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_path_file_name() {
        if let Some(path) = default_log_path() {
            assert!(path.ends_with("holonet/holonet.log"));
        }
    }

    #[test]
    fn test_init_creates_log_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("logs").join("holonet.log");
        // A global subscriber may already be installed by another test
        let _ = init(&path, true);
        assert!(path.exists());
    }
}
