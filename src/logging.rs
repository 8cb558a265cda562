//! File-backed tracing setup.
//!
//! The TUI owns stdout, so log output goes to `ClientConfig::log_path()`.
//! The filter comes from `BLOGHUB_LOG` (same syntax as `RUST_LOG`) and
//! defaults to `info`.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ClientConfig;

/// Environment variable holding the log filter.
pub const ENV_LOG: &str = "BLOGHUB_LOG";

const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to open log file {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(#[from] tracing_subscriber::util::TryInitError),
}

/// Build the filter from a directive string, falling back to `info` when it
/// is missing or does not parse.
pub fn filter_from(directive: Option<&str>) -> EnvFilter {
    directive
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Returns the log file path.
pub fn init(config: &ClientConfig) -> Result<PathBuf, LoggingError> {
    let path = config.log_path();
    let open_error = |source| LoggingError::Open {
        path: path.clone(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(open_error)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(open_error)?;

    let directive = std::env::var(ENV_LOG).ok();
    tracing_subscriber::registry()
        .with(filter_from(directive.as_deref()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_defaults_to_info() {
        assert_eq!(filter_from(None).to_string(), "info");
        assert_eq!(filter_from(Some("  ")).to_string(), "info");
    }

    #[test]
    fn test_filter_uses_directive() {
        assert_eq!(filter_from(Some("bloghub=debug")).to_string(), "bloghub=debug");
    }

    #[test]
    fn test_invalid_directive_falls_back() {
        assert_eq!(filter_from(Some("bloghub=notalevel")).to_string(), "info");
    }

    #[test]
    fn test_init_rejects_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        let config = ClientConfig::new().with_log_file(blocker.join("nested.log"));
        assert!(matches!(init(&config), Err(LoggingError::Open { .. })));
    }
}
