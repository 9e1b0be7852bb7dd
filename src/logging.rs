//! Tracing setup
//!
//! The subscriber is installed once per process. The shell logs to stderr;
//! the terminal UI logs to a file so the alternate screen stays clean.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Mutex, Once};

use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{BookkeeperError, BookkeeperResult};

/// Environment variable holding a filter directive such as `bookkeeper=debug`
pub const LOG_ENV: &str = "BOOKKEEPER_LOG";

static TRACING_INIT: Once = Once::new();

/// Where log lines go
#[derive(Debug, Clone)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Build the filter from `BOOKKEEPER_LOG`, falling back to `default_directive`
pub fn build_filter(default_directive: &str) -> BookkeeperResult<EnvFilter> {
    match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(default_directive).map_err(|e| {
            BookkeeperError::Config(format!(
                "Invalid log level '{}': {}",
                default_directive, e
            ))
        }),
    }
}

/// Install the global subscriber; later calls are no-ops
pub fn init_tracing(target: LogTarget, default_directive: &str) -> BookkeeperResult<()> {
    let mut result = Ok(());
    TRACING_INIT.call_once(|| {
        result = install(target, default_directive);
    });
    result
}

fn install(target: LogTarget, default_directive: &str) -> BookkeeperResult<()> {
    let filter = build_filter(default_directive)?;

    let installed = match target {
        LogTarget::Stderr => fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| {
                    BookkeeperError::Io(format!(
                        "Failed to open log file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
            fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    installed.map_err(|e| BookkeeperError::Config(format!("Failed to install logger: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_accepts_level() {
        assert!(build_filter("debug").is_ok());
        assert!(build_filter("bookkeeper=trace,warn").is_ok());
    }

    #[test]
    fn test_build_filter_rejects_garbage() {
        if std::env::var(LOG_ENV).is_ok() {
            return;
        }
        let err = build_filter("bookkeeper=notalevel").unwrap_err();
        assert!(matches!(err, BookkeeperError::Config(_)));
    }
}
