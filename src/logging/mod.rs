//! Logging handle construction
//!
//! The library only emits `tracing` events. The process entry point builds a
//! [`Dispatch`] here and decides how long it stays installed.

use crate::types::MirrorError;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing::Dispatch;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "treemirror=info";
const DEBUG_LOG_FILTER: &str = "treemirror=debug";

/// Where and how verbosely to log.
#[derive(Debug, Clone, Copy)]
pub struct LogConfig<'a> {
    /// Log file, truncated on open. `None` logs to standard output.
    pub log_file: Option<&'a Path>,
    pub debug: bool,
}

/// Build a logging dispatcher for `config`
///
/// `RUST_LOG` overrides the level chosen by `debug`.
pub fn build_dispatch(config: LogConfig<'_>) -> Result<Dispatch, MirrorError> {
    let default_filter = if config.debug {
        DEBUG_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let registry = tracing_subscriber::registry().with(filter);

    let dispatch = match config.log_file {
        Some(path) => {
            let file = File::create(path).map_err(|e| MirrorError::from_io(path, e))?;
            Dispatch::new(
                registry.with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false)
                        .with_target(false),
                ),
            )
        }
        None => Dispatch::new(
            registry.with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stdout)
                    .with_target(false),
            ),
        ),
    };

    Ok(dispatch)
}

/// Build a dispatcher and install it for the rest of the process
pub fn init(config: LogConfig<'_>) -> Result<(), MirrorError> {
    let dispatch = build_dispatch(config)?;
    tracing::dispatcher::set_global_default(dispatch)
        .map_err(|e| MirrorError::Config(format!("Failed to install logger: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_file_logging_writes_info_lines() {
        let temp = TempDir::new().expect("create temp dir");
        let log_path = temp.path().join("sync.log");

        let dispatch = build_dispatch(LogConfig {
            log_file: Some(&log_path),
            debug: false,
        })
        .expect("dispatch should build");

        tracing::dispatcher::with_default(&dispatch, || {
            tracing::info!("Created file a.txt");
            tracing::debug!("Syncing...");
        });

        let contents = fs::read_to_string(&log_path).expect("read log file");
        assert!(contents.contains("INFO"));
        assert!(contents.contains("Created file a.txt"));
        assert!(!contents.contains("Syncing..."));
        assert!(!contents.contains('\u{1b}'), "file output must not contain ANSI escapes");
    }

    #[test]
    fn test_debug_flag_enables_debug_lines() {
        let temp = TempDir::new().expect("create temp dir");
        let log_path = temp.path().join("debug.log");

        let dispatch = build_dispatch(LogConfig {
            log_file: Some(&log_path),
            debug: true,
        })
        .expect("dispatch should build");

        tracing::dispatcher::with_default(&dispatch, || {
            tracing::debug!("Syncing...");
        });

        let contents = fs::read_to_string(&log_path).expect("read log file");
        assert!(contents.contains("DEBUG"));
        assert!(contents.contains("Syncing..."));
    }

    #[test]
    fn test_unwritable_log_path_is_an_error() {
        let temp = TempDir::new().expect("create temp dir");
        let log_path = temp.path().join("missing-dir/sync.log");

        let result = build_dispatch(LogConfig {
            log_file: Some(&log_path),
            debug: false,
        });
        assert!(matches!(result, Err(MirrorError::NotFound { .. })));
    }
}
