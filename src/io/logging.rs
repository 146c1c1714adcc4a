use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use crate::model::config::LogConfig;

/// Where log records go. The TUI owns the terminal, so it logs to a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("could not open log file {path}: {source}")]
    OpenError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("logger already initialized: {0}")]
    AlreadyInitialized(#[from] log::SetLoggerError),
}

/// Log file used by the TUI when `[log] file` is not set
pub fn default_log_file() -> PathBuf {
    std::env::temp_dir().join("memo.log")
}

/// Target for the TUI: the configured file or the default one
pub fn tui_target(config: &LogConfig) -> LogTarget {
    LogTarget::File(config.file.clone().unwrap_or_else(default_log_file))
}

/// `RUST_LOG` wins over the configured level
fn filter_string(config: &LogConfig) -> String {
    std::env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| config.level.clone())
}

fn open_append(path: &Path) -> Result<std::fs::File, LogError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LogError::OpenError {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Install the global logger.
pub fn init(config: &LogConfig, target: &LogTarget) -> Result<(), LogError> {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(&filter_string(config));
    builder.format_timestamp_secs();
    match target {
        LogTarget::Stderr => {
            builder.target(env_logger::Target::Stderr);
        }
        LogTarget::File(path) => {
            let file = open_append(path)?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
    }
    builder.try_init()?;
    Ok(())
}
