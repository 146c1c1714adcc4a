use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::AppConfig;

/// Config file looked up next to the memo collection
pub const CONFIG_FILE_NAME: &str = "memo.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

pub fn parse_config(text: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str(text)
}

/// Which config file applies: the explicit path if given, otherwise
/// `memo.toml` beside the memo file when one exists.
pub fn resolve_config_path(explicit: Option<&Path>, memo_file: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let dir = memo_file?.parent()?;
    let candidate = if dir.as_os_str().is_empty() {
        PathBuf::from(CONFIG_FILE_NAME)
    } else {
        dir.join(CONFIG_FILE_NAME)
    };
    candidate.is_file().then_some(candidate)
}

/// Load the applicable config, or defaults when there is none.
pub fn load_config(explicit: Option<&Path>, memo_file: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let Some(path) = resolve_config_path(explicit, memo_file) else {
        return Ok(AppConfig::default());
    };
    let text = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    parse_config(&text).map_err(|e| ConfigError::ParseError { path, source: e })
}
