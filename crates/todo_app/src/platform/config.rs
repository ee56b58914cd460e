//! Client configuration, read from a RON file.
//!
//! A missing file is not an error: every field has a default, and fields
//! absent from the file keep theirs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use todo_engine::ApiSettings;
use todo_logging::LevelFilter;

const CONFIG_FILENAME: &str = "todo_client.ron";
const CONFIG_ENV: &str = "TODO_CLIENT_CONFIG";

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ClientConfig {
    pub base_url: String,
    pub user: String,
    /// Exposes the per-row delete key and marker.
    pub show_row_delete: bool,
    pub log_file: PathBuf,
    pub log_level: String,
    /// Unset means requests may hang indefinitely.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let api = ApiSettings::default();
        Self {
            base_url: api.base_url,
            user: api.user,
            show_row_delete: false,
            log_file: PathBuf::from("todo_client.log"),
            log_level: "info".to_string(),
            request_timeout_secs: None,
        }
    }
}

impl ClientConfig {
    pub fn api_settings(&self) -> ApiSettings {
        let timeout = self.request_timeout_secs.map(Duration::from_secs);
        ApiSettings {
            base_url: self.base_url.clone(),
            user: self.user.clone(),
            connect_timeout: timeout,
            request_timeout: timeout,
        }
    }

    /// Unknown level names fall back to `info`.
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}

/// `$TODO_CLIENT_CONFIG`, or `todo_client.ron` in the working directory.
pub(crate) fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME))
}

pub(crate) fn load(path: &Path) -> Result<ClientConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Ok(ClientConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
