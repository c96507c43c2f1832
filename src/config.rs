//! Configuration for the `tm` binary.
//!
//! Resolution order for the task file: explicit path (CLI flag or the
//! `TASKMAN_FILE` env var, both handled by clap) > `data_file` in the YAML
//! config > `tasks.json` in the current directory.

use crate::storage::DEFAULT_FILE;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application directory name under the platform config/data dirs.
pub const APP_DIR: &str = "taskman";

/// Config file name.
const CONFIG_FILE: &str = "config.yaml";

/// Log file name.
const LOG_FILE: &str = "taskman.log";

/// Contents of `config.yaml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Backing task file
    pub data_file: Option<PathBuf>,

    /// Directory for `taskman.log`
    pub log_dir: Option<PathBuf>,
}

impl Config {
    /// Default location: `<config_dir>/taskman/config.yaml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load a config file. A missing file is an empty config; a malformed
    /// one is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read config file {}", path.display()))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content).with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Load `path` if given, else the default location (if any).
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => match Self::default_path() {
                Some(p) => Self::load(&p),
                None => Ok(Self::default()),
            },
        }
    }

    /// Pick the task file, preferring an explicit override.
    pub fn data_file(&self, explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.data_file.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE))
    }

    /// Log file path: `<log_dir>/taskman.log`, defaulting to
    /// `<data_local_dir>/taskman/logs`.
    pub fn log_file(&self) -> PathBuf {
        let dir = self.log_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR)
                .join("logs")
        });
        dir.join(LOG_FILE)
    }
}
