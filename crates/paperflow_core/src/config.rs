//! Runtime configuration resolved from the environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `PAPERFLOW_LOG_LEVEL` | `default_log_level()` |
//! | `PAPERFLOW_LOG_DIR` | `<temp>/paperflow-logs` |
//! | `PAPERFLOW_DATA_FILE` | `<temp>/paperflow_tracks.txt` |
//!
//! Blank values count as unset. Level values are validated by
//! `init_logging`, not here.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const ENV_LOG_LEVEL: &str = "PAPERFLOW_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "PAPERFLOW_LOG_DIR";
pub const ENV_DATA_FILE: &str = "PAPERFLOW_DATA_FILE";

const DEFAULT_LOG_DIR_NAME: &str = "paperflow-logs";
const DEFAULT_DATA_FILE_NAME: &str = "paperflow_tracks.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewConfig {
    pub log_level: String,
    pub log_dir: PathBuf,
    pub data_file: PathBuf,
}

impl ReviewConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through `lookup`, so tests never touch the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|trimmed| !trimmed.is_empty())
        };

        Self {
            log_level: value(ENV_LOG_LEVEL).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: value(ENV_LOG_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME)),
            data_file: value(ENV_DATA_FILE)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DATA_FILE_NAME)),
        }
    }
}
