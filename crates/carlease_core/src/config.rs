//! Environment-driven configuration for opening the store.
//!
//! | Variable | Default |
//! |---|---|
//! | `CARLEASE_DB_PATH` | `<temp dir>/carlease.sqlite3` |
//! | `CARLEASE_LOG_LEVEL` | `debug` (debug builds) / `info` (release) |
//! | `CARLEASE_LOG_DIR` | unset: logging stays off |
//!
//! Blank values count as unset.

use crate::db::{open_db, DbResult};
use crate::logging::{default_log_level, init_logging, LoggingError};
use rusqlite::Connection;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "CARLEASE_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "CARLEASE_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "CARLEASE_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "carlease.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl StoreConfig {
    /// Reads the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|trimmed| !trimmed.is_empty())
        };

        let defaults = Self::default();
        Self {
            db_path: value(DB_PATH_ENV).map_or(defaults.db_path, PathBuf::from),
            log_level: value(LOG_LEVEL_ENV).unwrap_or(defaults.log_level),
            log_dir: value(LOG_DIR_ENV).map(PathBuf::from),
        }
    }

    /// Opens and migrates the configured database file.
    pub fn open(&self) -> DbResult<Connection> {
        open_db(&self.db_path)
    }

    /// Starts file logging when a log directory is configured.
    ///
    /// Returns `Ok(false)` when logging is left off.
    pub fn init_logging(&self) -> Result<bool, LoggingError> {
        match &self.log_dir {
            Some(dir) => init_logging(&self.log_level, dir).map(|()| true),
            None => Ok(false),
        }
    }
}
