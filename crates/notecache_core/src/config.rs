//! Runtime configuration resolved from the environment.
//!
//! # Responsibility
//! - Resolve database location and logging settings for the process.
//!
//! # Invariants
//! - Unset or blank variables fall back to `defaults`.
//! - Resolution never touches the file system.

use crate::logging::default_log_level;
use crate::store::sqlite_store::StoreLocation;
use std::path::PathBuf;

/// Environment variable names.
pub mod env_vars {
    /// SQLite file path, or `:memory:` for a throwaway database.
    pub const DB_PATH: &str = "NOTECACHE_DB_PATH";
    /// One of `trace|debug|info|warn|error`.
    pub const LOG_LEVEL: &str = "NOTECACHE_LOG_LEVEL";
    /// Absolute directory for rolling log files. Logging is off when unset.
    pub const LOG_DIR: &str = "NOTECACHE_LOG_DIR";
}

/// Default values.
pub mod defaults {
    pub const DB_PATH: &str = "notecache.sqlite3";
    pub const MEMORY_DB_PATH: &str = ":memory:";
}

/// Process-level settings for the note store and logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(defaults::DB_PATH),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|trimmed| !trimmed.is_empty())
        };

        let defaults = Self::default();
        Self {
            db_path: value(env_vars::DB_PATH)
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            log_level: value(env_vars::LOG_LEVEL).unwrap_or(defaults.log_level),
            log_dir: value(env_vars::LOG_DIR).map(PathBuf::from),
        }
    }

    /// Maps `db_path` to a store location; `:memory:` selects an in-memory db.
    pub fn store_location(&self) -> StoreLocation {
        if self.db_path.as_os_str() == defaults::MEMORY_DB_PATH {
            StoreLocation::Memory
        } else {
            StoreLocation::File(self.db_path.clone())
        }
    }
}
