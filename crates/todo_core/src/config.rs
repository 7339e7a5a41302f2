//! Runtime configuration for front-ends embedding the todo core.
//!
//! # Responsibility
//! - Resolve where the durable slot database and log files live.
//! - Validate the log level before logging starts.
//!
//! # Invariants
//! - `data_dir` is absolute.
//! - `log_level` is one of the canonical level names.

use crate::logging::{default_log_level, normalize_level, LoggingError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DB_FILE_NAME: &str = "todos.sqlite3";
pub const LOG_DIR_NAME: &str = "logs";

#[derive(Debug)]
pub enum ConfigError {
    RelativeDataDir(PathBuf),
    Level(LoggingError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RelativeDataDir(dir) => {
                write!(f, "data_dir must be an absolute path, got `{}`", dir.display())
            }
            Self::Level(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::RelativeDataDir(_) => None,
            Self::Level(err) => Some(err),
        }
    }
}

/// Validated application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    data_dir: PathBuf,
    log_level: &'static str,
}

impl AppConfig {
    /// Builds a config; `log_level = None` falls back to `default_log_level()`.
    pub fn new(data_dir: impl Into<PathBuf>, log_level: Option<&str>) -> Result<Self, ConfigError> {
        let data_dir = data_dir.into();
        if !data_dir.is_absolute() {
            return Err(ConfigError::RelativeDataDir(data_dir));
        }
        let log_level = match log_level {
            Some(level) => normalize_level(level).map_err(ConfigError::Level)?,
            None => default_log_level(),
        };
        Ok(Self {
            data_dir,
            log_level,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_level(&self) -> &'static str {
        self.log_level
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }
}
