//! Runtime settings derived from the working directory and build mode.

use std::io;
use std::path::{Path, PathBuf};
use userdb_core::default_log_level;

const DB_FILE_NAME: &str = "users.db";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    /// Absolute; required by the logging backend.
    pub log_dir: PathBuf,
}

impl AppConfig {
    pub fn from_current_dir() -> io::Result<Self> {
        let cwd = std::env::current_dir()?;
        Ok(Self::in_dir(&cwd))
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self {
            db_path: dir.join(DB_FILE_NAME),
            log_level: default_log_level(),
            log_dir: dir.join(LOG_DIR_NAME),
        }
    }
}
