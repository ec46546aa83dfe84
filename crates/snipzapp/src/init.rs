//! # Data Directory Resolution
//!
//! All snipz files live in one directory:
//!
//! ```text
//! <data dir>/
//! ├── scripts.json    # The catalog
//! ├── profile.env     # Settings (KEY=VALUE)
//! └── snipz.log       # Log output from the CLI
//! ```
//!
//! The directory is chosen in priority order:
//! 1. An explicit override (the CLI's `--data-dir`).
//! 2. The `SNIPZ_HOME` environment variable.
//! 3. The OS data directory for `com.snipz.snipz` (via the `directories` crate).

use crate::error::{Result, SnipzError};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub const HOME_ENV: &str = "SNIPZ_HOME";
pub const CATALOG_FILENAME: &str = "scripts.json";
pub const SETTINGS_FILENAME: &str = "profile.env";
pub const LOG_FILENAME: &str = "snipz.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnipzPaths {
    pub data_dir: PathBuf,
    pub catalog_file: PathBuf,
    pub settings_file: PathBuf,
    pub log_file: PathBuf,
}

impl SnipzPaths {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            catalog_file: data_dir.join(CATALOG_FILENAME),
            settings_file: data_dir.join(SETTINGS_FILENAME),
            log_file: data_dir.join(LOG_FILENAME),
            data_dir,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Resolve the data directory. Does not create it.
pub fn resolve(data_override: Option<PathBuf>) -> Result<SnipzPaths> {
    if let Some(dir) = data_override {
        return Ok(SnipzPaths::new(dir));
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(SnipzPaths::new(PathBuf::from(dir)));
    }
    let dirs = ProjectDirs::from("com", "snipz", "snipz").ok_or_else(|| {
        SnipzError::Store("Could not determine a data directory for snipz".to_string())
    })?;
    Ok(SnipzPaths::new(dirs.data_dir()))
}
