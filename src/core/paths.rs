//! Centralized path helpers for cache directories.

use std::path::PathBuf;

use crate::core::app;

/// Project directories from the standard platform locations.
pub fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("io", app::VENDOR, app::NAME)
}

/// Cache directory (~/.cache/eqx-chat/). Holds the TUI log file.
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|d| d.cache_dir().to_path_buf())
}

/// Log file used in TUI mode, creating the cache directory if needed.
pub fn log_file() -> Option<PathBuf> {
    let dir = cache_dir()?;
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir.join(format!("{}.log", app::NAME)))
}
