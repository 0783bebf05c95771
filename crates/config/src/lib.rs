//! Configuration helpers for Threadline
//!
//! Locates the Threadline config directory (`~/.config/threadline/`), which
//! can be redirected with the `THREADLINE_CONFIG_DIR` environment variable,
//! and loads JSON settings files from it.
//!
//! Call [`init`] at application startup to bootstrap the config directory.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the config directory location
pub const CONFIG_DIR_ENV: &str = "THREADLINE_CONFIG_DIR";

const APP_DIR_NAME: &str = "threadline";

/// Initialize the Threadline config directory.
///
/// Creates the directory if it doesn't exist and returns its path.
pub fn init() -> Result<PathBuf> {
    ensure_config_dir()
}

/// Get the Threadline config directory
pub fn config_dir() -> Option<PathBuf> {
    resolve_config_dir(std::env::var_os(CONFIG_DIR_ENV).map(PathBuf::from))
}

fn resolve_config_dir(override_dir: Option<PathBuf>) -> Option<PathBuf> {
    match override_dir {
        Some(dir) if !dir.as_os_str().is_empty() => Some(dir),
        _ => dirs::config_dir().map(|p| p.join(APP_DIR_NAME)),
    }
}

/// Get the path to a file within the config directory
pub fn config_path(filename: &str) -> Option<PathBuf> {
    config_dir().map(|p| p.join(filename))
}

/// Check if a file exists in the config directory
pub fn config_exists(filename: &str) -> bool {
    config_path(filename).is_some_and(|p| p.exists())
}

/// Load and parse a JSON file from the config directory
pub fn load_json<T: DeserializeOwned>(filename: &str) -> Result<T> {
    let path = config_path(filename).context("Could not determine config directory")?;
    load_json_file(&path)
}

/// Load and parse a JSON file from an arbitrary path
pub fn load_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Ensure the config directory exists
pub fn ensure_config_dir() -> Result<PathBuf> {
    let dir = config_dir().context("Could not determine config directory")?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
    Ok(dir)
}

/// Expand a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, or when no home directory is known, are
/// returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    expand_home_with(path, dirs::home_dir())
}

fn expand_home_with(path: &str, home: Option<PathBuf>) -> PathBuf {
    let Some(home) = home else {
        return PathBuf::from(path);
    };

    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}
