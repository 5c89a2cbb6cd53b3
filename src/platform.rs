use std::env;
use std::fs;
use std::path::PathBuf;

use crate::update::{UpdateError, UpdateResult};

fn dirs_home() -> Option<PathBuf> {
    env::var("HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| env::var("USERPROFILE").ok().map(PathBuf::from))
}

/// Get the config directory for mcfetch.
///
/// `XDG_CONFIG_HOME` wins when set; otherwise `%APPDATA%` on Windows and
/// `~/.config` everywhere else.
pub fn config_dir() -> Option<PathBuf> {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return Some(PathBuf::from(xdg).join("mcfetch"));
        }
    }

    if cfg!(target_os = "windows") {
        if let Ok(appdata) = env::var("APPDATA") {
            return Some(PathBuf::from(appdata).join("mcfetch"));
        }
    }

    dirs_home().map(|home| home.join(".config").join("mcfetch"))
}

/// Absolute, symlink-free path of the running binary.
pub fn current_executable() -> UpdateResult<PathBuf> {
    let path = env::current_exe().map_err(UpdateError::PathResolution)?;
    fs::canonicalize(&path).map_err(UpdateError::PathResolution)
}
