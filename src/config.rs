//! User configuration.
//!
//! Read from `<config dir>/mcfetch/config.toml`, or from the path in
//! `MCFETCH_CONFIG`. Every key is optional and a missing file means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use crate::platform::config_dir;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Deserialize, Default, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Disable colored output
    pub no_color: bool,

    /// Enable debug logging
    pub verbose: bool,

    /// Override the GitHub `releases/latest` endpoint
    pub release_url: Option<String>,

    /// Override the status service base URL
    pub status_api_url: Option<String>,
}

impl Config {
    /// Load config from the default location, returning defaults if there is none.
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("no config at {}", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loaded config from {}", path.display());

        Ok(config)
    }
}

fn config_path() -> Option<PathBuf> {
    match std::env::var("MCFETCH_CONFIG") {
        Ok(path) if !path.is_empty() => Some(PathBuf::from(path)),
        _ => config_dir().map(|dir| dir.join("config.toml")),
    }
}
