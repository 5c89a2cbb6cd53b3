//! Self-update and self-uninstall for the mcfetch binary.
//!
//! The update flow resolves the running executable, fetches the latest
//! GitHub release, picks the artifact for this platform, streams it into a
//! staging file next to the executable and then swaps it in. How the swap
//! happens depends on whether the OS lets a running executable be replaced
//! (see [`replace::ReplaceStrategy`]).

pub mod download;
pub mod github;
pub mod platform;
pub mod replace;
pub mod select;
pub mod uninstall;

#[cfg(test)]
pub(crate) mod test_support;

use std::io;

use thiserror::Error;

/// Name the release artifacts are published under.
pub const TOOL_NAME: &str = "mcfetch";

/// User-Agent sent with every request to the release index and asset host.
pub const USER_AGENT: &str = "mcfetch-updater";

#[derive(Error, Debug)]
pub enum UpdateError {
    #[error("failed to resolve executable path: {0}")]
    PathResolution(#[source] io::Error),

    #[error("{context} returned {status}")]
    RemoteService {
        context: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("failed to parse release metadata: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("no compatible asset found for {os}/{arch}. Available: {}", available.join(", "))]
    AssetNotFound {
        os: String,
        arch: String,
        available: Vec<String>,
    },

    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("failed to start updater: {0}")]
    Stage(#[source] io::Error),

    #[error(transparent)]
    Network(#[from] reqwest::Error),
}

impl UpdateError {
    /// Build a closure that wraps an `io::Error` with a short description of
    /// the filesystem step that failed.
    pub(crate) fn io(context: &'static str) -> impl FnOnce(io::Error) -> UpdateError {
        move |source| UpdateError::Io { context, source }
    }
}

pub type UpdateResult<T> = Result<T, UpdateError>;
