//! Test doubles for the update flow: helpers for driving the real reqwest
//! client against a wiremock server, plus fake GitHub and launcher
//! implementations.

use std::cell::{Cell, RefCell};
use std::io::Write;

use super::github::{Asset, GitHubApi, Release};
use super::platform::PlatformIdentity;
use super::replace::{DeferredTask, ProcessLauncher};
use super::{UpdateError, UpdateResult};

/// Path of the release index on a mock server.
pub const RELEASE_PATH: &str = "/repos/Rezn1r/mcfetch/releases/latest";

/// Run blocking client code on tokio's blocking pool.
///
/// The blocking reqwest client owns its own runtime, which must not be
/// created or dropped on an async worker thread.
pub async fn blocking<T, F>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .expect("blocking task panicked")
}

/// In-memory stand-in for the GitHub release API.
pub struct FakeGitHub {
    release: Result<Release, reqwest::StatusCode>,
    payload: Vec<u8>,
    fail_after: Option<usize>,
    pub fetches: Cell<usize>,
    pub downloads: Cell<usize>,
}

impl FakeGitHub {
    /// A release with a single asset for the host platform whose bytes are `payload`.
    pub fn serving(payload: Vec<u8>) -> Self {
        let platform = PlatformIdentity::current();
        let name = format!("mcfetch-{}-{}", platform.os, platform.arch);
        Self::with_release(release("v9.9.9", &[name.as_str()]), payload)
    }

    pub fn with_release(release: Release, payload: Vec<u8>) -> Self {
        Self {
            release: Ok(release),
            payload,
            fail_after: None,
            fetches: Cell::new(0),
            downloads: Cell::new(0),
        }
    }

    /// Release index answers every request with `status`.
    pub fn erroring(status: reqwest::StatusCode) -> Self {
        Self {
            release: Err(status),
            payload: Vec::new(),
            fail_after: None,
            fetches: Cell::new(0),
            downloads: Cell::new(0),
        }
    }

    /// Write `n` bytes of the payload, then fail the transfer.
    pub fn failing_after(mut self, n: usize) -> Self {
        self.fail_after = Some(n);
        self
    }

    pub fn first_asset(&self) -> Asset {
        match &self.release {
            Ok(release) => release.assets[0].clone(),
            Err(_) => panic!("release index is erroring"),
        }
    }
}

impl GitHubApi for FakeGitHub {
    fn fetch_latest_release(&self) -> UpdateResult<Release> {
        self.fetches.set(self.fetches.get() + 1);
        match &self.release {
            Ok(release) => Ok(release.clone()),
            Err(status) => Err(UpdateError::RemoteService {
                context: "github api",
                status: *status,
            }),
        }
    }

    fn download_asset(&self, _asset: &Asset, sink: &mut dyn Write) -> UpdateResult<u64> {
        self.downloads.set(self.downloads.get() + 1);
        let io_err = UpdateError::io("failed to download asset");
        match self.fail_after {
            Some(n) => {
                sink.write_all(&self.payload[..n.min(self.payload.len())])
                    .map_err(UpdateError::io("failed to download asset"))?;
                Err(io_err(std::io::Error::other("connection reset")))
            }
            None => {
                sink.write_all(&self.payload).map_err(io_err)?;
                Ok(self.payload.len() as u64)
            }
        }
    }
}

/// Launcher that records the hand-off instead of spawning anything.
#[derive(Default)]
pub struct RecordingLauncher {
    tasks: RefCell<Vec<DeferredTask>>,
    fail: bool,
}

impl RecordingLauncher {
    pub fn failing() -> Self {
        Self {
            tasks: RefCell::new(Vec::new()),
            fail: true,
        }
    }

    pub fn tasks(&self) -> Vec<DeferredTask> {
        self.tasks.borrow().clone()
    }
}

impl ProcessLauncher for RecordingLauncher {
    fn launch(&self, task: &DeferredTask) -> std::io::Result<()> {
        self.tasks.borrow_mut().push(task.clone());
        if self.fail {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "powershell.exe not found",
            ));
        }
        Ok(())
    }
}

/// Build a release whose assets have the given names.
pub fn release(tag: &str, names: &[&str]) -> Release {
    Release {
        tag_name: tag.to_string(),
        assets: names
            .iter()
            .map(|name| Asset {
                name: name.to_string(),
                browser_download_url: format!("https://example.com/download/{name}"),
            })
            .collect(),
    }
}
