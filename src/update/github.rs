//! GitHub API client for fetching release information.

use std::io::Write;
use std::time::Instant;

use log::debug;
use serde::Deserialize;

use super::{download, UpdateError, UpdateResult, USER_AGENT};

const RELEASE_URL: &str = "https://api.github.com/repos/Rezn1r/mcfetch/releases/latest";

/// Release operations the updater needs, allowing for mocking in tests.
pub trait GitHubApi {
    /// Fetch the latest published release.
    fn fetch_latest_release(&self) -> UpdateResult<Release>;

    /// Stream an asset's bytes into `sink`, returning the number of bytes written.
    fn download_asset(&self, asset: &Asset, sink: &mut dyn Write) -> UpdateResult<u64>;
}

/// Latest release metadata: the version tag plus its downloadable artifacts.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub tag_name: String,
    pub assets: Vec<Asset>,
}

/// Release asset metadata.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub name: String,
    pub browser_download_url: String,
}

impl Release {
    /// Names of every asset, in the order GitHub listed them.
    pub fn asset_names(&self) -> Vec<String> {
        self.assets.iter().map(|a| a.name.clone()).collect()
    }
}

/// Real GitHub client that makes HTTP requests.
pub struct GitHubClient {
    client: reqwest::blocking::Client,
    release_url: String,
}

impl GitHubClient {
    /// Create a client for the release index.
    ///
    /// `release_url` overrides the default `releases/latest` endpoint.
    pub fn new(release_url: Option<&str>) -> UpdateResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            release_url: release_url.unwrap_or(RELEASE_URL).to_string(),
        })
    }
}

impl GitHubApi for GitHubClient {
    fn fetch_latest_release(&self) -> UpdateResult<Release> {
        let start = Instant::now();
        debug!("GET {}", self.release_url);

        let response = self.client.get(&self.release_url).send()?;

        let status = response.status();
        debug!("  response: {} in {:?}", status, start.elapsed());
        if !status.is_success() {
            return Err(UpdateError::RemoteService {
                context: "github api",
                status,
            });
        }

        let body = response.text()?;
        let release: Release = serde_json::from_str(&body)?;
        debug!(
            "  latest release {} with {} assets",
            release.tag_name,
            release.assets.len()
        );

        Ok(release)
    }

    fn download_asset(&self, asset: &Asset, sink: &mut dyn Write) -> UpdateResult<u64> {
        download::download_to(&self.client, &asset.browser_download_url, sink)
    }
}
