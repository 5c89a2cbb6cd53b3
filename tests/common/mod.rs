#![allow(dead_code)]

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// An isolated environment with its own config file location.
pub struct TestEnv {
    pub dir: TempDir,
    pub config_path: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.toml");
        TestEnv { dir, config_path }
    }

    /// Create an environment whose config file has the given TOML content.
    pub fn with_config(toml: &str) -> Self {
        let env = Self::new();
        std::fs::write(&env.config_path, toml).unwrap();
        env
    }

    /// Get a Command configured to run mcfetch with this environment.
    pub fn cmd(&self) -> Command {
        let mut cmd = assert_cmd::cargo_bin_cmd!("mcfetch");
        cmd.env("MCFETCH_CONFIG", &self.config_path);
        cmd.env_remove("MCFETCH_LOG");
        for var in ["HTTP_PROXY", "http_proxy", "HTTPS_PROXY", "https_proxy", "ALL_PROXY", "all_proxy"] {
            cmd.env_remove(var);
        }
        // Ensure no color codes pollute test output
        cmd.env("NO_COLOR", "1");
        cmd
    }
}

/// Start a mock server answering `GET route` with `status` and `body`.
///
/// The route must be requested exactly once before the server is dropped.
pub async fn mock_get(route: &str, status: u16, body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(status)
                .insert_header("content-type", "application/json")
                .set_body_string(body),
        )
        .expect(1)
        .mount(&server)
        .await;
    server
}

/// Run a binary invocation without stalling the runtime the mock server lives on.
pub fn run_blocking<T>(f: impl FnOnce() -> T) -> T {
    tokio::task::block_in_place(f)
}
