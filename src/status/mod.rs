//! Server status lookups.
//!
//! The protocol work is done by the public status service; this module only
//! knows the shape of its answers and how to ask for them.

pub mod client;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

pub use client::McStatusClient;

#[derive(Error, Debug)]
pub enum StatusError {
    #[error("status service returned {0}")]
    Service(reqwest::StatusCode),

    #[error("failed to parse status response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Network(#[from] reqwest::Error),
}

pub type StatusResult<T> = Result<T, StatusError>;

/// Status lookups, allowing for mocking in tests.
pub trait StatusApi {
    fn java_status(&self, host: &str, port: u16) -> StatusResult<JavaStatus>;
    fn bedrock_status(&self, host: &str, port: u16) -> StatusResult<BedrockStatus>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edition {
    Java,
    Bedrock,
}

impl Edition {
    /// Parse a user-supplied edition name; surrounding whitespace and case are ignored.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "java" => Some(Edition::Java),
            "bedrock" => Some(Edition::Bedrock),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Edition::Java => "java",
            Edition::Bedrock => "bedrock",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            Edition::Java => 25565,
            Edition::Bedrock => 19132,
        }
    }

    /// Resolve the port argument, falling back to the edition default when blank.
    pub fn parse_port(&self, port: Option<&str>) -> Result<u16, String> {
        let port = match port.map(str::trim) {
            None | Some("") => return Ok(self.default_port()),
            Some(p) => p,
        };

        let num: u32 = port
            .parse()
            .map_err(|_| format!("invalid port '{}'", port))?;
        if num == 0 || num > 65535 {
            return Err("port must be 1-65535".to_string());
        }
        Ok(num as u16)
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Players {
    #[serde(default)]
    pub online: u64,
    #[serde(default)]
    pub max: u64,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Motd {
    #[serde(default)]
    pub clean: String,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct JavaVersion {
    #[serde(default)]
    pub name_raw: String,
    #[serde(default)]
    pub name_clean: String,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct BedrockVersion {
    #[serde(default)]
    pub name: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SrvRecord {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct JavaStatus {
    pub online: bool,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub eula_blocked: bool,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub retrieved_at: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub srv_record: Option<SrvRecord>,
    #[serde(default)]
    pub version: Option<JavaVersion>,
    #[serde(default)]
    pub players: Option<Players>,
    #[serde(default)]
    pub motd: Option<Motd>,
    /// Only counted for display.
    #[serde(default)]
    pub mods: Vec<serde_json::Value>,
    #[serde(default)]
    pub plugins: Vec<serde_json::Value>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BedrockStatus {
    pub online: bool,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub eula_blocked: bool,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub retrieved_at: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub version: Option<BedrockVersion>,
    #[serde(default)]
    pub players: Option<Players>,
    #[serde(default)]
    pub motd: Option<Motd>,
    #[serde(default)]
    pub gamemode: Option<String>,
    #[serde(default)]
    pub server_id: Option<String>,
    #[serde(default)]
    pub edition: Option<String>,
}
