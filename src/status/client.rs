use std::time::Instant;

use log::debug;
use serde::de::DeserializeOwned;

use super::{BedrockStatus, Edition, JavaStatus, StatusApi, StatusError, StatusResult};

const STATUS_API_URL: &str = "https://api.mcstatus.io/v2/status";

/// Client for the public mcstatus.io HTTP API.
pub struct McStatusClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl McStatusClient {
    pub fn new(base_url: Option<&str>) -> StatusResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(format!("mcfetch/{}", env!("MCFETCH_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url
                .unwrap_or(STATUS_API_URL)
                .trim_end_matches('/')
                .to_string(),
        })
    }

    fn status_url(&self, edition: Edition, host: &str, port: u16) -> String {
        format!("{}/{}/{}:{}", self.base_url, edition.as_str(), host, port)
    }

    fn get<T: DeserializeOwned>(&self, url: &str) -> StatusResult<T> {
        let start = Instant::now();
        debug!("GET {}", url);

        let response = self.client.get(url).send().map_err(|e| {
            debug!("  network error after {:?}: {}", start.elapsed(), e);
            e
        })?;

        let status = response.status();
        debug!("  response: {} in {:?}", status, start.elapsed());
        if !status.is_success() {
            return Err(StatusError::Service(status));
        }

        let body = response.text()?;
        debug!("  response body: {} bytes", body.len());
        Ok(serde_json::from_str(&body)?)
    }
}

impl StatusApi for McStatusClient {
    fn java_status(&self, host: &str, port: u16) -> StatusResult<JavaStatus> {
        self.get(&self.status_url(Edition::Java, host, port))
    }

    fn bedrock_status(&self, host: &str, port: u16) -> StatusResult<BedrockStatus> {
        self.get(&self.status_url(Edition::Bedrock, host, port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::update::test_support::blocking;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_status_url_layout() {
        let client = McStatusClient::new(Some("https://status.example.com/v2/status/")).unwrap();
        assert_eq!(
            client.status_url(Edition::Java, "play.example.net", 25565),
            "https://status.example.com/v2/status/java/play.example.net:25565"
        );
        assert_eq!(
            client.status_url(Edition::Bedrock, "play.example.net", 19132),
            "https://status.example.com/v2/status/bedrock/play.example.net:19132"
        );
    }

    #[tokio::test]
    async fn test_java_status_over_http() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/java/localhost:25565"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"online":true,"players":{"online":1,"max":8},"motd":{"clean":"hi"}}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let base = server.uri();
        let status =
            blocking(move || McStatusClient::new(Some(&base))?.java_status("localhost", 25565))
                .await
                .unwrap();
        assert!(status.online);
        assert_eq!(status.players.unwrap().max, 8);
    }

    #[tokio::test]
    async fn test_service_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bedrock/localhost:19132"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let base = server.uri();
        let result =
            blocking(move || McStatusClient::new(Some(&base))?.bedrock_status("localhost", 19132))
                .await;
        match result {
            Err(StatusError::Service(status)) => {
                assert_eq!(status, reqwest::StatusCode::SERVICE_UNAVAILABLE)
            }
            other => panic!("Expected Service error, got {:?}", other),
        }
    }
}
