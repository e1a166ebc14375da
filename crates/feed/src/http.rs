//! HTTP profile source.

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use studyjam_core::RawProfile;
use tracing::debug;

use crate::config::FeedConfig;
use crate::source::{profiles_from_payload, FeedError, ProfileSource, Result};

const MAX_ERROR_BODY: usize = 512;

/// Fetches profiles from the leaderboard API.
#[derive(Clone)]
pub struct HttpProfileSource {
    /// HTTP client
    client: Client,

    /// Leaderboard URL
    endpoint: String,
}

impl HttpProfileSource {
    /// Create a source for the configured endpoint.
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    /// The URL being polled.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ProfileSource for HttpProfileSource {
    async fn fetch(&self) -> Result<Vec<RawProfile>> {
        debug!("Fetching profiles from {}", self.endpoint);

        let response = self.client.get(&self.endpoint).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            return Err(FeedError::Status { status, body });
        }

        let payload: serde_json::Value = response.json().await?;
        profiles_from_payload(payload, &self.endpoint)
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_new_uses_config_endpoint() {
        let config = FeedConfig::default()
            .with_endpoint("http://127.0.0.1:9/api/leaderboard")
            .with_request_timeout(Duration::from_millis(200));
        let source = HttpProfileSource::new(&config).unwrap();

        assert_eq!(source.endpoint(), "http://127.0.0.1:9/api/leaderboard");
        assert_eq!(source.describe(), source.endpoint());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_http_error() {
        let config = FeedConfig::default()
            .with_endpoint("http://127.0.0.1:9/api/leaderboard")
            .with_request_timeout(Duration::from_millis(500));
        let source = HttpProfileSource::new(&config).unwrap();

        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, FeedError::Http(_)));
    }
}
