//! Feed configuration.

use std::time::Duration;

/// Leaderboard endpoint of a locally running API server.
pub const LOCAL_ENDPOINT: &str = "http://localhost:4000/api/leaderboard";

/// Leaderboard endpoint of the hosted API server.
pub const HOSTED_ENDPOINT: &str = "https://fixedbackend-6w41.onrender.com/api/leaderboard";

/// Where and how often to fetch profiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    /// Leaderboard URL
    pub endpoint: String,
    /// Delay between polls
    pub poll_interval: Duration,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            endpoint: LOCAL_ENDPOINT.to_string(),
            poll_interval: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl FeedConfig {
    /// Configuration pointing at the hosted API server.
    pub fn hosted() -> Self {
        Self::default().with_endpoint(HOSTED_ENDPOINT)
    }

    /// Set the endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FeedConfig::default();
        assert_eq!(config.endpoint, LOCAL_ENDPOINT);
        assert_eq!(config.poll_interval, Duration::from_secs(5));
    }

    #[test]
    fn test_builders() {
        let config = FeedConfig::hosted()
            .with_poll_interval(Duration::from_secs(30))
            .with_request_timeout(Duration::from_secs(2));
        assert_eq!(config.endpoint, HOSTED_ENDPOINT);
        assert_eq!(config.poll_interval, Duration::from_secs(30));
        assert_eq!(config.request_timeout, Duration::from_secs(2));
    }
}
