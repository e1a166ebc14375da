//! Profile source trait abstraction.

use async_trait::async_trait;
use studyjam_core::RawProfile;

/// Error type for feed operations.
pub type Result<T> = std::result::Result<T, FeedError>;

/// Errors that can occur while fetching profiles.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// Transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response
    #[error("unexpected status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, possibly truncated
        body: String,
    },

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Payload was valid JSON but not an array of profiles
    #[error("expected a JSON array of profiles, got {0}")]
    NotAnArray(&'static str),
}

/// Where participant profiles come from.
///
/// This trait allows the HTTP feed to be swapped for a file snapshot or a
/// scripted source in tests.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Fetch the current list of profiles.
    async fn fetch(&self) -> Result<Vec<RawProfile>>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

/// Name of a JSON value's kind, for error messages.
pub(crate) fn kind_of(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Turn a decoded payload into profiles, skipping malformed elements.
pub(crate) fn profiles_from_payload(payload: serde_json::Value, origin: &str) -> Result<Vec<RawProfile>> {
    let kind = kind_of(&payload);
    let Some((profiles, skipped)) = RawProfile::parse_feed(payload) else {
        return Err(FeedError::NotAnArray(kind));
    };

    if skipped > 0 {
        tracing::debug!("Skipped {} malformed records from {}", skipped, origin);
    }
    Ok(profiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profiles_from_payload() {
        let profiles = profiles_from_payload(
            json!([{"name": "Alice", "url": "a"}, 42]),
            "test",
        )
        .unwrap();
        assert_eq!(profiles.len(), 1);

        let err = profiles_from_payload(json!({"profiles": []}), "test").unwrap_err();
        assert!(matches!(err, FeedError::NotAnArray("an object")));
    }
}
