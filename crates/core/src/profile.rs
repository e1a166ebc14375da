//! Participant profile models - raw feed records and their derived form.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Keys written by [`DerivedProfile`]; feed fields with these names are
/// replaced by the derived values.
pub const DERIVED_FIELDS: [&str; 5] = [
    "completedLabIds",
    "completedCount",
    "badgeCount",
    "totalLabs",
    "rank",
];

/// A participant record as delivered by the profile feed.
///
/// Fields the engine does not understand are kept in `extra` and written
/// back out unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawProfile {
    /// Display name; records without one are excluded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Canonical profile URL, the stable identity key; empty when absent
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,

    /// Badge titles earned, in feed order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub titles: Option<Vec<String>>,

    /// Upstream scrape error marker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,

    /// Pass-through fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawProfile {
    /// Create a profile with a name, URL and badge titles.
    pub fn new(name: impl Into<String>, url: impl Into<String>, titles: Vec<String>) -> Self {
        Self {
            name: Some(name.into()),
            url: url.into(),
            titles: Some(titles),
            error: None,
            extra: Map::new(),
        }
    }

    /// Mark the record with an upstream error.
    pub fn with_error(mut self, error: impl Into<Value>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Badge titles, empty when the feed omitted them.
    pub fn titles(&self) -> &[String] {
        self.titles.as_deref().unwrap_or_default()
    }

    /// Whether the `error` field carries a truthy value.
    ///
    /// `null`, `false`, `0` and `""` count as unset.
    pub fn has_error(&self) -> bool {
        self.error.as_ref().is_some_and(is_truthy)
    }

    /// A record takes part in statistics only when it has a non-empty name
    /// and no error.
    pub fn is_valid(&self) -> bool {
        !self.has_error() && self.name.as_deref().is_some_and(|n| !n.is_empty())
    }

    /// Parse a feed payload, skipping elements that are not profile objects.
    ///
    /// Returns `None` when the payload itself is not an array.
    pub fn parse_feed(payload: Value) -> Option<(Vec<RawProfile>, usize)> {
        let Value::Array(items) = payload else {
            return None;
        };

        let mut skipped = 0;
        let profiles = items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<RawProfile>(item) {
                Ok(profile) => Some(profile),
                Err(_) => {
                    skipped += 1;
                    None
                }
            })
            .collect();

        Some((profiles, skipped))
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// A profile enriched with lab completion and its leaderboard rank.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedProfile {
    /// The untouched feed record
    #[serde(flatten)]
    pub profile: RawProfile,

    /// Catalog ids of completed labs
    pub completed_lab_ids: BTreeSet<u32>,

    /// Number of completed catalog labs
    pub completed_count: usize,

    /// Number of badges earned, catalog or not
    pub badge_count: usize,

    /// Catalog size at derivation time
    pub total_labs: usize,

    /// 1-based position in the full population
    pub rank: usize,
}

impl DerivedProfile {
    /// Wrap a feed record with its completion data. The rank starts at 0
    /// until the population is sorted.
    ///
    /// Pass-through fields named like a derived field are dropped so the
    /// serialized record carries each key once.
    pub fn new(
        mut profile: RawProfile,
        completed_lab_ids: BTreeSet<u32>,
        badge_count: usize,
        total_labs: usize,
    ) -> Self {
        for key in DERIVED_FIELDS {
            profile.extra.remove(key);
        }

        Self {
            completed_count: completed_lab_ids.len(),
            completed_lab_ids,
            badge_count,
            total_labs,
            rank: 0,
            profile,
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.profile.name.as_deref().unwrap_or_default()
    }

    /// Profile URL.
    pub fn url(&self) -> &str {
        &self.profile.url
    }

    /// First whitespace-separated word of the name.
    pub fn first_name(&self) -> &str {
        self.name().split_whitespace().next().unwrap_or_default()
    }

    /// Whether the lab with `lab_id` was completed.
    pub fn has_completed(&self, lab_id: u32) -> bool {
        self.completed_lab_ids.contains(&lab_id)
    }

    /// Whether every catalog lab was completed.
    pub fn is_finisher(&self) -> bool {
        self.total_labs > 0 && self.completed_count == self.total_labs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_truthiness() {
        let base = RawProfile::new("Alice", "a", vec![]);
        assert!(!base.has_error());
        assert!(base.clone().with_error("404").has_error());
        assert!(base.clone().with_error(true).has_error());
        assert!(base.clone().with_error(json!({"code": 1})).has_error());
        assert!(!base.clone().with_error("").has_error());
        assert!(!base.clone().with_error(false).has_error());
        assert!(!base.clone().with_error(0).has_error());
        assert!(!base.with_error(Value::Null).has_error());
    }

    #[test]
    fn test_is_valid_requires_name() {
        let mut profile = RawProfile::new("", "a", vec![]);
        assert!(!profile.is_valid());
        profile.name = None;
        assert!(!profile.is_valid());
        profile.name = Some("Bob".to_string());
        assert!(profile.is_valid());
    }

    #[test]
    fn test_deserialize_keeps_unknown_fields() {
        let profile: RawProfile = serde_json::from_value(json!({
            "name": "Carol",
            "url": "c",
            "titles": null,
            "avatar": "carol.png"
        }))
        .unwrap();

        assert_eq!(profile.titles(), &[] as &[String]);
        assert_eq!(profile.extra.get("avatar"), Some(&json!("carol.png")));

        let out = serde_json::to_value(&profile).unwrap();
        assert_eq!(out["avatar"], json!("carol.png"));
    }

    #[test]
    fn test_parse_feed_skips_malformed_elements() {
        let payload = json!([
            {"name": "Alice", "url": "a", "titles": ["Get Started with Looker"]},
            "not a profile",
            {"name": "Bob", "titles": [1, 2]},
            {"url": "d"}
        ]);

        let (profiles, skipped) = RawProfile::parse_feed(payload).unwrap();
        assert_eq!(profiles.len(), 2);
        assert_eq!(skipped, 2);
        assert!(RawProfile::parse_feed(json!({"error": "down"})).is_none());
    }

    #[test]
    fn test_parse_feed_accepts_null_url() {
        let payload = json!([
            {"name": "Alice", "url": null, "titles": ["Get Started with Looker"]}
        ]);

        let (profiles, skipped) = RawProfile::parse_feed(payload).unwrap();
        assert_eq!(skipped, 0);
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].url, "");
        assert!(profiles[0].is_valid());
    }

    #[test]
    fn test_derived_fields_override_feed_fields() {
        let raw: RawProfile = serde_json::from_value(json!({
            "name": "A",
            "url": "a",
            "rank": 99,
            "totalLabs": 3,
            "avatar": "a.png"
        }))
        .unwrap();

        let mut derived = DerivedProfile::new(raw, BTreeSet::from([1]), 1, 20);
        derived.rank = 1;

        let out = serde_json::to_string(&derived).unwrap();
        assert_eq!(out.matches("\"rank\"").count(), 1);
        assert_eq!(out.matches("\"totalLabs\"").count(), 1);

        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["rank"], json!(1));
        assert_eq!(value["totalLabs"], json!(20));
        assert_eq!(value["avatar"], json!("a.png"));
    }

    #[test]
    fn test_first_name() {
        let derived = DerivedProfile {
            profile: RawProfile::new("Ada Lovelace", "a", vec![]),
            completed_lab_ids: BTreeSet::new(),
            completed_count: 0,
            badge_count: 0,
            total_labs: 20,
            rank: 1,
        };
        assert_eq!(derived.first_name(), "Ada");
        assert!(!derived.is_finisher());
    }
}
