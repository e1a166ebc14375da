//! Ranking and view ordering modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error for an unrecognised mode name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseModeError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

/// Key used to rank the whole population.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingMode {
    /// Rank by number of completed catalog labs
    #[default]
    Completion,
    /// Rank by number of badges earned, catalog or not
    Badges,
}

impl RankingMode {
    /// Stable lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RankingMode::Completion => "completion",
            RankingMode::Badges => "badges",
        }
    }
}

impl fmt::Display for RankingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankingMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "completion" | "completed" => Ok(RankingMode::Completion),
            "badges" | "badge" => Ok(RankingMode::Badges),
            _ => Err(ParseModeError {
                kind: "ranking mode",
                value: s.to_string(),
                expected: "completion, badges",
            }),
        }
    }
}

/// Local ordering of a leaderboard view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Keep the global rank order
    #[default]
    ByRank,
    /// Name, ascending, ignoring case
    ByName,
    /// Completed labs, descending
    ByCompletion,
    /// Badge count, descending
    ByBadges,
}

impl SortMode {
    /// Stable short name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::ByRank => "rank",
            SortMode::ByName => "name",
            SortMode::ByCompletion => "completion",
            SortMode::ByBadges => "badges",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match lower.strip_prefix("by-").unwrap_or(&lower) {
            "rank" => Ok(SortMode::ByRank),
            "name" => Ok(SortMode::ByName),
            "completion" | "completed" => Ok(SortMode::ByCompletion),
            "badges" => Ok(SortMode::ByBadges),
            _ => Err(ParseModeError {
                kind: "sort mode",
                value: s.to_string(),
                expected: "rank, name, completion, badges",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_mode_parse() {
        assert_eq!("name".parse::<SortMode>().unwrap(), SortMode::ByName);
        assert_eq!("by-completion".parse::<SortMode>().unwrap(), SortMode::ByCompletion);
        assert_eq!("Badges".parse::<SortMode>().unwrap(), SortMode::ByBadges);
        assert_eq!("rank".parse::<SortMode>().unwrap(), SortMode::ByRank);

        let err = "score".parse::<SortMode>().unwrap_err();
        assert!(err.to_string().contains("unknown sort mode 'score'"));
    }

    #[test]
    fn test_ranking_mode_parse_and_display() {
        assert_eq!("completion".parse::<RankingMode>().unwrap(), RankingMode::Completion);
        assert_eq!("badges".parse::<RankingMode>().unwrap(), RankingMode::Badges);
        assert!("labs".parse::<RankingMode>().is_err());
        assert_eq!(RankingMode::Badges.to_string(), "badges");
        assert_eq!(RankingMode::default(), RankingMode::Completion);
    }
}
