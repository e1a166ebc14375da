//! Aggregate statistics over a derived population.

use serde::Serialize;

use crate::mode::RankingMode;
use crate::profile::DerivedProfile;

/// Population-wide totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    /// Valid profiles
    pub total_participants: usize,

    /// Sum of completed catalog labs
    pub total_completed: usize,

    /// Sum of badges earned
    pub total_badges: usize,

    /// Percentage (0-100, unrounded) of `total_participants * total_labs`
    pub average_completion: f64,

    /// Profiles that completed every catalog lab
    pub finishers: usize,

    /// Profile ranked first
    pub top_performer: Option<DerivedProfile>,

    /// Mode the numerator of `average_completion` was taken from
    pub mode: RankingMode,
}

impl AggregateStats {
    /// Stats of an empty population.
    pub fn empty(mode: RankingMode) -> Self {
        Self {
            total_participants: 0,
            total_completed: 0,
            total_badges: 0,
            average_completion: 0.0,
            finishers: 0,
            top_performer: None,
            mode,
        }
    }

    /// The ranking-mode total: completed labs or badges.
    pub fn total_credits(&self) -> usize {
        match self.mode {
            RankingMode::Completion => self.total_completed,
            RankingMode::Badges => self.total_badges,
        }
    }
}

/// Number of profiles whose completed count falls in `min..=max`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionBucket {
    /// Chart label such as `6-10 labs`
    pub label: String,
    /// Inclusive lower bound
    pub min: usize,
    /// Inclusive upper bound
    pub max: usize,
    /// Profiles in range
    pub count: usize,
}

/// Completion of one catalog lab across the population.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabCompletion {
    /// Catalog id
    pub lab_id: u32,
    /// Short display name
    pub short_name: String,
    /// Profiles that completed the lab
    pub completed_by: usize,
    /// `completed_by` as a percentage of the population
    pub percentage: f64,
}

/// Compact entry for a top-performers chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformerSummary {
    /// Global rank
    pub rank: usize,
    /// First name only
    pub first_name: String,
    /// Completed catalog labs
    pub completed_count: usize,
}
