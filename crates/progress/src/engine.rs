//! Progress engine - catalog and ranking mode bundled with the derivation steps.

use serde::Serialize;
use studyjam_core::{
    AggregateStats, CompletionBucket, DerivedProfile, LabCatalog, LabCompletion,
    PerformerSummary, RankingMode, RawProfile, SortMode,
};
use tracing::debug;

use crate::analytics::{completion_distribution, lab_completion, top_performers};
use crate::derive::derive_profiles;
use crate::stats::compute_stats;
use crate::view::filter_and_sort;

/// Derives leaderboards for a fixed catalog and ranking mode.
///
/// Holds configuration only. Every call to [`ProgressEngine::build`]
/// recomputes from the given records.
#[derive(Debug, Clone, Default)]
pub struct ProgressEngine {
    catalog: LabCatalog,
    mode: RankingMode,
}

impl ProgressEngine {
    /// Create an engine over `catalog` ranking by completed labs.
    pub fn new(catalog: LabCatalog) -> Self {
        Self {
            catalog,
            mode: RankingMode::Completion,
        }
    }

    /// Set the ranking mode.
    pub fn with_mode(mut self, mode: RankingMode) -> Self {
        self.mode = mode;
        self
    }

    /// The lab catalog.
    pub fn catalog(&self) -> &LabCatalog {
        &self.catalog
    }

    /// The ranking mode.
    pub fn mode(&self) -> RankingMode {
        self.mode
    }

    /// Rank `raw` and compute statistics over the whole population.
    pub fn build(&self, raw: &[RawProfile]) -> Leaderboard {
        let profiles = derive_profiles(raw, &self.catalog, self.mode);
        let stats = compute_stats(&profiles, self.mode);
        debug!(
            "Built {} leaderboard: {} ranked of {} records",
            self.mode,
            profiles.len(),
            raw.len()
        );

        Leaderboard { profiles, stats }
    }

    /// Chart breakdowns of a built leaderboard.
    pub fn analytics(&self, leaderboard: &Leaderboard, top: usize) -> Analytics {
        Analytics {
            distribution: completion_distribution(&leaderboard.profiles, self.catalog.len()),
            labs: lab_completion(&leaderboard.profiles, &self.catalog),
            top_performers: top_performers(&leaderboard.profiles, top),
        }
    }
}

/// Ranked population and its statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leaderboard {
    /// Profiles in rank order
    pub profiles: Vec<DerivedProfile>,
    /// Statistics over `profiles`
    pub stats: AggregateStats,
}

impl Leaderboard {
    /// Searched and locally sorted view; statistics are unaffected.
    pub fn view(&self, search: &str, sort: SortMode) -> Vec<DerivedProfile> {
        filter_and_sort(&self.profiles, search, sort)
    }
}

/// Breakdowns used by the analytics page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    /// Completed-count ranges
    pub distribution: Vec<CompletionBucket>,
    /// Per-lab completion
    pub labs: Vec<LabCompletion>,
    /// Highest ranked profiles
    pub top_performers: Vec<PerformerSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed() -> Vec<RawProfile> {
        vec![
            RawProfile::new("Alice", "a", vec!["Get Started with Pub/Sub".to_string()]),
            RawProfile::new("Bob", "b", vec![]).with_error("404"),
            RawProfile::new(
                "Carol",
                "c",
                vec![
                    "Get Started with Looker".to_string(),
                    "Get Started with Pub/Sub".to_string(),
                ],
            ),
        ]
    }

    #[test]
    fn test_build_leaderboard() {
        let engine = ProgressEngine::default();
        let board = engine.build(&feed());

        assert_eq!(board.profiles.len(), 2);
        assert_eq!(board.stats.total_participants, 2);
        assert_eq!(board.stats.total_completed, 3);
        assert_eq!(board.stats.top_performer.as_ref().map(|p| p.rank), Some(1));
    }

    #[test]
    fn test_view_does_not_change_stats() {
        let board = ProgressEngine::default().build(&feed());
        let view = board.view("ali", SortMode::ByName);

        assert_eq!(view.len(), 1);
        assert_eq!(view[0].rank, 2);
        assert_eq!(board.stats.total_participants, 2);
    }

    #[test]
    fn test_badge_mode_engine() {
        let engine = ProgressEngine::new(LabCatalog::study_jams()).with_mode(RankingMode::Badges);
        let board = engine.build(&feed());

        assert_eq!(engine.mode(), RankingMode::Badges);
        assert_eq!(board.stats.mode, RankingMode::Badges);
        assert_eq!(board.stats.total_badges, 3);
        assert!((board.stats.average_completion - 7.5).abs() < 1e-9);
    }

    #[test]
    fn test_analytics() {
        let engine = ProgressEngine::default();
        let board = engine.build(&feed());
        let analytics = engine.analytics(&board, 10);

        assert_eq!(analytics.distribution.len(), 4);
        assert_eq!(analytics.distribution[0].count, 2);
        assert_eq!(analytics.labs[2].completed_by, 2);
        assert_eq!(analytics.top_performers.len(), 2);
        assert_eq!(analytics.top_performers[0].first_name, "Carol");
    }

    #[test]
    fn test_serialized_profile_is_camel_case_and_flat() {
        let board = ProgressEngine::default().build(&feed());
        let json = serde_json::to_value(&board.profiles[0]).unwrap();

        assert_eq!(json["name"], "Carol");
        assert_eq!(json["completedCount"], 2);
        assert_eq!(json["completedLabIds"], serde_json::json!([3, 5]));
        assert_eq!(json["rank"], 1);
    }
}
