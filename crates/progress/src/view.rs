//! Leaderboard views: name search and local re-ordering.

use studyjam_core::{DerivedProfile, RankingMode, SortMode};

use crate::derive::ranking_key;

/// Filter by name and re-order a ranked population.
///
/// `search` matches names case-insensitively as a substring; an empty
/// string keeps everyone. Ranks are never recomputed, so a filtered view
/// still shows each profile's position in the full population.
pub fn filter_and_sort(
    profiles: &[DerivedProfile],
    search: &str,
    sort: SortMode,
) -> Vec<DerivedProfile> {
    let needle = search.to_lowercase();
    let mut view: Vec<DerivedProfile> = profiles
        .iter()
        .filter(|profile| needle.is_empty() || profile.name().to_lowercase().contains(&needle))
        .cloned()
        .collect();

    match sort {
        SortMode::ByRank => {}
        SortMode::ByName => {
            view.sort_by_cached_key(|profile| profile.name().to_lowercase());
        }
        SortMode::ByCompletion => {
            view.sort_by(|a, b| {
                ranking_key(b, RankingMode::Completion).cmp(&ranking_key(a, RankingMode::Completion))
            });
        }
        SortMode::ByBadges => {
            view.sort_by(|a, b| {
                ranking_key(b, RankingMode::Badges).cmp(&ranking_key(a, RankingMode::Badges))
            });
        }
    }

    view
}
