//! Profile derivation: filter, score against the lab catalog, rank.

use std::collections::BTreeSet;

use studyjam_core::{DerivedProfile, LabCatalog, RankingMode, RawProfile};
use tracing::debug;

/// Derive ranked profiles from raw feed records.
///
/// Records with an error or without a name are dropped. The rest are
/// scored against `catalog`, sorted descending by the `mode` key (stable, so
/// ties keep feed order) and assigned a 1-based rank.
pub fn derive_profiles(
    raw: &[RawProfile],
    catalog: &LabCatalog,
    mode: RankingMode,
) -> Vec<DerivedProfile> {
    let mut derived: Vec<DerivedProfile> = raw
        .iter()
        .filter(|profile| profile.is_valid())
        .map(|profile| score(profile, catalog))
        .collect();

    let excluded = raw.len() - derived.len();
    if excluded > 0 {
        debug!("Excluded {} of {} profiles (error or missing name)", excluded, raw.len());
    }

    derived.sort_by(|a, b| ranking_key(b, mode).cmp(&ranking_key(a, mode)));

    for (index, profile) in derived.iter_mut().enumerate() {
        profile.rank = index + 1;
    }

    derived
}

/// The value a profile is ranked by under `mode`.
pub fn ranking_key(profile: &DerivedProfile, mode: RankingMode) -> usize {
    match mode {
        RankingMode::Completion => profile.completed_count,
        RankingMode::Badges => profile.badge_count,
    }
}

fn score(profile: &RawProfile, catalog: &LabCatalog) -> DerivedProfile {
    let completed_lab_ids: BTreeSet<u32> = catalog.completed_by(profile.titles()).into_iter().collect();

    DerivedProfile::new(
        profile.clone(),
        completed_lab_ids,
        profile.titles().len(),
        catalog.len(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn sample_feed() -> Vec<RawProfile> {
        vec![
            RawProfile::new("Alice", "a", titles(&["Get Started with Pub/Sub"])),
            RawProfile::new("Bob", "b", vec![]).with_error("404"),
            RawProfile::new(
                "Carol",
                "c",
                titles(&["Get Started with Looker", "Get Started with Pub/Sub"]),
            ),
        ]
    }

    #[test]
    fn test_derive_scenario() {
        let derived = derive_profiles(&sample_feed(), &LabCatalog::study_jams(), RankingMode::Completion);

        assert_eq!(derived.len(), 2);
        assert_eq!(derived[0].name(), "Carol");
        assert_eq!(derived[0].rank, 1);
        assert_eq!(derived[0].completed_count, 2);
        assert_eq!(derived[0].completed_lab_ids, BTreeSet::from([3, 5]));
        assert_eq!(derived[1].name(), "Alice");
        assert_eq!(derived[1].rank, 2);
        assert_eq!(derived[1].completed_count, 1);
        assert_eq!(derived[1].total_labs, 20);
    }

    #[test]
    fn test_substring_badge_counts() {
        let raw = vec![RawProfile::new(
            "Dan",
            "d",
            titles(&["Get Started with Pub/Sub Advanced"]),
        )];
        let derived = derive_profiles(&raw, &LabCatalog::study_jams(), RankingMode::Completion);
        assert!(derived[0].has_completed(3));
    }

    #[test]
    fn test_ties_keep_feed_order() {
        let raw = vec![
            RawProfile::new("Zed", "z", titles(&["Get Started with Looker"])),
            RawProfile::new("Amy", "a", titles(&["Get Started with Dataplex"])),
            RawProfile::new("Max", "m", titles(&["Get Started with Looker", "Get Started with Dataplex"])),
        ];
        let derived = derive_profiles(&raw, &LabCatalog::study_jams(), RankingMode::Completion);
        let names: Vec<_> = derived.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["Max", "Zed", "Amy"]);
    }

    #[test]
    fn test_badge_mode_counts_all_badges() {
        let raw = vec![
            RawProfile::new("Alice", "a", titles(&["Get Started with Looker"])),
            RawProfile::new("Bob", "b", titles(&["Some Other Badge", "Yet Another", "Third"])),
        ];
        let derived = derive_profiles(&raw, &LabCatalog::study_jams(), RankingMode::Badges);
        assert_eq!(derived[0].name(), "Bob");
        assert_eq!(derived[0].badge_count, 3);
        assert_eq!(derived[0].completed_count, 0);
        assert_eq!(derived[1].name(), "Alice");
    }

    #[test]
    fn test_invariants_hold() {
        let mut raw = sample_feed();
        raw.push(RawProfile::new("", "e", titles(&["Level 3: Generative AI"])));
        raw.push(RawProfile {
            name: Some("Frank".to_string()),
            url: "f".to_string(),
            titles: None,
            ..Default::default()
        });
        let catalog = LabCatalog::study_jams();

        let derived = derive_profiles(&raw, &catalog, RankingMode::Completion);
        assert!(derived.len() <= raw.len());
        assert_eq!(derived.len(), 3);

        let mut ranks: Vec<_> = derived.iter().map(|p| p.rank).collect();
        ranks.sort_unstable();
        assert_eq!(ranks, (1..=derived.len()).collect::<Vec<_>>());

        for profile in &derived {
            assert_eq!(profile.completed_count, profile.completed_lab_ids.len());
            assert!(profile.completed_count <= catalog.len());
            assert!(profile.completed_lab_ids.iter().all(|id| (1..=20).contains(id)));
        }
    }

    #[test]
    fn test_derive_is_idempotent_and_does_not_touch_input() {
        let raw = sample_feed();
        let before = raw.clone();
        let catalog = LabCatalog::study_jams();

        let first = derive_profiles(&raw, &catalog, RankingMode::Completion);
        let second = derive_profiles(&raw, &catalog, RankingMode::Completion);
        assert_eq!(first, second);
        assert_eq!(raw, before);
    }

    #[test]
    fn test_feed_rank_field_is_replaced() {
        let raw: Vec<RawProfile> = serde_json::from_value(serde_json::json!([
            {"name": "A", "url": "a", "rank": 99, "completedCount": 7, "titles": []}
        ]))
        .unwrap();

        let derived = derive_profiles(&raw, &LabCatalog::study_jams(), RankingMode::Completion);
        let out = serde_json::to_string(&derived[0]).unwrap();
        assert_eq!(out.matches("\"rank\"").count(), 1);
        assert_eq!(out.matches("\"completedCount\"").count(), 1);
        assert!(out.contains("\"rank\":1"));
        assert!(out.contains("\"completedCount\":0"));
    }

    #[test]
    fn test_empty_feed() {
        let derived = derive_profiles(&[], &LabCatalog::study_jams(), RankingMode::Completion);
        assert!(derived.is_empty());
    }
}
