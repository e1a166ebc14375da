//! Population statistics.

use studyjam_core::{AggregateStats, DerivedProfile, RankingMode};

/// Compute aggregate statistics over the full derived population.
///
/// Pass the unfiltered population: these numbers must not move while a
/// view is being searched. The average always divides by
/// `total_participants * total_labs`, including in badge mode where a
/// profile can hold more badges than there are catalog labs.
pub fn compute_stats(profiles: &[DerivedProfile], mode: RankingMode) -> AggregateStats {
    if profiles.is_empty() {
        return AggregateStats::empty(mode);
    }

    let total_participants = profiles.len();
    let total_completed: usize = profiles.iter().map(|p| p.completed_count).sum();
    let total_badges: usize = profiles.iter().map(|p| p.badge_count).sum();
    let finishers = profiles.iter().filter(|p| p.is_finisher()).count();
    let total_labs = profiles[0].total_labs;

    let numerator = match mode {
        RankingMode::Completion => total_completed,
        RankingMode::Badges => total_badges,
    };
    let denominator = total_participants * total_labs;
    let average_completion = if denominator > 0 {
        (numerator as f64 / denominator as f64) * 100.0
    } else {
        0.0
    };

    AggregateStats {
        total_participants,
        total_completed,
        total_badges,
        average_completion,
        finishers,
        top_performer: profiles.iter().find(|p| p.rank == 1).cloned(),
        mode,
    }
}
