//! Chart-oriented breakdowns of a derived population.

use studyjam_core::{
    CompletionBucket, DerivedProfile, LabCatalog, LabCompletion, PerformerSummary,
};

const BUCKETS: usize = 4;

/// Split the population into at most four completed-count ranges.
///
/// Bucket width is `ceil(total_labs / 4)`; the first bucket starts at 0,
/// so for 20 labs the ranges are 0-5, 6-10, 11-15 and 16-20.
pub fn completion_distribution(profiles: &[DerivedProfile], total_labs: usize) -> Vec<CompletionBucket> {
    let width = total_labs.div_ceil(BUCKETS).max(1);

    (0..BUCKETS)
        .map(|i| {
            let min = if i == 0 { 0 } else { i * width + 1 };
            let max = ((i + 1) * width).min(total_labs.max(width));
            (min, max)
        })
        .filter(|(min, max)| min <= max)
        .map(|(min, max)| {
            let count = profiles
                .iter()
                .filter(|p| p.completed_count >= min && p.completed_count <= max)
                .count();

            CompletionBucket {
                label: format!("{}-{} labs", min, max),
                min,
                max,
                count,
            }
        })
        .collect()
}

/// How many profiles completed each catalog lab.
pub fn lab_completion(profiles: &[DerivedProfile], catalog: &LabCatalog) -> Vec<LabCompletion> {
    catalog
        .labs()
        .iter()
        .map(|lab| {
            let completed_by = profiles.iter().filter(|p| p.has_completed(lab.id)).count();
            let percentage = if profiles.is_empty() {
                0.0
            } else {
                (completed_by as f64 / profiles.len() as f64) * 100.0
            };

            LabCompletion {
                lab_id: lab.id,
                short_name: lab.short_name.clone(),
                completed_by,
                percentage,
            }
        })
        .collect()
}

/// The first `n` profiles in rank order.
pub fn top_performers(profiles: &[DerivedProfile], n: usize) -> Vec<PerformerSummary> {
    let mut ranked: Vec<&DerivedProfile> = profiles.iter().collect();
    ranked.sort_by_key(|p| p.rank);

    ranked
        .into_iter()
        .take(n)
        .map(|p| PerformerSummary {
            rank: p.rank,
            first_name: p.first_name().to_string(),
            completed_count: p.completed_count,
        })
        .collect()
}
