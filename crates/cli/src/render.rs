//! Plain-text rendering of leaderboards, statistics and catalogs.

use std::io::Write;

use studyjam_core::{AggregateStats, DerivedProfile, LabCatalog, RankingMode, ResourceGroup};
use studyjam_progress::Analytics;

const NAME_WIDTH: usize = 28;

/// Clear the terminal and move the cursor home.
pub fn clear_screen() {
    print!("\x1b[2J\x1b[H");
    let _ = std::io::stdout().flush();
}

fn rank_label(rank: usize) -> String {
    match rank {
        1 => "1st".to_string(),
        2 => "2nd".to_string(),
        3 => "3rd".to_string(),
        n => format!("#{}", n),
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
    out.push('~');
    out
}

/// Headline numbers.
pub fn print_stats_summary(stats: &AggregateStats) {
    let top = stats
        .top_performer
        .as_ref()
        .map(|p| format!("{} ({}/{} labs)", p.name(), p.completed_count, p.total_labs))
        .unwrap_or_else(|| "N/A".to_string());
    let credits = match stats.mode {
        RankingMode::Completion => "Labs completed",
        RankingMode::Badges => "Badges earned",
    };

    println!("Participants:    {}", stats.total_participants);
    println!("Finished all:    {}", stats.finishers);
    println!("{:<16} {}", format!("{}:", credits), stats.total_credits());
    println!("Avg completion:  {:.1}%", stats.average_completion);
    println!("Top performer:   {}", top);
    println!();
}

/// Ranked table, optionally with one column per catalog lab.
pub fn print_leaderboard(view: &[DerivedProfile], catalog: &LabCatalog, show_labs: bool) {
    if view.is_empty() {
        println!("No participants found");
        return;
    }

    let total = catalog.len();
    print!("{:>5}  {:<width$}  {:>9}  {:>6}", "Rank", "Participant", "Completed", "Badges", width = NAME_WIDTH);
    if show_labs {
        print!("  ");
        for lab in catalog.labs() {
            print!("{:>3}", lab.id);
        }
    }
    println!();

    for profile in view {
        print!(
            "{:>5}  {:<width$}  {:>9}  {:>6}",
            rank_label(profile.rank),
            truncate(profile.name(), NAME_WIDTH),
            format!("{}/{}", profile.completed_count, total),
            profile.badge_count,
            width = NAME_WIDTH
        );
        if show_labs {
            print!("  ");
            for lab in catalog.labs() {
                print!("{:>3}", if profile.has_completed(lab.id) { "x" } else { "." });
            }
        }
        println!();
        if !profile.url().is_empty() {
            println!("{:>5}  {}", "", profile.url());
        }
    }

    println!("\n{} participants shown", view.len());
}

/// Distribution, per-lab completion and top performers.
pub fn print_analytics(analytics: &Analytics) {
    println!("Completion distribution");
    for bucket in &analytics.distribution {
        println!("  {:<12} {:>4}", bucket.label, bucket.count);
    }

    println!("\nLab completion");
    for lab in &analytics.labs {
        println!(
            "  Lab {:>2} {:<20} {:>4}  {:>3.0}%",
            lab.lab_id,
            truncate(&lab.short_name, 20),
            lab.completed_by,
            lab.percentage
        );
    }

    println!("\nTop performers");
    if analytics.top_performers.is_empty() {
        println!("  N/A");
    }
    for performer in &analytics.top_performers {
        println!(
            "  {:>5}  {:<20} {:>3} labs",
            rank_label(performer.rank),
            truncate(&performer.first_name, 20),
            performer.completed_count
        );
    }
}

/// Lab catalog table.
pub fn print_labs(catalog: &LabCatalog) {
    println!("{:>3}  {:<20}  {}", "Id", "Short name", "Lab");
    for lab in catalog.labs() {
        println!("{:>3}  {:<20}  {}", lab.id, lab.short_name, lab.name);
    }
}

/// Lab links and tutorial videos grouped by course.
pub fn print_resources(groups: &[ResourceGroup]) {
    if groups.is_empty() {
        println!("No matching courses");
        return;
    }

    for group in groups {
        println!("{}", group.title);
        for lab in &group.labs {
            println!("  - {}", lab.name);
            println!("    lab:   {}", lab.link);
            if let Some(video) = lab.video_url() {
                println!("    video: {}", video);
            }
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_label() {
        assert_eq!(rank_label(1), "1st");
        assert_eq!(rank_label(3), "3rd");
        assert_eq!(rank_label(12), "#12");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Alice", 10), "Alice");
        assert_eq!(truncate("Alexandria Ocasio", 8), "Alexand~");
    }
}
