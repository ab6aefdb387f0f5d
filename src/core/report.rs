//! Dashboard report formatting.
//!
//! Renders rollups and the daily series into plain-text form. All functions
//! here are purely derivative of engine output and hold no logic of their
//! own beyond layout.

use crate::core::rollup::{DashboardSummary, TeamRollup};
use crate::core::series::DailyEntry;

/// Formats an amount with the dashboard's currency unit.
///
/// The tracker uses an abstract unit rendered as a `U` suffix, e.g.
/// `"130.00U"`.
#[must_use]
pub fn format_amount(amount: f64) -> String {
    format!("{amount:.2}U")
}

/// Generates a progress bar string for visual representation.
///
/// Creates a text-based bar like: `[████████░░] 80.0%`. Percentages outside
/// 0-100 are clamped for the bar but printed as-is.
#[must_use]
pub fn format_progress_bar(progress_percent: f64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped_progress = progress_percent.clamp(0.0, 100.0);

    // Cast safety: clamped_progress is in [0, 100] and length is small,
    // so the result is in [0, length]; truncation is intentional for display.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped_progress / 100.0) * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    let filled_str = "█".repeat(filled);
    let empty_str = "░".repeat(empty);

    format!("[{filled_str}{empty_str}] {progress_percent:.1}%")
}

/// Formats the dashboard header summary (the four overview cards).
#[must_use]
pub fn format_dashboard_summary(summary: &DashboardSummary) -> String {
    format!(
        "Total Budget: {} | Total Spent: {} | Remaining: {} | Teams: {}",
        format_amount(summary.total_budget),
        format_amount(summary.total_spent),
        format_amount(summary.total_remaining),
        summary.team_count
    )
}

/// Formats one team's rollup as a card: budget line, progress bar, member
/// breakdown, and the unassigned/unresolved buckets when non-zero.
#[must_use]
pub fn format_team_card(rollup: &TeamRollup) -> String {
    let mut card = format!(
        "{} - Budget: {} | Spent: {} | Remaining: {}\n",
        rollup.team.name,
        format_amount(rollup.total_budget),
        format_amount(rollup.total_spent),
        format_amount(rollup.remaining),
    );

    card.push_str(&format!(
        "  {}\n",
        format_progress_bar(rollup.percentage_used, None)
    ));

    for member in &rollup.members {
        let usage = match member.percentage_used {
            Some(pct) => format!("{pct:.1}% of {}", format_amount(member.member.budget)),
            None => "no cap".to_string(),
        };
        let marker = if member.member.is_leader { "*" } else { "-" };
        card.push_str(&format!(
            "  {marker} {} - {} ({usage})\n",
            member.member.name,
            format_amount(member.total_spent),
        ));
    }

    if rollup.unassigned_spending != 0.0 {
        card.push_str(&format!(
            "  - unassigned - {}\n",
            format_amount(rollup.unassigned_spending)
        ));
    }

    if rollup.unresolved_spending != 0.0 {
        card.push_str(&format!(
            "  - former members - {}\n",
            format_amount(rollup.unresolved_spending)
        ));
    }

    card
}

/// Formats the daily series as a table: one row per day, one column per
/// team. Column order follows the entry's (sorted) team keys.
#[must_use]
pub fn format_daily_series(series: &[DailyEntry]) -> String {
    let Some(first) = series.first() else {
        return String::new();
    };

    let mut table = String::from("Day");
    for name in first.totals.keys() {
        table.push_str(&format!("\t{name}"));
    }
    table.push('\n');

    for entry in series {
        table.push_str(&format!("{:>3}", entry.day));
        for total in entry.totals.values() {
            table.push_str(&format!("\t{total:.2}"));
        }
        table.push('\n');
    }

    table
}

/// Formats the full dashboard: header, team cards, and the series table.
#[must_use]
pub fn format_dashboard(
    summary: &DashboardSummary,
    rollups: &[TeamRollup],
    series: &[DailyEntry],
    month_label: &str,
) -> String {
    let mut out = format!("Budget Tracker - {month_label}\n");
    out.push_str(&format_dashboard_summary(summary));
    out.push_str("\n\n");

    for rollup in rollups {
        out.push_str(&format_team_card(rollup));
        out.push('\n');
    }

    out.push_str("Daily Spending Trends\n");
    out.push_str(&format_daily_series(series));
    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::rollup::{compute_dashboard_summary, compute_rollups};
    use crate::core::series::build_daily_series;
    use crate::test_utils::{expenditure_fixture, member_fixture, team_fixture};

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(130.0), "130.00U");
        assert_eq!(format_amount(0.5), "0.50U");
        assert_eq!(format_amount(-50.0), "-50.00U");
    }

    #[test]
    fn test_format_progress_bar_full() {
        assert_eq!(format_progress_bar(100.0, Some(10)), "[██████████] 100.0%");
    }

    #[test]
    fn test_format_progress_bar_half() {
        assert_eq!(format_progress_bar(50.0, Some(10)), "[█████░░░░░] 50.0%");
    }

    #[test]
    fn test_format_progress_bar_overspend_clamps_bar_only() {
        assert_eq!(format_progress_bar(150.0, Some(10)), "[██████████] 150.0%");
    }

    #[test]
    fn test_format_team_card_contents() {
        let team = team_fixture("t1", "Chen Long", 9800.0);
        let members = vec![
            member_fixture("m1", "t1", "Alice", false, 1400.0),
            member_fixture("m2", "t1", "Boss", true, 0.0),
        ];
        let expenditures = vec![
            expenditure_fixture("e1", "t1", Some("m1"), 30.0, 1, "2024-03-02"),
            expenditure_fixture("e2", "t1", None, 50.0, 2, "2024-03-03"),
            expenditure_fixture("e3", "t1", Some("gone"), 5.0, 2, "2024-03-04"),
        ];

        let rollups = compute_rollups(&[team], &members, &expenditures);
        let card = format_team_card(&rollups[0]);

        assert!(card.contains("Chen Long"));
        assert!(card.contains("Budget: 9800.00U"));
        assert!(card.contains("Spent: 140.00U"));
        assert!(card.contains("Alice - 30.00U"));
        assert!(card.contains("Boss - 0.00U (no cap)"));
        assert!(card.contains("unassigned - 100.00U"));
        assert!(card.contains("former members - 10.00U"));
    }

    #[test]
    fn test_format_dashboard_summary() {
        let teams = vec![team_fixture("t1", "One", 9800.0)];
        let rollups = compute_rollups(&teams, &[], &[]);
        let summary = compute_dashboard_summary(&rollups);

        let line = format_dashboard_summary(&summary);
        assert!(line.contains("Total Budget: 9800.00U"));
        assert!(line.contains("Teams: 1"));
    }

    #[test]
    fn test_format_daily_series_table_shape() {
        let teams = vec![team_fixture("t1", "One", 100.0)];
        let series = build_daily_series(2023, 2, &teams, &[]).unwrap();

        let table = format_daily_series(&series);
        let lines: Vec<&str> = table.lines().collect();

        // Header plus 28 days
        assert_eq!(lines.len(), 29);
        assert!(lines[0].contains("One"));
    }

    #[test]
    fn test_format_daily_series_empty() {
        assert_eq!(format_daily_series(&[]), "");
    }
}
