use std::fmt::Write;

use colored::{ColoredString, Colorize};

use crate::domain::{MatchRecord, MatchResult};
use crate::session::StatsSnapshot;
use crate::stats::{recent_matches, Dashboard};

const BAR_WIDTH: u32 = 20;

/// Terminal rendering of a dashboard
pub fn render_dashboard(dashboard: &Dashboard) -> String {
    let stats = &dashboard.statistics;
    let mut out = String::new();

    let _ = writeln!(out, "{}", "Padel Journal".bold());
    let _ = writeln!(out, "  Total matches  {}", stats.total_matches.to_string().bold());
    let _ = writeln!(out, "  Total duration {}", dashboard.formatted_duration.bold());
    let _ = writeln!(
        out,
        "  Win rate       {}",
        format!("{}%", dashboard.win_rate_percent).bold()
    );

    let _ = writeln!(out, "\n{}", "Results".bold());
    for slice in &dashboard.charts.result_data {
        let _ = writeln!(out, "  {:<9}{:>4}", result_colored(slice.name), slice.value);
    }

    let _ = writeln!(out, "\n{}", "Matches this year".bold());
    let busiest = stats.monthly_matches.iter().copied().max().unwrap_or(0);
    for point in &dashboard.charts.match_data {
        let _ = writeln!(
            out,
            "  {} {:>3} {}",
            point.month,
            point.matches,
            bar(point.matches, busiest).cyan()
        );
    }

    out
}

/// Dashboard, the newest matches and the last refresh failure, if any
pub fn render_snapshot(snapshot: &StatsSnapshot, recent_limit: usize) -> String {
    let mut out = render_dashboard(&snapshot.dashboard);

    let _ = writeln!(out, "\n{}", "Recent matches".bold());
    out.push_str(&render_matches(recent_matches(&snapshot.matches, recent_limit)));

    if let Some(err) = &snapshot.last_error {
        let _ = writeln!(out, "\n{} {}", "Last refresh failed:".red().bold(), err);
    }
    if let Some(at) = snapshot.refreshed_at {
        let _ = writeln!(out, "{}", format!("Updated {}", at.format("%Y-%m-%d %H:%M:%S UTC")).dimmed());
    }

    out
}

/// One line per match, newest first
pub fn render_matches(matches: &[MatchRecord]) -> String {
    if matches.is_empty() {
        return format!("{}\n", "No matches recorded yet".dimmed());
    }

    let mut out = String::new();
    for record in matches {
        let _ = writeln!(
            out,
            "{:>5}  {}  {:<8} {}  {:<22} {:<10} {}",
            format!("#{}", record.id).dimmed(),
            record.date.format("%Y-%m-%d"),
            record.match_type.as_str(),
            record.match_format.as_str(),
            record.players().join(", "),
            result_colored(record.result.label()),
            record.venue,
        );
    }

    out
}

fn result_colored(label: &str) -> ColoredString {
    if label == MatchResult::Win.label() {
        label.green()
    } else if label == MatchResult::Loss.label() {
        label.red()
    } else {
        label.yellow()
    }
}

fn bar(value: u32, max: u32) -> String {
    if max == 0 {
        return String::new();
    }
    let width = (value * BAR_WIDTH).div_ceil(max);
    "#".repeat(width as usize)
}
