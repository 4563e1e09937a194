use chrono::{Datelike, NaiveDate};

use crate::domain::{MatchRecord, MatchResult};

use super::duration::{format_duration, parse_duration};
use super::types::{
    ChartData, Dashboard, MONTHS, MatchStatistics, MonthlyPoint, ResultCounts, ResultSlice,
};

/// Reduce a list of matches to summary statistics.
///
/// Only matches played in `today`'s calendar year are bucketed by month; all
/// matches count toward the totals.
pub fn aggregate(records: &[MatchRecord], today: NaiveDate) -> MatchStatistics {
    let current_year = today.year();

    records
        .iter()
        .fold(MatchStatistics::default(), |mut stats, record| {
            stats.total_matches += 1;
            stats.total_duration_minutes += u64::from(parse_duration(&record.duration));
            count_result(&mut stats.result_counts, record.result);

            if record.date.year() == current_year {
                stats.monthly_matches[record.date.month0() as usize] += 1;
            }

            stats
        })
}

fn count_result(counts: &mut ResultCounts, result: MatchResult) {
    match result {
        MatchResult::Win => counts.win += 1,
        MatchResult::Loss => counts.loss += 1,
        MatchResult::Training => counts.training += 1,
    }
}

/// Share of decided matches that were won, rounded half up; 0 without decided matches
pub fn win_rate_percent(counts: &ResultCounts) -> u32 {
    let decided = counts.decided();
    if decided == 0 {
        return 0;
    }

    (200 * counts.win + decided) / (2 * decided)
}

/// The most recent `limit` matches of a date-descending list
pub fn recent_matches(records: &[MatchRecord], limit: usize) -> &[MatchRecord] {
    &records[..records.len().min(limit)]
}

impl ChartData {
    /// Always 12 months and all three result slices, so chart axes stay stable
    pub fn from_statistics(stats: &MatchStatistics) -> Self {
        let match_data = MONTHS
            .into_iter()
            .zip(stats.monthly_matches)
            .map(|(month, matches)| MonthlyPoint { month, matches })
            .collect();

        let counts = stats.result_counts;
        let result_data = vec![
            ResultSlice {
                name: "Wins",
                value: counts.win,
            },
            ResultSlice {
                name: "Losses",
                value: counts.loss,
            },
            ResultSlice {
                name: "Training",
                value: counts.training,
            },
        ];

        Self {
            match_data,
            result_data,
        }
    }
}

impl Dashboard {
    pub fn build(records: &[MatchRecord], today: NaiveDate) -> Self {
        Self::from_statistics(aggregate(records, today))
    }

    pub fn from_statistics(statistics: MatchStatistics) -> Self {
        Self {
            win_rate_percent: win_rate_percent(&statistics.result_counts),
            formatted_duration: format_duration(
                i64::try_from(statistics.total_duration_minutes).unwrap_or(i64::MAX),
            ),
            charts: ChartData::from_statistics(&statistics),
            statistics,
        }
    }
}
