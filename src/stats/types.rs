use serde::Serialize;

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResultCounts {
    pub win: u32,
    pub loss: u32,
    pub training: u32,
}

impl ResultCounts {
    pub fn total(&self) -> u32 {
        self.win + self.loss + self.training
    }

    pub fn decided(&self) -> u32 {
        self.win + self.loss
    }
}

/// Derived totals for a list of matches; recomputed, never stored
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchStatistics {
    pub total_matches: u32,
    pub total_duration_minutes: u64,
    pub result_counts: ResultCounts,
    /// January..December of the current year
    pub monthly_matches: [u32; 12],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyPoint {
    pub month: &'static str,
    pub matches: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultSlice {
    pub name: &'static str,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub match_data: Vec<MonthlyPoint>,
    pub result_data: Vec<ResultSlice>,
}

/// Everything the dashboard renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    #[serde(flatten)]
    pub statistics: MatchStatistics,
    pub win_rate_percent: u32,
    pub formatted_duration: String,
    pub charts: ChartData,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::from_statistics(MatchStatistics::default())
    }
}
