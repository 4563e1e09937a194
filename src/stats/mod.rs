pub mod aggregator;
pub mod duration;
pub mod types;

pub use aggregator::{aggregate, recent_matches, win_rate_percent};
pub use duration::{format_duration, parse_duration};
pub use types::{ChartData, Dashboard, MatchStatistics, MonthlyPoint, ResultCounts, ResultSlice};
