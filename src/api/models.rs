use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::MatchRecord;
use crate::session::{SessionPhase, StatsSnapshot};
use crate::stats::{recent_matches, Dashboard};

/// Body of `GET /api/stats`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub phase: SessionPhase,
    pub dashboard: Dashboard,
    pub recent_matches: Vec<MatchRecord>,
    pub last_error: Option<String>,
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl StatsResponse {
    pub fn from_snapshot(snapshot: &StatsSnapshot, recent_limit: usize) -> Self {
        Self {
            phase: snapshot.phase,
            dashboard: (*snapshot.dashboard).clone(),
            recent_matches: recent_matches(&snapshot.matches, recent_limit).to_vec(),
            last_error: snapshot.last_error.as_ref().map(ToString::to_string),
            refreshed_at: snapshot.refreshed_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
