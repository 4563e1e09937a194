use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::MatchRecord;
use crate::errors::SessionError;
use crate::stats::Dashboard;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Uninitialized,
    Loading,
    Ready,
}

/// Immutable view handed to presentation code
#[derive(Debug, Clone)]
pub struct StatsSnapshot {
    pub phase: SessionPhase,
    /// Last successfully computed dashboard; zeroed before the first success
    pub dashboard: Arc<Dashboard>,
    /// Matches behind `dashboard`, newest first
    pub matches: Arc<Vec<MatchRecord>>,
    pub last_error: Option<SessionError>,
    pub refreshed_at: Option<DateTime<Utc>>,
    /// Completed refresh attempts, successful or not
    pub generation: u64,
}

impl Default for StatsSnapshot {
    fn default() -> Self {
        Self {
            phase: SessionPhase::Uninitialized,
            dashboard: Arc::new(Dashboard::default()),
            matches: Arc::new(Vec::new()),
            last_error: None,
            refreshed_at: None,
            generation: 0,
        }
    }
}

impl StatsSnapshot {
    pub fn is_ready(&self) -> bool {
        self.phase == SessionPhase::Ready && self.generation > 0
    }
}

/// At most one fetch in flight; requests during a fetch collapse into one follow-up
#[derive(Debug, Default)]
pub struct RefreshState {
    in_flight: bool,
    pending: bool,
}

impl RefreshState {
    /// Returns true when the caller should start a fetch now
    pub fn request(&mut self) -> bool {
        if self.in_flight {
            self.pending = true;
            false
        } else {
            self.in_flight = true;
            true
        }
    }

    /// Returns true when a coalesced follow-up fetch should start
    pub fn complete(&mut self) -> bool {
        if self.pending {
            self.pending = false;
            true
        } else {
            self.in_flight = false;
            false
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }
}
