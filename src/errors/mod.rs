use thiserror::Error;

/// A stored row that cannot be turned into a `MatchRecord`
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizationError {
    #[error("Match {id} has an unreadable date: {value}")]
    InvalidDate { id: String, value: String },

    #[error("Match {id} has an unknown match type: {value}")]
    UnknownMatchType { id: String, value: String },

    #[error("Match {id} has an unknown match format: {value}")]
    UnknownMatchFormat { id: String, value: String },
}

/// Failures reported by a match store
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Failed to fetch matches: {0}")]
    Fetch(String),

    #[error("Failed to insert match: {0}")]
    Insert(String),

    #[error("Failed to delete match {id}: {reason}")]
    Delete { id: String, reason: String },

    #[error("Match {0} not found")]
    NotFound(String),

    #[error("Match store unavailable: {0}")]
    Unavailable(String),
}

/// Input rules for new matches
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Match date is not a valid date: {0}")]
    InvalidDate(String),

    #[error("Please enter the first player's name (at least {min} characters)")]
    PlayerName { min: usize },

    #[error("Please enter the venue name (at least {min} characters)")]
    Venue { min: usize },

    #[error("Please enter the match duration")]
    MissingDuration,

    #[error("Duration must be at least {min} minutes")]
    DurationTooShort { min: u32 },

    #[error("Result is required for competitive matches")]
    MissingResult,

    #[error("Competitive matches must be a win or a loss")]
    TrainingResultForCompetitive,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeletionError {
    #[error("Match {id} is not in the current match list")]
    NotFound { id: String },

    #[error("Only the most recent match ({latest}) can be deleted, not {id}")]
    NotMostRecent { id: String, latest: String },

    #[error("Match {id} is {age_days} days old; only matches from the last {window_days} days can be deleted")]
    OutsideWindow {
        id: String,
        age_days: i64,
        window_days: i64,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Normalization(#[from] NormalizationError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Deletion(#[from] DeletionError),

    #[error("Stats session is closed")]
    Closed,
}

impl StoreError {
    /// Wrap a database layer error, keeping the whole context chain
    pub fn fetch(err: anyhow::Error) -> Self {
        Self::Fetch(format!("{err:#}"))
    }

    pub fn insert(err: anyhow::Error) -> Self {
        Self::Insert(format!("{err:#}"))
    }

    pub fn delete(id: &str, err: anyhow::Error) -> Self {
        Self::Delete {
            id: id.to_string(),
            reason: format!("{err:#}"),
        }
    }
}
