use serde::{Deserialize, Serialize};

/// A match row as stored, in wire format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRow {
    pub id: String,
    pub date: String,
    pub match_type: String,
    pub match_format: String,
    pub player1: String,
    pub player2: Option<String>,
    pub player3: Option<String>,
    pub result: Option<String>,
    pub duration: String,
    pub venue: String,
    pub notes: Option<String>,
    pub created_at: Option<String>,
}

/// Insert payload: a row without the store assigned fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMatchRow {
    pub date: String,
    pub match_type: String,
    pub match_format: String,
    pub player1: String,
    pub player2: Option<String>,
    pub player3: Option<String>,
    pub result: Option<String>,
    pub duration: String,
    pub venue: String,
    pub notes: Option<String>,
}

impl NewMatchRow {
    pub fn with_id(self, id: String, created_at: Option<String>) -> MatchRow {
        MatchRow {
            id,
            date: self.date,
            match_type: self.match_type,
            match_format: self.match_format,
            player1: self.player1,
            player2: self.player2,
            player3: self.player3,
            result: self.result,
            duration: self.duration,
            venue: self.venue,
            notes: self.notes,
            created_at,
        }
    }
}
