use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Training session or a counted match
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    #[default]
    Training,
    Competitive,
}

impl MatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::Training => "training",
            MatchType::Competitive => "competitive",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "training" => Some(MatchType::Training),
            "competitive" => Some(MatchType::Competitive),
            _ => None,
        }
    }
}

/// Singles or doubles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum MatchFormat {
    #[serde(rename = "1v1")]
    #[value(name = "1v1")]
    OneVsOne,
    #[default]
    #[serde(rename = "2v2")]
    #[value(name = "2v2")]
    TwoVsTwo,
}

impl MatchFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchFormat::OneVsOne => "1v1",
            MatchFormat::TwoVsTwo => "2v2",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "1v1" => Some(MatchFormat::OneVsOne),
            "2v2" => Some(MatchFormat::TwoVsTwo),
            _ => None,
        }
    }
}

/// Outcome used for aggregation; anything that is not a win or a loss is training
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MatchResult {
    Win,
    Loss,
    #[default]
    Training,
}

impl MatchResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchResult::Win => "win",
            MatchResult::Loss => "loss",
            MatchResult::Training => "training",
        }
    }

    /// Exact match on `win`/`loss`, everything else (including absent) is training
    pub fn classify(value: Option<&str>) -> Self {
        match value {
            Some("win") => MatchResult::Win,
            Some("loss") => MatchResult::Loss,
            _ => MatchResult::Training,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchResult::Win => "Win",
            MatchResult::Loss => "Loss",
            MatchResult::Training => "Training",
        }
    }
}

/// A match as the application sees it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub id: String,
    pub date: DateTime<Utc>,
    pub match_type: MatchType,
    pub match_format: MatchFormat,
    pub player1: String,
    pub player2: Option<String>,
    pub player3: Option<String>,
    pub result: MatchResult,
    pub duration: String,
    pub venue: String,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl MatchRecord {
    /// Everyone who played alongside or against the journal owner
    pub fn players(&self) -> Vec<&str> {
        [
            Some(self.player1.as_str()),
            self.player2.as_deref(),
            self.player3.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// A validated match that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewMatch {
    pub date: DateTime<Utc>,
    pub match_type: MatchType,
    pub match_format: MatchFormat,
    pub player1: String,
    pub player2: Option<String>,
    pub player3: Option<String>,
    pub result: MatchResult,
    pub duration: String,
    pub venue: String,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_classification() {
        assert_eq!(MatchResult::classify(Some("win")), MatchResult::Win);
        assert_eq!(MatchResult::classify(Some("loss")), MatchResult::Loss);
        assert_eq!(MatchResult::classify(Some("training")), MatchResult::Training);
        assert_eq!(MatchResult::classify(Some("Win")), MatchResult::Training);
        assert_eq!(MatchResult::classify(None), MatchResult::Training);
    }

    #[test]
    fn test_format_round_trips_through_wire_names() {
        for format in [MatchFormat::OneVsOne, MatchFormat::TwoVsTwo] {
            assert_eq!(MatchFormat::parse(format.as_str()), Some(format));
        }
        assert_eq!(MatchFormat::parse("3v3"), None);
        assert_eq!(MatchType::parse("friendly"), None);
    }
}
