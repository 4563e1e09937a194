use chrono::Utc;
use serde::Deserialize;

use crate::config::settings::ValidationSettings;
use crate::errors::ValidationError;
use crate::stats::parse_duration;

use super::models::{MatchFormat, MatchResult, MatchType, NewMatch};
use super::normalizer::parse_match_date;

/// Match data as entered by the user
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchDraft {
    /// Defaults to now when absent
    pub date: Option<String>,
    pub match_type: MatchType,
    pub match_format: MatchFormat,
    pub player1: String,
    pub player2: Option<String>,
    pub player3: Option<String>,
    pub result: Option<MatchResult>,
    pub duration: String,
    pub venue: String,
    pub notes: Option<String>,
}

impl MatchDraft {
    pub fn validate(self, settings: &ValidationSettings) -> Result<NewMatch, ValidationError> {
        let date = match self.date.as_deref().map(str::trim) {
            None | Some("") => Utc::now(),
            Some(value) => parse_match_date(value)
                .ok_or_else(|| ValidationError::InvalidDate(value.to_string()))?,
        };

        let player1 = self.player1.trim().to_string();
        if player1.chars().count() < settings.min_name_length {
            return Err(ValidationError::PlayerName {
                min: settings.min_name_length,
            });
        }

        let venue = self.venue.trim().to_string();
        if venue.chars().count() < settings.min_name_length {
            return Err(ValidationError::Venue {
                min: settings.min_name_length,
            });
        }

        let duration = self.duration.trim().to_string();
        if duration.is_empty() {
            return Err(ValidationError::MissingDuration);
        }
        if parse_duration(&duration) < settings.min_duration_minutes {
            return Err(ValidationError::DurationTooShort {
                min: settings.min_duration_minutes,
            });
        }

        let result = resolve_result(self.match_type, self.result)?;

        let (player2, player3) = match self.match_format {
            MatchFormat::OneVsOne => (None, None),
            MatchFormat::TwoVsTwo => (non_blank(self.player2), non_blank(self.player3)),
        };

        Ok(NewMatch {
            date,
            match_type: self.match_type,
            match_format: self.match_format,
            player1,
            player2,
            player3,
            result,
            duration,
            venue,
            notes: non_blank(self.notes),
        })
    }
}

fn resolve_result(
    match_type: MatchType,
    result: Option<MatchResult>,
) -> Result<MatchResult, ValidationError> {
    match (match_type, result) {
        (MatchType::Training, _) => Ok(MatchResult::Training),
        (MatchType::Competitive, None) => Err(ValidationError::MissingResult),
        (MatchType::Competitive, Some(MatchResult::Training)) => {
            Err(ValidationError::TrainingResultForCompetitive)
        }
        (MatchType::Competitive, Some(result)) => Ok(result),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> MatchDraft {
        MatchDraft {
            date: Some("2025-03-24".to_string()),
            match_type: MatchType::Competitive,
            match_format: MatchFormat::TwoVsTwo,
            player1: "Johanna".to_string(),
            player2: Some("Anoosha".to_string()),
            player3: Some("  ".to_string()),
            result: Some(MatchResult::Loss),
            duration: "90 min".to_string(),
            venue: "Sportpark Augustusweg".to_string(),
            notes: Some(String::new()),
        }
    }

    #[test]
    fn test_valid_draft() {
        let new_match = draft().validate(&ValidationSettings::default()).unwrap();

        assert_eq!(new_match.result, MatchResult::Loss);
        assert_eq!(new_match.player2.as_deref(), Some("Anoosha"));
        assert_eq!(new_match.player3, None);
        assert_eq!(new_match.notes, None);
    }

    #[test]
    fn test_short_names_rejected() {
        let settings = ValidationSettings::default();

        let mut short_player = draft();
        short_player.player1 = "J".to_string();
        assert_eq!(
            short_player.validate(&settings).unwrap_err(),
            ValidationError::PlayerName { min: 2 }
        );

        let mut short_venue = draft();
        short_venue.venue = " P ".to_string();
        assert_eq!(
            short_venue.validate(&settings).unwrap_err(),
            ValidationError::Venue { min: 2 }
        );
    }

    #[test]
    fn test_duration_rules() {
        let settings = ValidationSettings::default();

        let mut empty = draft();
        empty.duration = String::new();
        assert_eq!(
            empty.validate(&settings).unwrap_err(),
            ValidationError::MissingDuration
        );

        let mut short = draft();
        short.duration = "45 min".to_string();
        assert_eq!(
            short.validate(&settings).unwrap_err(),
            ValidationError::DurationTooShort { min: 60 }
        );

        let mut words = draft();
        words.duration = "an hour".to_string();
        assert!(words.validate(&settings).is_err());
    }

    #[test]
    fn test_competitive_requires_result() {
        let settings = ValidationSettings::default();

        let mut missing = draft();
        missing.result = None;
        assert_eq!(
            missing.validate(&settings).unwrap_err(),
            ValidationError::MissingResult
        );

        let mut training = draft();
        training.result = Some(MatchResult::Training);
        assert_eq!(
            training.validate(&settings).unwrap_err(),
            ValidationError::TrainingResultForCompetitive
        );
    }

    #[test]
    fn test_training_forces_training_result() {
        let mut training = draft();
        training.match_type = MatchType::Training;
        training.result = Some(MatchResult::Win);

        let new_match = training.validate(&ValidationSettings::default()).unwrap();
        assert_eq!(new_match.result, MatchResult::Training);
    }

    #[test]
    fn test_singles_drop_partners() {
        let mut singles = draft();
        singles.match_format = MatchFormat::OneVsOne;

        let new_match = singles.validate(&ValidationSettings::default()).unwrap();
        assert_eq!(new_match.player2, None);
        assert_eq!(new_match.player3, None);
    }

    #[test]
    fn test_invalid_date() {
        let mut bad = draft();
        bad.date = Some("24.03.2025".to_string());
        assert!(matches!(
            bad.validate(&ValidationSettings::default()),
            Err(ValidationError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_draft_deserializes_from_form_json() {
        let json = r#"{
            "date": "2025-03-24",
            "matchType": "competitive",
            "matchFormat": "1v1",
            "player1": "Manoj",
            "result": "win",
            "duration": "60",
            "venue": "PadelCity Leipzig"
        }"#;

        let parsed: MatchDraft = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.match_format, MatchFormat::OneVsOne);
        assert_eq!(parsed.result, Some(MatchResult::Win));
        assert!(parsed.validate(&ValidationSettings::default()).is_ok());
    }
}
