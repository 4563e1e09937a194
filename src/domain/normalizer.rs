use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

use crate::database::{MatchRow, NewMatchRow};
use crate::errors::NormalizationError;

use super::models::{MatchFormat, MatchRecord, MatchResult, MatchType, NewMatch};

/// Convert a stored row into a `MatchRecord`
pub fn normalize(row: MatchRow) -> Result<MatchRecord, NormalizationError> {
    let date = parse_match_date(&row.date).ok_or_else(|| NormalizationError::InvalidDate {
        id: row.id.clone(),
        value: row.date.clone(),
    })?;

    let match_type =
        MatchType::parse(&row.match_type).ok_or_else(|| NormalizationError::UnknownMatchType {
            id: row.id.clone(),
            value: row.match_type.clone(),
        })?;

    let match_format = MatchFormat::parse(&row.match_format).ok_or_else(|| {
        NormalizationError::UnknownMatchFormat {
            id: row.id.clone(),
            value: row.match_format.clone(),
        }
    })?;

    Ok(MatchRecord {
        result: MatchResult::classify(row.result.as_deref()),
        created_at: row.created_at.as_deref().and_then(parse_match_date),
        player2: present(row.player2),
        player3: present(row.player3),
        notes: present(row.notes),
        id: row.id,
        date,
        match_type,
        match_format,
        player1: row.player1,
        duration: row.duration,
        venue: row.venue,
    })
}

/// Normalize every row, stopping at the first corrupt one
pub fn normalize_all(rows: Vec<MatchRow>) -> Result<Vec<MatchRecord>, NormalizationError> {
    rows.into_iter().map(normalize).collect()
}

/// Serialize a validated match into the insert payload
pub fn to_new_row(new_match: &NewMatch) -> NewMatchRow {
    NewMatchRow {
        date: format_match_date(new_match.date),
        match_type: new_match.match_type.as_str().to_string(),
        match_format: new_match.match_format.as_str().to_string(),
        player1: new_match.player1.clone(),
        player2: new_match.player2.clone(),
        player3: new_match.player3.clone(),
        result: Some(new_match.result.as_str().to_string()),
        duration: new_match.duration.clone(),
        venue: new_match.venue.clone(),
        notes: new_match.notes.clone(),
    }
}

/// Accepts RFC 3339, naive ISO date-times (as UTC) and plain dates (midnight UTC)
pub fn parse_match_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

pub fn format_match_date(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Timelike};

    fn row(date: &str) -> MatchRow {
        MatchRow {
            id: "17".to_string(),
            date: date.to_string(),
            match_type: "competitive".to_string(),
            match_format: "2v2".to_string(),
            player1: "Rishi".to_string(),
            player2: Some("Nik".to_string()),
            player3: Some(String::new()),
            result: Some("win".to_string()),
            duration: "90 min".to_string(),
            venue: "PadelCity Leipzig".to_string(),
            notes: None,
            created_at: Some("2025-03-24T18:30:00Z".to_string()),
        }
    }

    #[test]
    fn test_normalize_row() {
        let record = normalize(row("2025-03-24T17:00:00+01:00")).unwrap();

        assert_eq!(record.id, "17");
        assert_eq!(record.date, Utc.with_ymd_and_hms(2025, 3, 24, 16, 0, 0).unwrap());
        assert_eq!(record.match_type, MatchType::Competitive);
        assert_eq!(record.match_format, MatchFormat::TwoVsTwo);
        assert_eq!(record.result, MatchResult::Win);
        assert_eq!(record.player2.as_deref(), Some("Nik"));
        assert_eq!(record.player3, None);
        assert!(record.created_at.is_some());
    }

    #[test]
    fn test_missing_result_is_training() {
        let mut raw = row("2025-03-24");
        raw.result = None;
        assert_eq!(normalize(raw).unwrap().result, MatchResult::Training);
    }

    #[test]
    fn test_date_formats() {
        let plain = parse_match_date("2025-03-13").unwrap();
        assert_eq!((plain.year(), plain.month(), plain.day()), (2025, 3, 13));
        assert_eq!(plain.hour(), 0);

        let naive = parse_match_date("2025-03-13T10:15:00").unwrap();
        assert_eq!(naive.hour(), 10);

        let fractional = parse_match_date("2025-03-13T10:15:00.250").unwrap();
        assert_eq!(fractional.minute(), 15);

        assert!(parse_match_date("13/03/2025").is_none());
        assert!(parse_match_date("").is_none());
    }

    #[test]
    fn test_invalid_date_fails() {
        let err = normalize(row("yesterday")).unwrap_err();
        assert_eq!(
            err,
            NormalizationError::InvalidDate {
                id: "17".to_string(),
                value: "yesterday".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_format_fails() {
        let mut raw = row("2025-03-24");
        raw.match_format = "3v3".to_string();
        assert!(matches!(
            normalize(raw),
            Err(NormalizationError::UnknownMatchFormat { .. })
        ));
    }

    #[test]
    fn test_normalize_all_stops_on_corrupt_row() {
        let rows = vec![row("2025-03-24"), row("not a date")];
        assert!(normalize_all(rows).is_err());
    }

    #[test]
    fn test_new_row_uses_wire_names() {
        let new_match = NewMatch {
            date: Utc.with_ymd_and_hms(2025, 3, 24, 0, 0, 0).unwrap(),
            match_type: MatchType::Training,
            match_format: MatchFormat::OneVsOne,
            player1: "Manoj".to_string(),
            player2: None,
            player3: None,
            result: MatchResult::Training,
            duration: "60".to_string(),
            venue: "PadelCity Leipzig".to_string(),
            notes: None,
        };

        let new_row = to_new_row(&new_match);
        assert_eq!(new_row.date, "2025-03-24T00:00:00Z");
        assert_eq!(new_row.match_type, "training");
        assert_eq!(new_row.match_format, "1v1");
        assert_eq!(new_row.result.as_deref(), Some("training"));
    }
}
