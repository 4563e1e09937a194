use chrono::NaiveDate;

use crate::domain::MatchRecord;
use crate::errors::DeletionError;

/// Only the newest match, and only while it is at most `window_days` from
/// `today`, may be deleted. Ties on `date` go to the later `created_at`, then
/// to the earlier position in the list.
pub fn check_deletable<'a>(
    matches: &'a [MatchRecord],
    id: &str,
    today: NaiveDate,
    window_days: i64,
) -> Result<&'a MatchRecord, DeletionError> {
    let target = matches
        .iter()
        .find(|m| m.id == id)
        .ok_or_else(|| DeletionError::NotFound { id: id.to_string() })?;

    let latest = most_recent(matches).ok_or_else(|| DeletionError::NotFound { id: id.to_string() })?;
    if latest.id != target.id {
        return Err(DeletionError::NotMostRecent {
            id: id.to_string(),
            latest: latest.id.clone(),
        });
    }

    let age_days = (today - target.date.date_naive()).num_days();
    if age_days.abs() > window_days {
        return Err(DeletionError::OutsideWindow {
            id: id.to_string(),
            age_days,
            window_days,
        });
    }

    Ok(target)
}

pub fn most_recent(matches: &[MatchRecord]) -> Option<&MatchRecord> {
    matches.iter().reduce(|best, candidate| {
        if (candidate.date, candidate.created_at) > (best.date, best.created_at) {
            candidate
        } else {
            best
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MatchFormat, MatchResult, MatchType};
    use chrono::{Duration, TimeZone, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn record(id: &str, days_ago: i64) -> MatchRecord {
        let noon = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
        MatchRecord {
            id: id.to_string(),
            date: noon - Duration::days(days_ago),
            match_type: MatchType::Training,
            match_format: MatchFormat::TwoVsTwo,
            player1: "Kerstin".to_string(),
            player2: Some("Annie".to_string()),
            player3: Some("Bella".to_string()),
            result: MatchResult::Training,
            duration: "75".to_string(),
            venue: "Sportpark Augustusweg".to_string(),
            notes: None,
            created_at: None,
        }
    }

    #[test]
    fn test_newest_recent_match_is_deletable() {
        let matches = vec![record("9", 1), record("8", 5)];
        let deletable = check_deletable(&matches, "9", today(), 3).unwrap();
        assert_eq!(deletable.id, "9");
    }

    #[test]
    fn test_window_is_inclusive() {
        let matches = vec![record("9", 3)];
        assert!(check_deletable(&matches, "9", today(), 3).is_ok());

        let matches = vec![record("9", 4)];
        assert_eq!(
            check_deletable(&matches, "9", today(), 3).unwrap_err(),
            DeletionError::OutsideWindow {
                id: "9".to_string(),
                age_days: 4,
                window_days: 3
            }
        );
    }

    #[test]
    fn test_older_match_is_protected() {
        let matches = vec![record("9", 0), record("8", 1)];
        assert_eq!(
            check_deletable(&matches, "8", today(), 3).unwrap_err(),
            DeletionError::NotMostRecent {
                id: "8".to_string(),
                latest: "9".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_match() {
        let matches = vec![record("9", 0)];
        assert_eq!(
            check_deletable(&matches, "1", today(), 3).unwrap_err(),
            DeletionError::NotFound { id: "1".to_string() }
        );
        assert!(check_deletable(&[], "1", today(), 3).is_err());
    }

    #[test]
    fn test_latest_is_found_regardless_of_order() {
        let matches = vec![record("8", 2), record("9", 0)];
        assert_eq!(most_recent(&matches).unwrap().id, "9");
    }

    #[test]
    fn test_same_day_tie_uses_created_at() {
        let mut first = record("8", 0);
        let mut second = record("9", 0);
        first.created_at = Some(Utc.with_ymd_and_hms(2026, 10, 18, 13, 0, 0).unwrap());
        second.created_at = Some(Utc.with_ymd_and_hms(2026, 10, 18, 14, 0, 0).unwrap());

        let matches = vec![first, second];
        assert_eq!(most_recent(&matches).unwrap().id, "9");
        assert!(check_deletable(&matches, "8", today(), 3).is_err());
    }
}
