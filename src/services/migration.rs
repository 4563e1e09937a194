use std::path::Path;

use anyhow::{Context, Result};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::database::NewMatchRow;
use crate::domain::normalizer::format_match_date;
use crate::domain::{parse_match_date, MatchFormat, MatchType};
use crate::store::MatchStore;

/// A match as kept by the old browser-local journal
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyMatch {
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
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationReport {
    pub migrated: usize,
    pub errors: Vec<String>,
}

impl LegacyMatch {
    /// Store payload; the legacy id is dropped since the store assigns its own
    fn into_row(self) -> Result<NewMatchRow> {
        let date = parse_match_date(&self.date)
            .with_context(|| format!("invalid date {:?}", self.date))?;
        let match_type = MatchType::parse(&self.match_type)
            .with_context(|| format!("unknown match type {:?}", self.match_type))?;
        let match_format = MatchFormat::parse(&self.match_format)
            .with_context(|| format!("unknown match format {:?}", self.match_format))?;

        Ok(NewMatchRow {
            date: format_match_date(date),
            match_type: match_type.as_str().to_string(),
            match_format: match_format.as_str().to_string(),
            player1: self.player1,
            player2: self.player2,
            player3: self.player3,
            result: self.result,
            duration: self.duration,
            venue: self.venue,
            notes: self.notes,
        })
    }
}

pub fn read_legacy_file(path: &Path) -> Result<Vec<LegacyMatch>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array of matches", path.display()))
}

/// Insert every legacy match; one failure does not stop the others
pub async fn migrate<S: MatchStore>(store: &S, legacy: Vec<LegacyMatch>) -> MigrationReport {
    let mut report = MigrationReport::default();

    if legacy.is_empty() {
        info!("No legacy matches to migrate");
        return report;
    }
    info!("Migrating {} legacy matches", legacy.len());

    for entry in legacy {
        let legacy_id = entry.id.clone();

        let row = match entry.into_row() {
            Ok(row) => row,
            Err(e) => {
                warn!("Skipping legacy match {}: {:#}", legacy_id, e);
                report
                    .errors
                    .push(format!("Error migrating match {legacy_id}: {e:#}"));
                continue;
            }
        };

        match store.insert(row).await {
            Ok(created) => {
                info!("Migrated legacy match {} as {}", legacy_id, created.id);
                report.migrated += 1;
            }
            Err(e) => {
                error!("Failed to migrate legacy match {}: {}", legacy_id, e);
                report
                    .errors
                    .push(format!("Failed to migrate match {legacy_id}: {e}"));
            }
        }
    }

    info!(
        "Migration completed. Migrated: {}, Errors: {}",
        report.migrated,
        report.errors.len()
    );
    report
}
